//! tldr CLI - bullet-free article summaries from a local model
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;
use tldr_llama::config::BackendKind;
use tldr_llama::{logging, scraper, Backend, Config, Summarizer, SummaryBudget, SummaryOptions};

#[derive(Parser)]
#[command(name = "tldr")]
#[command(author, version, about = "Generate a bullet-free, disclaimer-free TL;DR from a local LLaMA model", long_about = None)]
struct Cli {
    /// URL of the article to summarize [default: https://example.com/article]
    #[arg(short, long)]
    url: Option<String>,
    /// Maximum number of characters for the summary [default: 500]
    #[arg(short, long, allow_negative_numbers = true)]
    characters: Option<i64>,
    /// Local model name to use with ollama [default: llama3.2-vision:11b]
    #[arg(short, long)]
    model: Option<String>,
    /// Completion backend
    #[arg(long, value_enum)]
    backend: Option<CliBackend>,
    /// Path to a tldr.toml config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show raw extracted text instead of summary
    #[arg(long)]
    raw: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CliBackend {
    Cli,
    Http,
}

impl From<CliBackend> for BackendKind {
    fn from(value: CliBackend) -> Self {
        match value {
            CliBackend::Cli => BackendKind::Cli,
            CliBackend::Http => BackendKind::Http,
        }
    }
}

impl Cli {
    /// Flags override whatever the config file and environment provided
    fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.fetch.url = url.clone();
        }
        if let Some(characters) = self.characters {
            config.summary.max_chars = characters;
        }
        if let Some(model) = &self.model {
            config.summary.model = model.clone();
        }
        if let Some(backend) = self.backend {
            config.backend.kind = backend.into();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "tldr", &mut std::io::stdout());
        return Ok(());
    }

    logging::init(cli.verbose)?;
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    // Config file and environment first, then flags on top
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    cli.apply_to(&mut config);

    let url = config.fetch.url.clone();
    tracing::info!(%url, "fetching article");

    if cli.raw {
        // Just show raw extracted text
        let content = scraper::fetch_content(&url, config.fetch_timeout())
            .await
            .with_context(|| format!("failed to fetch {url}"))?;
        let title = content.title.as_deref().unwrap_or("No title");

        println!("\n=== {} ===\n", title.bold());
        println!("{}", content.text);
        println!(
            "\n--- Extracted {} characters ---",
            content.text.chars().count()
        );
        return Ok(());
    }

    // Scrape the content
    let html = scraper::fetch_page(&url, config.fetch_timeout())
        .await
        .with_context(|| format!("failed to fetch {url}"))?;
    let article = scraper::extract_text(&html);

    // Summarise using the configured model
    let backend = Backend::from_config(&config.backend)
        .context("failed to set up completion backend")?;
    let summarizer = Summarizer::new(
        backend,
        SummaryOptions {
            model: config.summary.model.clone(),
            budget: SummaryBudget::from(config.summary.max_chars),
        },
    );

    let report = summarizer
        .summarize_with_report(&article)
        .await
        .context("summarization failed")?;
    tracing::info!(
        calls = report.completion_calls,
        structure = ?report.structure,
        chars = report.summary.chars().count(),
        "summary ready"
    );

    println!("\n{}\n", "--- SUMMARY ---".bold());
    println!("{}", report.summary);
    println!("\n{}", "---------------".dimmed());

    Ok(())
}
