//! Web scraping module for article retrieval and text extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use reqwest::Client;
use scraper::{Html, Node, Selector};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this scraper
const USER_AGENT: &str = concat!("tldr-llama/", env!("CARGO_PKG_VERSION"));

/// Elements whose text is never part of the readable article
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no content found at URL")]
    NoContent,
}

/// Extracted content from a webpage
#[derive(Debug, Clone)]
pub struct WebContent {
    /// The original URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Readable text, one text node per line
    pub text: String,
}

/// Create a configured HTTP client for scraping
fn create_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
pub async fn fetch_page(url: &str, timeout: Duration) -> Result<String, ScraperError> {
    let client = create_client(timeout)?;

    let response = client.get(url).send().await?.error_for_status()?;
    tracing::debug!(url, status = %response.status(), "fetched page");

    Ok(response.text().await?)
}

/// Fetch and extract content from a URL
pub async fn fetch_content(url: &str, timeout: Duration) -> Result<WebContent, ScraperError> {
    // Fetch the HTML
    let html = fetch_page(url, timeout).await?;

    // Extract title and readable text
    let title = extract_title(&html);
    let text = extract_text(&html);

    if text.is_empty() {
        return Err(ScraperError::NoContent);
    }

    Ok(WebContent {
        url: url.to_string(),
        title,
        text,
    })
}

/// Extract the page title from <title> or <h1>
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    ["title", "h1"].into_iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        let element = document.select(&selector).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Extract readable text from markup.
///
/// Script and style content is dropped. Every remaining non-blank text node
/// is trimmed and placed on its own line.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let lines: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some((node, text)),
            _ => None,
        })
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
            })
        })
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty())
        .collect();

    lines.join("\n")
}
