//! Two-pass summarization pipeline.
//!
//! The model is asked for a plain paragraph. If the cleaned answer still
//! looks like a list, it is asked once more to flatten it. Either way the
//! deterministic normalizer runs last, so the returned summary never starts a
//! line with a bullet and stays within the character budget (plus a closing
//! period).

use crate::completion::{Completion, CompletionError};
use crate::normalize::{
    enforce_character_limit, remove_disclaimer_lines, strip_structural_markup, Structure,
    SummaryBudget,
};
use crate::prompt;

/// Per-run settings for the summarizer
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Model identifier passed to the completion backend
    pub model: String,
    pub budget: SummaryBudget,
}

/// What happened during a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub summary: String,
    /// Decision taken on the cleaned first pass
    pub structure: Structure,
    pub completion_calls: usize,
}

/// Drives a [`Completion`] backend through the two-pass strategy.
pub struct Summarizer<C> {
    completion: C,
    options: SummaryOptions,
}

impl<C: Completion> Summarizer<C> {
    pub fn new(completion: C, options: SummaryOptions) -> Self {
        Self {
            completion,
            options,
        }
    }

    /// Summarize `article` into a single bounded paragraph.
    pub async fn summarize(&self, article: &str) -> Result<String, CompletionError> {
        self.summarize_with_report(article)
            .await
            .map(|report| report.summary)
    }

    pub async fn summarize_with_report(
        &self,
        article: &str,
    ) -> Result<SummaryReport, CompletionError> {
        let budget = self.options.budget;
        if budget.chars() == 0 {
            tracing::warn!("character budget is zero; summary will be at most a period");
        }

        tracing::info!(
            model = %self.options.model,
            article_chars = article.chars().count(),
            %budget,
            "pass one"
        );
        let first_pass = self.complete(prompt::pass_one(article, budget)).await?;
        let first_cleaned = remove_disclaimer_lines(&first_pass);

        let structure = Structure::detect(&first_cleaned);
        tracing::debug!(?structure, "first pass checked for list markup");

        let (candidate, completion_calls) = match structure {
            Structure::NeedsRewrite => {
                tracing::info!("pass two: first pass still has list markup");
                let second_pass = self
                    .complete(prompt::pass_two(&first_cleaned, budget))
                    .await?;
                let cleaned = strip_structural_markup(&remove_disclaimer_lines(&second_pass));
                (cleaned, 2)
            }
            Structure::AcceptableAsIs => (strip_structural_markup(&first_cleaned), 1),
        };

        let summary = enforce_character_limit(&candidate, budget);
        if summary != candidate {
            tracing::debug!(
                from = candidate.chars().count(),
                to = summary.chars().count(),
                "summary truncated to budget"
            );
        }

        Ok(SummaryReport {
            summary,
            structure,
            completion_calls,
        })
    }

    async fn complete(&self, prompt: String) -> Result<String, CompletionError> {
        tracing::debug!(prompt_chars = prompt.chars().count(), "sending prompt");
        let output = self
            .completion
            .complete(&self.options.model, &prompt)
            .await?;
        tracing::debug!(output_chars = output.chars().count(), "received completion");
        Ok(output)
    }
}
