//! Prompt templates for the two summarization passes.

use crate::normalize::SummaryBudget;

/// First pass: ask for a plain single-paragraph TL;DR of the article.
pub fn pass_one(article: &str, budget: SummaryBudget) -> String {
    format!(
        "Produce a concise, single-paragraph TLDR of the text below in under {budget} characters. \
         Do not include bullet points, enumerations, disclaimers, code listings, or references to rewriting. \
         Simply provide the gist in plain text:\n\n\
         {article}\n\n\
         Summary:"
    )
}

/// Second pass: flatten a first-pass summary that came back as a list.
pub fn pass_two(summary: &str, budget: SummaryBudget) -> String {
    format!(
        "Rewrite the following text into a single paragraph under {budget} characters. \
         Remove any bullet points, enumerations, disclaimers, code listings, or references to rewriting/the article. \
         Do not apologize or explain. Just produce the final summary:\n\n\
         {summary}\n\n\
         Final summary:"
    )
}
