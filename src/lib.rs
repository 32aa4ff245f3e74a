//! # tldr
//!
//! Bullet-free, disclaimer-free TL;DR summaries of web articles using a
//! locally hosted Ollama model.
//!
//! ## Features
//!
//! - **Two-pass prompting**: a second, more directive prompt only when the first answer comes back as a list
//! - **Deterministic cleanup**: disclaimer lines, bullets, enumerations and code fences are stripped regardless of what the model does
//! - **Hard budget**: the summary is cut to the character budget and closed with a period
//! - **Pluggable backends**: `ollama run` subprocess or the Ollama HTTP API

pub mod completion;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod scraper;

pub use completion::{Backend, Completion, CompletionError};
pub use config::Config;
pub use normalize::{Structure, SummaryBudget};
pub use pipeline::{SummaryOptions, SummaryReport, Summarizer};
