//! Text completion backends backed by a local Ollama install.
//!
//! The summarizer only depends on the [`Completion`] trait, so tests can swap
//! in a scripted fake. Two real backends are provided: shelling out to the
//! `ollama` binary, and calling the local Ollama HTTP API.

use crate::config::{BackendConfig, BackendKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("failed to start `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error talking to the model process: {0}")]
    Io(#[from] std::io::Error),
    #[error("model process exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("model process reported an error: {0}")]
    Stderr(String),
    #[error("request to Ollama failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Ollama returned HTTP {0}")]
    Status(u16),
    #[error("Ollama response had no `response` field")]
    MissingResponse,
    #[error("model did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
impl<T: Completion + ?Sized> Completion for &T {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(model, prompt).await
    }
}

/// Runs `ollama run <model>` with the prompt on stdin.
#[derive(Debug, Clone)]
pub struct OllamaCli {
    binary: String,
    timeout: Option<Duration>,
}

impl OllamaCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Give up on the model process after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        let mut child = Command::new(&self.binary)
            .arg("run")
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompletionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // Feed stdin while collecting output so neither side can block the other
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(CompletionError::Failed {
                status: output.status,
                stderr,
            });
        }
        // A process that exits cleanly without reading the whole prompt is judged by its output
        match fed {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }
        if !stderr.is_empty() {
            return Err(CompletionError::Stderr(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl Completion for OllamaCli {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        tracing::debug!(binary = %self.binary, model, "running model process");
        with_timeout(self.timeout, self.run(model, prompt)).await
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Calls `POST {endpoint}/api/generate` on a running Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaHttp {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl OllamaHttp {
    pub fn new(endpoint: &str) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/api/generate", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status.as_u16()));
        }

        let body: GenerateResponse = response.json().await?;
        body.response
            .map(|text| text.trim().to_string())
            .ok_or(CompletionError::MissingResponse)
    }
}

#[async_trait]
impl Completion for OllamaHttp {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        tracing::debug!(endpoint = %self.endpoint, model, "requesting completion");
        with_timeout(self.timeout, self.generate(model, prompt)).await
    }
}

/// The backend selected by configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    Cli(OllamaCli),
    Http(OllamaHttp),
}

impl Backend {
    pub fn from_config(config: &BackendConfig) -> Result<Self, CompletionError> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let backend = match config.kind {
            BackendKind::Cli => Backend::Cli(OllamaCli::new(&config.binary).with_timeout(timeout)),
            BackendKind::Http => {
                Backend::Http(OllamaHttp::new(&config.endpoint)?.with_timeout(timeout))
            }
        };
        Ok(backend)
    }
}

#[async_trait]
impl Completion for Backend {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        match self {
            Backend::Cli(cli) => cli.complete(model, prompt).await,
            Backend::Http(http) => http.complete(model, prompt).await,
        }
    }
}

async fn with_timeout<F>(limit: Option<Duration>, call: F) -> Result<String, CompletionError>
where
    F: std::future::Future<Output = Result<String, CompletionError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| CompletionError::TimedOut(limit))?,
        None => call.await,
    }
}
