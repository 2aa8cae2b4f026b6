//! Output sinks that receive subprocess output one line at a time

use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for relayed output lines, supplied by the host.
///
/// Calls for a single invocation are sequential, never concurrent.
#[async_trait]
pub trait UiOutput: Send + Sync {
    /// Accept one line of output, without its trailing newline.
    async fn output(&self, line: &str) -> Result<()>;
}

/// Writes every line to the process's stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

#[async_trait]
impl UiOutput for StdoutOutput {
    async fn output(&self, line: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

/// Emits every line as a tracing event.
pub struct LoggingOutput {
    prefix: String,
}

impl LoggingOutput {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl UiOutput for LoggingOutput {
    async fn output(&self, line: &str) -> Result<()> {
        tracing::info!("{}: {}", self.prefix, line);
        Ok(())
    }
}

/// Keeps every line in memory; cheap to clone, clones share the same lines.
#[derive(Debug, Default, Clone)]
pub struct CollectingOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl UiOutput for CollectingOutput {
    async fn output(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
        Ok(())
    }
}
