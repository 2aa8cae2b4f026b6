//! Subprocess execution with live, line-oriented output streaming

pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;
pub mod streaming;


pub use builder::ProcessCommandBuilder;
pub use error::ProcessError;
pub use mock::{MockCommandConfig, MockProcessRunner};
pub use runner::{ExitStatus, ProcessCommand, ProcessRunner, TokioProcessRunner, MAX_OUTPUT_TAIL};
pub use streaming::{CollectingOutput, LoggingOutput, StdoutOutput, UiOutput};

use std::sync::Arc;

/// Fails on platforms where waffles cannot run.
pub fn ensure_supported_platform() -> Result<(), ProcessError> {
    if cfg!(windows) {
        return Err(ProcessError::PlatformUnsupported(std::env::consts::OS));
    }
    Ok(())
}

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(TokioProcessRunner::new()))
    }

    pub fn mock() -> (Self, MockProcessRunner) {
        let mock = MockProcessRunner::new();
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        (Self::new(runner), mock)
    }

    pub fn runner(&self) -> Arc<dyn ProcessRunner> {
        Arc::clone(&self.runner)
    }
}
