use crate::error::{ErrorCode, ProvisionerError};

use super::runner::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Waffles is not supported on {0} at this time")]
    PlatformUnsupported(&'static str),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Failed to start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error running command '{command}': {status}. Output: {output}")]
    Execution {
        command: String,
        status: ExitStatus,
        /// Most recent combined output, bounded by the tail buffer size
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mock expectation not met: {0}")]
    MockExpectationNotMet(String),
}

impl ProcessError {
    /// Captured output tail, for execution failures.
    pub fn output(&self) -> Option<&str> {
        match self {
            ProcessError::Execution { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Convert ProcessError to ProvisionerError
impl From<ProcessError> for ProvisionerError {
    fn from(err: ProcessError) -> Self {
        let code = match &err {
            ProcessError::PlatformUnsupported(_) => ErrorCode::EXEC_PLATFORM_UNSUPPORTED,
            ProcessError::CommandNotFound(_) => ErrorCode::EXEC_COMMAND_NOT_FOUND,
            ProcessError::SpawnFailed { .. } => ErrorCode::EXEC_SPAWN_FAILED,
            ProcessError::Execution {
                status: ExitStatus::Signal(_),
                ..
            } => ErrorCode::EXEC_SIGNAL_RECEIVED,
            ProcessError::Execution { .. } => ErrorCode::EXEC_SUBPROCESS_FAILED,
            ProcessError::Io(_) => ErrorCode::EXEC_OUTPUT_ERROR,
            ProcessError::MockExpectationNotMet(_) => ErrorCode::EXEC_GENERIC,
        };

        ProvisionerError::Process { code, source: err }
    }
}
