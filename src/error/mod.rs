use thiserror::Error;

use crate::config::ConfigError;
use crate::subprocess::ProcessError;

pub mod codes;


pub use codes::{describe_error_code, ErrorCode};

/// The unified error type returned by provisioner operations
#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("[E{code:04}] Configuration error: {source}")]
    Config {
        code: u16,
        #[source]
        source: ConfigError,
    },

    #[error("[E{code:04}] Invalid configuration: {}", join_errors(.errors))]
    Validation { code: u16, errors: Vec<ConfigError> },

    #[error("[E{code:04}] {source}")]
    Process {
        code: u16,
        #[source]
        source: ProcessError,
    },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProvisionerError {
    /// Wrap the errors reported by the validator
    pub fn validation(errors: Vec<ConfigError>) -> Self {
        let code = match errors.as_slice() {
            [only] => only.code(),
            _ => ErrorCode::VALIDATION_GENERIC,
        };
        Self::Validation { code, errors }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. } | Self::Validation { code, .. } | Self::Process { code, .. } => {
                *code
            }
        }
    }

    /// Process exit code for the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Validation { .. } => 2,
            Self::Process { .. } => 1,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { source, .. } => format!("Configuration problem: {}", source),
            Self::Validation { errors, .. } => {
                let mut msg = String::from("Configuration is invalid:");
                for err in errors {
                    msg.push_str("\n  - ");
                    msg.push_str(&err.to_string());
                }
                msg
            }
            Self::Process { source, .. } => source.to_string(),
        }
    }

    /// Full message with error code description, for verbose output
    pub fn developer_message(&self) -> String {
        format!(
            "E{:04} ({}): {}",
            self.code(),
            describe_error_code(self.code()),
            self
        )
    }

    pub fn process_error(&self) -> Option<&ProcessError> {
        match self {
            Self::Process { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ProvisionerError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            code: err.code(),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;
