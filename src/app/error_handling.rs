//! Error handling utilities

use tracing::error;

use crate::error::ProvisionerError;

/// Exit code for `error`: the provisioner's own code when it carries a
/// [`ProvisionerError`], 1 otherwise.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ProvisionerError>()
        .map_or(1, ProvisionerError::exit_code)
}

/// Report a fatal error and exit.
///
/// - `verbose = 0`: user-facing message only
/// - `verbose >= 1`: adds the error code description and cause chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    if let Some(err) = error.downcast_ref::<ProvisionerError>() {
        eprintln!("{}", err.user_message());
        if verbose >= 1 {
            eprintln!("\n{}", err.developer_message());
        }
    } else {
        eprintln!("Error: {error}");
        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
    }

    std::process::exit(exit_code_for(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::subprocess::{ExitStatus, ProcessError};

    #[test]
    fn test_exit_codes() {
        let validation: anyhow::Error =
            ProvisionerError::validation(vec![ConfigError::UnknownField("x".into())]).into();
        assert_eq!(exit_code_for(&validation), 2);

        let failed: anyhow::Error = ProvisionerError::from(ProcessError::Execution {
            command: "waffles.sh".into(),
            status: ExitStatus::Error(3),
            output: String::new(),
        })
        .into();
        assert_eq!(exit_code_for(&failed), 1);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn test_context_does_not_hide_exit_code() {
        let err = anyhow::Error::from(ProvisionerError::from(ConfigError::Decode("bad".into())))
            .context("while applying");
        assert_eq!(exit_code_for(&err), 2);
    }
}
