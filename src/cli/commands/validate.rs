use anyhow::Result;
use std::path::Path;

use crate::config::load_resource_config;
use crate::error::ProvisionerError;
use crate::provisioner::{ResourceProvisioner, WafflesProvisioner};

/// Load `file`, report warnings and errors, and fail if there are errors.
pub async fn run_validate_command(file: &Path) -> Result<()> {
    let config = load_resource_config(file)
        .await
        .map_err(ProvisionerError::from)?;

    let (warnings, errors) = WafflesProvisioner::production().validate(&config);
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    if !errors.is_empty() {
        return Err(ProvisionerError::validation(errors).into());
    }

    println!("{}: configuration is valid", file.display());
    Ok(())
}
