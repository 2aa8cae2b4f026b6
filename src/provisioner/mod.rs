//! The waffles resource provisioner
//!
//! [`WafflesProvisioner`] validates the host configuration, decodes it,
//! builds the waffles invocation and runs it while streaming every output
//! line back to the host.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{ConfigError, ConfigValidator, ResourceConfig, WafflesConfig};
use crate::error::{ProvisionerError, Result};
use crate::subprocess::{ensure_supported_platform, SubprocessManager, UiOutput};

pub mod command;
pub mod state;


pub use command::{build_command, SITE_DIR_ENV};
pub use state::InstanceState;

/// A provisioner the host can drive.
#[async_trait]
pub trait ResourceProvisioner: Send + Sync {
    /// Provision the resource described by `config`, relaying progress to
    /// `output`. Returns once the provisioning run has finished and every
    /// output line has been delivered.
    async fn apply(
        &self,
        output: Arc<dyn UiOutput>,
        state: Option<&InstanceState>,
        config: &ResourceConfig,
    ) -> Result<()>;

    /// Check `config` without running anything. Returns `(warnings, errors)`.
    fn validate(&self, config: &ResourceConfig) -> (Vec<String>, Vec<ConfigError>);
}

#[derive(Clone)]
pub struct WafflesProvisioner {
    subprocess: SubprocessManager,
    validator: ConfigValidator,
}

impl WafflesProvisioner {
    pub fn new(subprocess: SubprocessManager) -> Self {
        Self {
            subprocess,
            validator: ConfigValidator::waffles(),
        }
    }

    pub fn production() -> Self {
        Self::new(SubprocessManager::production())
    }
}

impl Default for WafflesProvisioner {
    fn default() -> Self {
        Self::production()
    }
}

#[async_trait]
impl ResourceProvisioner for WafflesProvisioner {
    async fn apply(
        &self,
        output: Arc<dyn UiOutput>,
        _state: Option<&InstanceState>,
        config: &ResourceConfig,
    ) -> Result<()> {
        let (_, errors) = self.validate(config);
        if !errors.is_empty() {
            return Err(ProvisionerError::validation(errors));
        }

        let waffles = WafflesConfig::decode(config)?;
        ensure_supported_platform()?;

        let command = build_command(&waffles);
        let rendered = command.display();
        info!("Provisioning {} with role {}", waffles.host, waffles.role);

        // The host sees the exact invocation before any waffles output.
        if let Err(e) = output.output(&format!("Executing: {rendered}")).await {
            debug!("Failed to echo command to output: {}", e);
        }

        self.subprocess.runner().run(command, output).await?;
        info!("Provisioned {} with role {}", waffles.host, waffles.role);
        Ok(())
    }

    fn validate(&self, config: &ResourceConfig) -> (Vec<String>, Vec<ConfigError>) {
        let (warnings, errors) = self.validator.validate(config);
        for err in &errors {
            debug!("Configuration rejected: {}", err);
        }
        (warnings, errors)
    }
}
