use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::{load_resource_config, ResourceConfig};
use crate::error::ProvisionerError;
use crate::provisioner::{ResourceProvisioner, WafflesProvisioner};
use crate::subprocess::{LoggingOutput, StdoutOutput, UiOutput};

/// Values given on the command line, resolved over the file's raw values.
#[derive(Debug, Clone, Default)]
pub struct ApplyOverrides {
    pub host: Option<String>,
    pub role: Option<String>,
    pub site_directory: Option<String>,
}

impl ApplyOverrides {
    pub fn apply_to(self, config: &mut ResourceConfig) {
        let overrides = [
            ("host", self.host),
            ("role", self.role),
            ("site_directory", self.site_directory),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                debug!("Overriding {} from the command line", key);
                config.set(key, value);
            }
        }
    }
}

/// Where waffles output goes during `apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplySink {
    #[default]
    Stdout,
    /// Each line becomes an info-level log event
    Log,
}

impl ApplySink {
    pub fn output(self) -> Arc<dyn UiOutput> {
        match self {
            ApplySink::Stdout => Arc::new(StdoutOutput),
            ApplySink::Log => Arc::new(LoggingOutput::new("waffles")),
        }
    }
}

/// Load `file` and provision it, sending waffles output to `sink`.
pub async fn run_apply_command(
    file: &Path,
    overrides: ApplyOverrides,
    sink: ApplySink,
) -> Result<()> {
    let mut config = load_resource_config(file)
        .await
        .map_err(ProvisionerError::from)?;
    overrides.apply_to(&mut config);

    WafflesProvisioner::production()
        .apply(sink.output(), None, &config)
        .await?;
    Ok(())
}
