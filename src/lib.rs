//! # waffles-provisioner
//!
//! Runs the [waffles](https://github.com/jtopjian/waffles) configuration
//! management tool against a remote host and streams its output, line by
//! line, to the caller while the run is in progress.
//!
//! ## Usage
//!
//! ```bash
//! waffles-provisioner apply site.toml [--host H] [--role R] [--site-directory D]
//! waffles-provisioner validate site.toml
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, process configuration and fatal error handling
//! - `cli` - Command-line parsing and command implementations
//! - `config` - Resource configuration decoding, validation and file loading
//! - `error` - Unified error type with numeric error codes
//! - `provisioner` - The `ResourceProvisioner` trait and the waffles implementation
//! - `subprocess` - Subprocess execution with live output relay and a bounded output tail
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod provisioner;
pub mod subprocess;

pub use config::{ResourceConfig, WafflesConfig};
pub use error::{ProvisionerError, Result};
pub use provisioner::{InstanceState, ResourceProvisioner, WafflesProvisioner};
pub use subprocess::UiOutput;
