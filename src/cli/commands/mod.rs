//! Command implementation modules

pub mod apply;
pub mod validate;

pub use apply::{run_apply_command, ApplyOverrides, ApplySink};
pub use validate::run_validate_command;
