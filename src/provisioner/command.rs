use crate::config::WafflesConfig;
use crate::subprocess::{ProcessCommand, ProcessCommandBuilder};

/// Environment variable telling waffles where its site lives.
pub const SITE_DIR_ENV: &str = "WAFFLES_SITE_DIR";

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn non_zero(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}

/// Map a decoded configuration to the waffles invocation.
///
/// Produces `<waffles_exec> -s <host> -r <role> [-d] [-k <key>] [-z <dir>]
/// [-c <retry>] [-y] [-u <user>] [-w <wait>]` with the site directory passed
/// through the environment.
pub fn build_command(config: &WafflesConfig) -> ProcessCommand {
    ProcessCommandBuilder::new(&config.waffles_exec)
        .args(["-s", config.host.as_str(), "-r", config.role.as_str()])
        .flag_if(config.debug, "-d")
        .opt("-k", non_empty(&config.private_key))
        .opt("-z", non_empty(&config.remote_dir))
        .opt("-c", non_zero(config.retry))
        .flag_if(config.sudo, "-y")
        .opt("-u", non_empty(&config.user))
        .opt("-w", non_zero(config.wait))
        .env(SITE_DIR_ENV, &config.site_directory)
        .build()
}
