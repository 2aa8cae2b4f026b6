use std::path::Path;

use super::ConfigError;

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~` are returned unchanged, as is the empty
/// string. `~user` forms are not supported.
pub fn expand_home(path: &str) -> Result<String, ConfigError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(path.to_string());
    };

    if !rest.is_empty() && !rest.starts_with(['/', '\\']) {
        return Err(ConfigError::HomeExpansion {
            path: path.to_string(),
            reason: "cannot expand user-specific home dir".to_string(),
        });
    }

    let home = dirs::home_dir().ok_or_else(|| ConfigError::HomeExpansion {
        path: path.to_string(),
        reason: "home directory could not be determined".to_string(),
    })?;

    let rest = rest.trim_start_matches(['/', '\\']);
    let expanded = if rest.is_empty() {
        home
    } else {
        home.join(Path::new(rest))
    };
    Ok(expanded.display().to_string())
}
