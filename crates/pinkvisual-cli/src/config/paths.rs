//! Config file location.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Application directory under the user config directory.
const APP_DIR: &str = "pinkvisual";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is an absolute path, returns
///   `$XDG_CONFIG_HOME/pinkvisual/config.toml`.
/// - Otherwise returns `~/.config/pinkvisual/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    let xdg_config_home = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir, xdg_config_home.as_deref(), home.as_deref())
}

/// Picks the config path from an explicit directory and the environment
/// values passed in.
///
/// A relative or empty `XDG_CONFIG_HOME` is ignored, as the XDG base
/// directory rules require.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let config_home = match xdg_config_home.filter(|path| path.is_absolute()) {
        Some(path) => path.to_path_buf(),
        None => home
            .filter(|path| !path.as_os_str().is_empty())
            .context("HOME environment variable is not set")?
            .join(".config"),
    };
    Ok(config_home.join(APP_DIR).join(CONFIG_FILE))
}
