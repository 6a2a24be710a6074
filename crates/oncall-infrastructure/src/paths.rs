//! Path resolution for on-call configuration files.
//!
//! ```text
//! ~/.config/oncall/        # Config directory
//! └── config.toml          # TriageConfig
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct OncallPaths;

impl OncallPaths {
    /// Application directory name under the platform config dir.
    pub const APP_DIR: &'static str = "oncall";

    /// Returns the configuration directory (e.g. `~/.config/oncall/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
