//! Configuration service implementation.
//!
//! Loads `TriageConfig` from `~/.config/oncall/config.toml` and caches it.
//! A missing file means defaults; a malformed one is an error.

use anyhow::{Context, Result};
use oncall_core::config::TriageConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::OncallPaths;

/// Configuration service that loads and caches the triage configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config path; `None` resolves the platform default.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<TriageConfig>>>,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    /// Creates a service reading the platform default location.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => OncallPaths::config_file().context("Failed to resolve config path"),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<TriageConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_from(&self.config_path()?)?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Reads and parses `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<TriageConfig> {
        if !path.exists() {
            tracing::debug!(
                target: "oncall::config",
                path = %path.display(),
                "No config file, using defaults"
            );
            return Ok(TriageConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: TriageConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        tracing::info!(
            target: "oncall::config",
            path = %path.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Writes `config` to the service's path, creating parent directories.
    pub fn save(&self, config: &TriageConfig) -> Result<()> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        self.invalidate_cache();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncall_core::config::OverflowPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.get_config().unwrap();
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[uploads]
max_log_files = 5
overflow = "reject"

[services]
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = ConfigService::with_path(&path).get_config().unwrap();
        assert_eq!(config.uploads.max_log_files, 5);
        assert_eq!(config.uploads.max_attachment_files, 10);
        assert_eq!(config.uploads.overflow, OverflowPolicy::Reject);
        assert_eq!(config.services.timeout_secs, 3);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[uploads\nmax_log_files = ").unwrap();

        let err = ConfigService::with_path(&path).get_config().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().unwrap().services.timeout_secs, 30);

        std::fs::write(&path, "[services]\ntimeout_secs = 9\n").unwrap();
        assert_eq!(service.get_config().unwrap().services.timeout_secs, 30);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().services.timeout_secs, 9);
    }

    #[test]
    fn test_save_round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("nested").join("config.toml"));
        let mut config = TriageConfig::default();
        config.session.clear_analysis_on_ticket_switch = true;

        service.save(&config).unwrap();

        assert!(service.get_config().unwrap().session.clear_analysis_on_ticket_switch);
    }
}
