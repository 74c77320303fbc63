use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LeaveDeskError, Result};
use crate::resolution::{ResolveOptions, DEFAULT_MATCH_THRESHOLD, FALLBACK_LIMIT};

/// Name of the configuration file stored inside the `.leavedesk` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory holding leavedesk metadata.
pub const LEAVEDESK_DIR: &str = ".leavedesk";

/// Roster file name used when the configuration does not name one.
pub const DEFAULT_ROSTER_FILENAME: &str = "roster.json";

/// Configuration for a leavedesk project.
///
/// Points at the roster file and tunes the fuzzy fallback of the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveDeskConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Roster file, relative to the project root unless absolute.
    pub roster_path: String,
    /// Minimum similarity for a fuzzy match, in [0, 1].
    pub match_threshold: f64,
    /// Maximum number of fuzzy matches offered when no name contains the query.
    pub fallback_limit: usize,
}

impl Default for LeaveDeskConfig {
    fn default() -> Self {
        Self {
            version: 1,
            roster_path: DEFAULT_ROSTER_FILENAME.to_string(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            fallback_limit: FALLBACK_LIMIT,
        }
    }
}

impl LeaveDeskConfig {
    /// Rejects thresholds outside [0, 1] and a zero fallback limit.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(LeaveDeskError::Config {
                message: format!(
                    "match_threshold must be between 0 and 1, got {}",
                    self.match_threshold
                ),
            });
        }
        if self.fallback_limit == 0 {
            return Err(LeaveDeskError::Config {
                message: "fallback_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Resolver options derived from this configuration.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            threshold: self.match_threshold,
            fallback_limit: self.fallback_limit,
        }
    }

    /// Absolute location of the roster file for the given project root.
    pub fn roster_file(&self, project_root: &Path) -> PathBuf {
        let path = Path::new(&self.roster_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }
}

/// Returns the path to the `.leavedesk` directory within the given project root.
pub fn get_leavedesk_dir(project_root: &Path) -> PathBuf {
    project_root.join(LEAVEDESK_DIR)
}

/// Returns the path to the configuration file within the `.leavedesk` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_leavedesk_dir(project_root).join(CONFIG_FILENAME)
}

/// Loads and validates the configuration.
///
/// A missing configuration file yields the defaults.
pub fn load_config(project_root: &Path) -> Result<LeaveDeskConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        return Ok(LeaveDeskConfig::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| LeaveDeskError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: LeaveDeskConfig =
        serde_json::from_str(&contents).map_err(|e| LeaveDeskError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    config.validate()?;
    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it into place.
pub fn save_config(project_root: &Path, config: &LeaveDeskConfig) -> Result<()> {
    config.validate()?;

    let leavedesk_dir = get_leavedesk_dir(project_root);
    fs::create_dir_all(&leavedesk_dir).map_err(|e| LeaveDeskError::Config {
        message: format!(
            "failed to create leavedesk directory '{}': {}",
            leavedesk_dir.display(),
            e
        ),
    })?;

    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| LeaveDeskError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| LeaveDeskError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| LeaveDeskError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
