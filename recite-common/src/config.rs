//! Configuration loading and config file resolution
//!
//! Bootstrap configuration lives in a single TOML file. Resolution order:
//! 1. Explicit path supplied by the embedding process
//! 2. `RECITE_CONFIG` environment variable
//! 3. `<config dir>/recite/recite.toml` (platform config directory)
//! 4. Built-in defaults (no file)
//!
//! Every field is optional; missing values fall back to serde defaults so a
//! partial file is always accepted.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "RECITE_CONFIG";

const CONFIG_DIR_NAME: &str = "recite";
const CONFIG_FILE_NAME: &str = "recite.toml";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file used by the bundled store adapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retrieval engine tuning (see `recite_retrieval::config::RetrievalSettings`)
    #[serde(default)]
    pub retrieval: RetrievalToml,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Raw retrieval settings as written in the TOML file
///
/// Values left unset are resolved against environment overrides and
/// built-in defaults by the retrieval crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalToml {
    /// Primary-count threshold deciding whether the first-initial strategy is
    /// trusted or the broader strategies run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leniency_threshold: Option<f64>,

    /// Count above which a strategy re-runs its strict query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_switch_threshold: Option<u64>,

    /// Enable cross-source enrichment against the secondary record source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_scopus_articles: Option<bool>,

    /// Number of identities processed concurrently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_pool_size: Option<usize>,

    /// Free-text institution names for the affiliation strategy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub institution_keywords: Vec<String>,
}

/// Platform default config file location (`~/.config/recite/recite.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve which config file to read, if any
///
/// An explicit path or `RECITE_CONFIG` is returned even if the file does not
/// exist so that the caller reports the misconfiguration. The platform default
/// is only returned when present.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load configuration following the resolution order above
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(explicit) {
        Some(path) => {
            let config = load_toml_config(&path)?;
            info!("Configuration loaded from {}", path.display());
            Ok(config)
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Write configuration to disk atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;

    debug!("Configuration written to {}", path.display());
    Ok(())
}
