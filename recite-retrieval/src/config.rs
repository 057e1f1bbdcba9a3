//! Retrieval settings resolution
//!
//! **Priority:** ENV → TOML → built-in defaults
//!
//! Invalid environment values are reported and skipped so a typo in the
//! environment never prevents the engine from starting.

use recite_common::config::TomlConfig;
use std::str::FromStr;
use tracing::{info, warn};

pub const ENV_LENIENCY_THRESHOLD: &str = "RECITE_LENIENCY_THRESHOLD";
pub const ENV_STRICT_SWITCH_THRESHOLD: &str = "RECITE_STRICT_SWITCH_THRESHOLD";
pub const ENV_USE_SCOPUS: &str = "RECITE_USE_SCOPUS";
pub const ENV_WORKER_POOL_SIZE: &str = "RECITE_WORKER_POOL_SIZE";

pub const DEFAULT_LENIENCY_THRESHOLD: f64 = 200.0;
pub const DEFAULT_STRICT_SWITCH_THRESHOLD: u64 = 2000;
pub const DEFAULT_WORKER_POOL_SIZE: usize = 10;

/// Resolved engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalSettings {
    /// First-initial primary count below which its results are kept, and
    /// above which the broadening strategies run
    pub leniency_threshold: f64,
    /// Count above which a strategy falls back from its initial to its strict query
    pub strict_switch_threshold: u64,
    /// Cross-source enrichment against the secondary record source
    pub use_scopus_articles: bool,
    /// Identities processed concurrently by the batch driver (at least 1)
    pub worker_pool_size: usize,
    /// Institution names for the free-text affiliation strategy
    pub institution_keywords: Vec<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            leniency_threshold: DEFAULT_LENIENCY_THRESHOLD,
            strict_switch_threshold: DEFAULT_STRICT_SWITCH_THRESHOLD,
            use_scopus_articles: true,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            institution_keywords: Vec::new(),
        }
    }
}

impl RetrievalSettings {
    /// Resolve settings from the environment, then TOML, then defaults
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        let toml = &toml_config.retrieval;
        let defaults = Self::default();

        let leniency_threshold = env_value::<f64>(ENV_LENIENCY_THRESHOLD)
            .filter(|v| v.is_finite())
            .or(toml.leniency_threshold.filter(|v| v.is_finite()))
            .unwrap_or(defaults.leniency_threshold);

        let strict_switch_threshold = env_value::<u64>(ENV_STRICT_SWITCH_THRESHOLD)
            .or(toml.strict_switch_threshold)
            .unwrap_or(defaults.strict_switch_threshold);

        let use_scopus_articles = env_value::<bool>(ENV_USE_SCOPUS)
            .or(toml.use_scopus_articles)
            .unwrap_or(defaults.use_scopus_articles);

        let mut worker_pool_size = env_value::<usize>(ENV_WORKER_POOL_SIZE)
            .or(toml.worker_pool_size)
            .unwrap_or(defaults.worker_pool_size);
        if worker_pool_size == 0 {
            warn!("worker_pool_size of 0 is not usable, using 1");
            worker_pool_size = 1;
        }

        let institution_keywords = toml
            .institution_keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        let settings = Self {
            leniency_threshold,
            strict_switch_threshold,
            use_scopus_articles,
            worker_pool_size,
            institution_keywords,
        };

        info!(
            leniency_threshold = settings.leniency_threshold,
            strict_switch_threshold = settings.strict_switch_threshold,
            use_scopus_articles = settings.use_scopus_articles,
            worker_pool_size = settings.worker_pool_size,
            "Retrieval settings resolved"
        );

        settings
    }
}

/// Read and parse an environment variable, warning on unparsable values
fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}
