//! Configuration Loader
//!
//! Layers the optional TOML file and `RENEWAL_HEALTH__*` environment
//! variables, deserializes into [`HealthServiceConfig`], and validates.

use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ConfigResult;
use super::HealthServiceConfig;
use crate::constants::env;
use crate::logging::get_environment;

const DEFAULT_CONFIG_PATH: &str = "config/renewal-health.toml";

/// Loaded, validated configuration plus the environment it was loaded for
#[derive(Debug)]
pub struct ConfigManager {
    config: HealthServiceConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration from the default file location and the process environment
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        let path = std::env::var(env::CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific file, layered under the process environment
    ///
    /// A missing file is not an error; every value can come from the environment.
    pub fn load_from_path(path: &Path) -> ConfigResult<Arc<ConfigManager>> {
        debug!(path = %path.display(), "Loading health service configuration");

        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Self::environment_source(None));

        Self::finish(builder.build()?)
    }

    /// Load configuration from a TOML string with explicit environment overrides
    ///
    /// Overrides use the same `RENEWAL_HEALTH__SECTION__FIELD` keys as the
    /// process environment, without touching global state.
    pub fn load_from_str(
        toml: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let builder = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(Self::environment_source(Some(overrides.unwrap_or_default())));

        Self::finish(builder.build()?)
    }

    pub fn config(&self) -> &HealthServiceConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn environment_source(source: Option<HashMap<String, String>>) -> Environment {
        Environment::with_prefix(env::CONFIG_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(source)
    }

    fn finish(raw: Config) -> ConfigResult<Arc<ConfigManager>> {
        let config: HealthServiceConfig = raw.try_deserialize()?;
        config.validate()?;

        let environment = get_environment();
        info!(
            environment = %environment,
            history_capacity = config.history.capacity,
            snapshot_timeout_ms = config.evaluation.snapshot_timeout_ms,
            bind_address = %config.web.bind_address,
            thresholds = ?config.thresholds,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
        }))
    }
}
