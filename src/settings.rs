//! Layered runtime configuration: built-in defaults, then an optional TOML
//! file, then `QUAKE__SECTION__KEY` environment variables.

use crate::error::{ProcessingError, Result};
use crate::models::{CandidateTable, Role};
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_DELIMITER, DEFAULT_LOOKUP_ENDPOINT, DEFAULT_LOOKUP_TIMEOUT_SECS,
    SHALLOW_DEPTH_KM, STRONG_MAGNITUDE,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub roles: CandidateTable,
    pub reader: ReaderSettings,
    pub analysis: AnalysisSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReaderSettings {
    #[validate(length(equal = 1))]
    pub delimiter: String,
}

impl ReaderSettings {
    pub fn delimiter(&self) -> Result<char> {
        self.delimiter.chars().next().ok_or_else(|| {
            ProcessingError::InvalidFormat("Empty delimiter".to_string())
        })
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisSettings {
    #[validate(range(min = 0.0, max = 10.0))]
    pub strong_magnitude: f64,

    #[validate(range(min = 0.0))]
    pub shallow_depth_km: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            strong_magnitude: STRONG_MAGNITUDE,
            shallow_depth_km: SHALLOW_DEPTH_KM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LookupSettings {
    #[validate(length(min = 1))]
    pub endpoint: String,

    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering `path` (if any) and the environment over
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: AppConfig = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate_all()?;
        Ok(settings)
    }

    pub fn validate_all(&self) -> Result<()> {
        self.reader.validate()?;
        self.analysis.validate()?;
        self.lookup.validate()?;

        if !self.lookup.endpoint.starts_with("http://")
            && !self.lookup.endpoint.starts_with("https://")
        {
            return Err(ProcessingError::InvalidFormat(format!(
                "Lookup endpoint must be an http(s) URL: '{}'",
                self.lookup.endpoint
            )));
        }

        for role in Role::ALL {
            if self.roles.candidates(role).iter().any(|c| c.is_empty()) {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Empty candidate for role '{}' would match every column",
                    role
                )));
            }
        }

        Ok(())
    }
}
