//! Client configuration.
//!
//! Every value has a default; `from_env` overrides them from `SMARTCLASS_*`
//! variables. `from_lookup` takes the variable source as a closure so tests
//! do not touch the process environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/400x200/37ADA5/FFFFFF?text=New+Class";

/// How a delete request is carried out on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// `DELETE /api/<resource>/{id}`.
    #[default]
    Hard,
    /// `PUT /api/<resource>/{id}` flipping the record's soft-delete flag.
    Soft,
}

impl FromStr for DeletePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(DeletePolicy::Hard),
            "soft" => Ok(DeletePolicy::Soft),
            _ => Err(ConfigError::Invalid {
                key: "SMARTCLASS_DELETE_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub delete_policy: DeletePolicy,
    /// Directory for the persisted session. `None` selects the platform data
    /// directory.
    pub storage_dir: Option<PathBuf>,
    /// Image URL given to classes created without one.
    pub placeholder_image: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delete_policy: DeletePolicy::default(),
            storage_dir: None,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SMARTCLASS_API_URL") {
            config.api_url = url;
        }
        if let Some(raw) = lookup("SMARTCLASS_TIMEOUT_SECS") {
            let invalid = || ConfigError::Invalid {
                key: "SMARTCLASS_TIMEOUT_SECS",
                value: raw.clone(),
            };
            let secs: u64 = raw.trim().parse().map_err(|_| invalid())?;
            if secs == 0 {
                return Err(invalid());
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("SMARTCLASS_DELETE_POLICY") {
            config.delete_policy = raw.parse()?;
        }
        if let Some(dir) = lookup("SMARTCLASS_STORAGE_DIR") {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(image) = lookup("SMARTCLASS_PLACEHOLDER_IMAGE") {
            config.placeholder_image = image;
        }

        Ok(config)
    }
}
