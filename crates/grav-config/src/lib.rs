//! # grav-config
//!
//! Layered configuration loading for gravcheck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Prefixed environment variables (`GRAVIBASE_*`, `__` as separator)
//! 2. Raw environment variables `USERNAME`, `PASSWORD`, `PROJECT_CODE`
//! 3. Project-level `gravcheck.toml` (or the file passed with `--config`)
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `GRAVIBASE_URL` -> `url`, `GRAVIBASE_VERIFY__ROLES` -> `verify.roles`, etc.
//! `GRAVIBASE_USERNAME` beats a plain `USERNAME`.
//!
//! `.env` files are loaded in override mode: `USERNAME` is set by the OS on
//! most machines and must not shadow the value from `.env`.
//!
//! # Usage
//!
//! ```no_run
//! use grav_config::GravConfig;
//!
//! let config = GravConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("credentials present");
//! println!("verifying {} at {}", config.project_code, config.url);
//! ```

mod error;
mod verify;

pub use error::ConfigError;
pub use verify::VerifyConfig;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Default Gravibase deployment.
pub const DEFAULT_URL: &str = "https://app.gravibase.ru";

/// Project-local config file name.
pub const CONFIG_FILE: &str = "gravcheck.toml";

/// Environment keys taken verbatim, with or without the `GRAVIBASE_` prefix.
const CREDENTIAL_KEYS: [&str; 3] = ["USERNAME", "PASSWORD", "PROJECT_CODE"];

const ENV_PREFIX: &str = "GRAVIBASE_";

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GravConfig {
    /// Base URL of the Gravibase deployment.
    #[serde(default = "default_url")]
    pub url: String,

    /// Operator login.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Project under verification.
    #[serde(default)]
    pub project_code: String,

    #[serde(default)]
    pub verify: VerifyConfig,
}

impl Default for GravConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: String::new(),
            password: String::new(),
            project_code: String::new(),
            verify: VerifyConfig::default(),
        }
    }
}

impl GravConfig {
    /// Load configuration from `gravcheck.toml` and the environment.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or
    /// extracted.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment(None).extract().map_err(ConfigError::from)
    }

    /// Load `.env` (override mode), then build the figment.
    ///
    /// `config_file` replaces the project-local `gravcheck.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the dotenv file is malformed or extraction fails.
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        load_dotenv(None)?;
        Self::figment(config_file)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = config_file.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment
            .merge(Serialized::defaults(credentials_from_env()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&CREDENTIAL_KEYS).split("__"))
    }

    /// Check that every required value is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming every missing variable,
    /// or [`ConfigError::InvalidValue`] for a malformed URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            ("USERNAME", &self.username),
            ("PASSWORD", &self.password),
            ("PROJECT_CODE", &self.project_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired { names: missing });
        }

        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.url),
            });
        }

        Ok(())
    }
}

/// Credential values exactly as set in the environment.
///
/// `Env` parses values, which turns `PASSWORD=007` into `7`, so these keys
/// bypass it and are merged as plain strings. Prefixed keys win.
fn credentials_from_env() -> BTreeMap<String, String> {
    let raw = Env::raw().only(&CREDENTIAL_KEYS);
    let prefixed = Env::prefixed(ENV_PREFIX).only(&CREDENTIAL_KEYS);
    raw.iter()
        .chain(prefixed.iter())
        .map(|(key, value)| (key.as_str().to_string(), value))
        .collect()
}

/// Load a `.env` file in override mode.
///
/// With `path`, that file must exist. Without it, `.env` is searched from the
/// current directory upwards and a missing file is not an error.
///
/// # Errors
///
/// Returns [`ConfigError::Dotenv`] if the file cannot be read or parsed.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        dotenvy::from_path_override(path)?;
        return Ok(Some(path.to_path_buf()));
    }

    match dotenvy::dotenv_override() {
        Ok(found) => Ok(Some(found)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(error.into()),
    }
}
