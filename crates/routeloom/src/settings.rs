//! Runtime settings: fixed defaults with caller overrides laid over them.
//!
//! The overlay is shallow. A key present in [`Overrides`] replaces the
//! default for that key entirely; `spa` is never merged field by field.
//!
//! Overrides are read with the `config` crate from an optional TOML file and
//! from `ROUTELOOM_*` environment variables (`ROUTELOOM_PORT=8080`,
//! `ROUTELOOM_SPA__PATH=/srv/www`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BootstrapError;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "ROUTELOOM";

/// Environment variable that takes precedence over the configured port.
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_SRC: &str = "./src";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SPA_PATH: &str = "/release";
pub const DEFAULT_SPA_INDEX: &str = "index.html";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Single-page-app fallback settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpaSettings {
    /// Directory static assets are served from.
    pub path: PathBuf,

    /// Entry document inside `path`, served for unmatched GET requests.
    #[serde(default)]
    pub index: String,
}

impl Default for SpaSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SPA_PATH),
            index: DEFAULT_SPA_INDEX.into(),
        }
    }
}

/// Effective settings, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Application source root; `config/` and `routes/` are looked up below it.
    pub src: PathBuf,
    pub port: u16,
    /// `None` disables the fallback.
    pub spa: Option<SpaSettings>,
    /// Tracing level used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            src: PathBuf::from(DEFAULT_SRC),
            port: DEFAULT_PORT,
            spa: Some(SpaSettings::default()),
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl Settings {
    /// Overlay `overrides` on the defaults.
    pub fn merge(overrides: Overrides) -> Self {
        let defaults = Self::default();
        Self {
            src: overrides.src.unwrap_or(defaults.src),
            port: overrides.port.unwrap_or(defaults.port),
            spa: match overrides.spa {
                None | Some(SpaOverride::Enabled(true)) => defaults.spa,
                Some(SpaOverride::Enabled(false)) => None,
                Some(SpaOverride::Settings(spa)) => Some(spa),
            },
            log_level: overrides.log_level.unwrap_or(defaults.log_level),
        }
    }

    /// Directory holding the application's config modules.
    pub fn config_dir(&self) -> PathBuf {
        self.src.join("config")
    }

    /// Directory holding the application's route modules.
    pub fn routes_dir(&self) -> PathBuf {
        self.src.join("routes")
    }
}

/// The `spa` key as a caller may spell it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpaOverride {
    /// `spa = false` disables the fallback, `spa = true` keeps the default.
    Enabled(bool),
    /// A table replaces the default wholesale.
    Settings(SpaSettings),
}

/// Caller-supplied partial settings. Absent keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Overrides {
    pub src: Option<PathBuf>,
    pub port: Option<u16>,
    pub spa: Option<SpaOverride>,
    pub log_level: Option<String>,
}

impl Overrides {
    /// Read overrides from `file` (if given and present) and the environment.
    /// Environment values win over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(
                config::File::from(file.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Pick the port to listen on. A non-empty `env_value` wins over `configured`.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidPort`] if `env_value` is not a port number.
pub fn resolve_port(configured: u16, env_value: Option<&str>) -> Result<u16, BootstrapError> {
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| BootstrapError::InvalidPort(value.to_owned())),
        _ => Ok(configured),
    }
}
