//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::directory::http;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Directory API configuration.
    #[serde(default)]
    pub directory: Directory,

    /// Local storage configuration.
    #[serde(default)]
    pub storage: Storage,

    /// Session configuration.
    #[serde(default)]
    pub session: Session,

    /// Theme configuration.
    #[serde(default)]
    pub theme: Theme,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Returns the [`service::Config`] part of this [`Config`].
    #[must_use]
    pub fn service(&self) -> service::Config {
        service::Config {
            session_lifetime: self.session.lifetime,
            prefers_dark: self.theme.prefers_dark,
        }
    }
}

/// Directory API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Directory {
    /// Base URL of the directory API.
    #[default("http://localhost:5000/api".to_owned())]
    pub url: String,

    /// Timeout of a single request to the directory API.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Directory> for http::Config {
    fn from(value: Directory) -> Self {
        let Directory { url, timeout } = value;
        Self {
            base_url: url,
            timeout,
        }
    }
}

/// Local storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory to keep the session and preferences in.
    #[default(PathBuf::from(".study-partners"))]
    pub path: PathBuf,
}

/// Session configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Time a new session lasts for.
    #[default(time::Duration::from_secs(30 * 24 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub lifetime: time::Duration,
}

/// Theme configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Whether the dark theme is used until another one is chosen.
    pub prefers_dark: bool,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
