//! [`Config`]-related definitions.

use std::{fmt, str::FromStr, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::{Deserialize, Deserializer};
use service::domain::{contract::RentalType, payment};
use smart_default::SmartDefault;

/// Dashboard configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST backend configuration.
    pub backend: Backend,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
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
}

/// REST backend configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Base URL of the REST backend.
    #[default("http://localhost:8000".to_owned())]
    pub url: String,

    /// Timeout of a single request to the REST backend.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl TryFrom<Backend> for service::infra::http::Config {
    type Error = url::ParseError;

    fn try_from(value: Backend) -> Result<Self, Self::Error> {
        let Backend { url, timeout } = value;
        Ok(Self {
            url: url.parse()?,
            timeout,
        })
    }
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Rental type to bill new contracts by, unless specified explicitly.
    #[default(RentalType::Daily)]
    #[serde(deserialize_with = "parsed")]
    pub default_rental_type: RentalType,

    /// Note attached to the payments settling the remaining balance.
    #[default(payment::Note::top_up())]
    #[serde(deserialize_with = "parsed")]
    pub top_up_note: payment::Note,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            default_rental_type,
            top_up_note,
        } = value;
        Self {
            default_rental_type,
            top_up_note,
        }
    }
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

/// Deserializes a `T` from its string representation.
fn parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    String::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}
