//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI arguments, `CAREBRIDGE_*` environment variables and
//! an optional configuration file. [`AppSettings::validate`] turns the raw
//! strings into the typed values the server is wired with.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAREBRIDGE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Offset from UTC, in minutes, used for birth dates and ages.
    ///
    /// Defaults to Korea Standard Time, UTC+09:00.
    #[ortho_config(default = 540)]
    pub timezone_offset_minutes: i32,
    /// Base URL of the institution recommendation service.
    pub recommendation_url: Option<String>,
    /// Base URL of the report document service.
    pub report_generator_url: Option<String>,
    /// Timeout applied to every outbound HTTP call.
    #[ortho_config(default = 10)]
    pub http_timeout_secs: u64,
}

/// Settings that failed validation.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("bind_addr `{value}` is not a socket address")]
    BindAddr { value: String },
    #[error("timezone_offset_minutes {minutes} is out of range")]
    TimezoneOffset { minutes: i32 },
    #[error("{key} `{value}` is not a valid URL: {source}")]
    Url {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("http_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validated settings used to wire the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// Calendar used for birth dates and ages.
    pub timezone: FixedOffset,
    /// `None` disables recommendations.
    pub recommendation_url: Option<Url>,
    /// `None` skips document generation after approval.
    pub report_generator_url: Option<Url>,
    pub http_timeout: Duration,
}

fn parse_url(key: &'static str, value: Option<&str>) -> Result<Option<Url>, SettingsError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            Url::parse(raw).map_err(|source| SettingsError::Url {
                key,
                value: raw.to_owned(),
                source,
            })
        })
        .transpose()
}

impl AppSettings {
    /// Validate raw values, applying defaults for anything unset.
    ///
    /// # Errors
    /// Returns [`SettingsError`] for the first value that does not parse.
    pub fn validate(self) -> Result<ServerSettings, SettingsError> {
        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| SettingsError::BindAddr {
                value: raw_addr.to_owned(),
            })?;

        let minutes = self.timezone_offset_minutes;
        let timezone = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(SettingsError::TimezoneOffset { minutes })?;

        let timeout_secs = self.http_timeout_secs;
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        Ok(ServerSettings {
            bind_addr,
            timezone,
            recommendation_url: parse_url(
                "recommendation_url",
                self.recommendation_url.as_deref(),
            )?,
            report_generator_url: parse_url(
                "report_generator_url",
                self.report_generator_url.as_deref(),
            )?,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
