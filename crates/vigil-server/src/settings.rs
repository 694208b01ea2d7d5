//! Server settings.
//!
//! Loaded from built-in defaults, then an optional `vigil.toml`, then
//! `VIGIL_*` environment variables (`__` separates nested keys, e.g.
//! `VIGIL_SERVER__PORT`, `VIGIL_LOG__LEVEL`).

use std::net::SocketAddr;

use axum::http::HeaderName;
use config::{Config, ConfigBuilder, Environment, File, Map, builder::DefaultState};
use serde::Deserialize;
use vigil_core::{LoggerConfig, Sanitizer, SensitiveFieldSet};

use crate::middleware::LoggingConfig;

/// Base name of the optional settings file.
pub const SETTINGS_FILE: &str = "vigil";

const ENV_PREFIX: &str = "VIGIL";
const PRODUCTION: &str = "production";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid header name '{0}'")]
    Header(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: String,
    #[serde(default)]
    pub server: ServerSettings,
    pub log: LogSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub sanitizer: SanitizerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub request_id_header: String,
    pub trace_header: String,
    pub health_path: String,
    pub max_request_body_bytes: usize,
    pub max_response_capture_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let defaults = LoggingConfig::default();
        Self {
            request_id_header: defaults.request_id_header.to_string(),
            trace_header: defaults.trace_header.to_string(),
            health_path: defaults.health_path,
            max_request_body_bytes: defaults.max_request_body_bytes,
            max_response_capture_bytes: defaults.max_response_capture_bytes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SanitizerSettings {
    /// Sensitive substrings added to the built-in set.
    pub extra_fields: Vec<String>,
}

impl Settings {
    /// Loads settings from `vigil.toml` (if present) and the process
    /// environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Some(SETTINGS_FILE), None)
    }

    /// Loads settings from an optional file and an explicit environment.
    ///
    /// `env` replaces the process environment when given, which keeps tests
    /// independent of each other.
    pub fn load_from(
        file: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let probe = with_sources(Config::builder(), file, &env)
            .set_default("environment", "development")?
            .build()?;
        let environment = probe.get_string("environment")?;

        let (level, format) = if environment.eq_ignore_ascii_case(PRODUCTION) {
            ("info", "structured")
        } else {
            ("debug", "text")
        };

        let settings = with_sources(Config::builder(), file, &env)
            .set_default("environment", "development")?
            .set_default("log.level", level)?
            .set_default("log.format", format)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION)
    }

    /// The socket address to listen on.
    pub fn addr(&self) -> Result<SocketAddr, SettingsError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|source| SettingsError::Address { addr, source })
    }

    /// Logger constructor input; unknown values fall back to `info`/text.
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::parse(&self.log.level, &self.log.format)
    }

    /// Sanitizer over the built-in fields plus the configured extras.
    pub fn sanitizer(&self) -> Sanitizer {
        let fields = SensitiveFieldSet::with_extra(&self.sanitizer.extra_fields);
        Sanitizer::new(fields)
    }

    /// Middleware tunables.
    pub fn logging_config(&self) -> Result<LoggingConfig, SettingsError> {
        Ok(LoggingConfig {
            request_id_header: header_name(&self.http.request_id_header)?,
            trace_header: header_name(&self.http.trace_header)?,
            health_path: self.http.health_path.clone(),
            max_request_body_bytes: self.http.max_request_body_bytes,
            max_response_capture_bytes: self.http.max_response_capture_bytes,
        })
    }
}

fn with_sources(
    builder: ConfigBuilder<DefaultState>,
    file: Option<&str>,
    env: &Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    let builder = match file {
        Some(name) => builder.add_source(File::with_name(name).required(false)),
        None => builder,
    };

    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("sanitizer.extra_fields")
            .try_parsing(true)
            .source(env.clone()),
    )
}

fn header_name(raw: &str) -> Result<HeaderName, SettingsError> {
    HeaderName::from_bytes(raw.trim().as_bytes()).map_err(|_| SettingsError::Header(raw.to_string()))
}
