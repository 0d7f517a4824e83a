//! Configuration types.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::submission::{HttpSink, LogSink, SubmissionSink, TransportMode};

/// Marker left in unconfigured deployment templates.
const URL_PLACEHOLDER: &str = "YOUR_WEB_APP_URL";

/// Where finished applications are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// Endpoint URL. `None` means submissions are only logged.
    pub endpoint: Option<String>,
    pub mode: TransportMode,
    pub timeout: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            mode: TransportMode::Opaque,
            timeout: Duration::from_secs(10),
        }
    }
}

impl SubmissionConfig {
    /// Build the sink this configuration describes.
    pub fn sink(&self) -> Arc<dyn SubmissionSink> {
        match &self.endpoint {
            Some(endpoint) => Arc::new(HttpSink::new(endpoint.clone(), self.mode, self.timeout)),
            None => Arc::new(LogSink),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub submission: SubmissionConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            submission: SubmissionConfig::default(),
        }
    }
}

impl FormConfig {
    /// Load from `FORM_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "FORM_BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let port = parse_var(&lookup, "FORM_PORT")?.unwrap_or(defaults.port);

        let endpoint = lookup("FORM_SUBMISSION_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !s.contains(URL_PLACEHOLDER));

        let mode = parse_var(&lookup, "FORM_SUBMISSION_MODE")?
            .unwrap_or(defaults.submission.mode);

        let timeout = parse_var::<u64, _>(&lookup, "FORM_SUBMISSION_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.submission.timeout);

        Ok(Self {
            bind_addr,
            port,
            submission: SubmissionConfig {
                endpoint,
                mode,
                timeout,
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}
