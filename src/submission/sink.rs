//! Submission sinks: deliver the payload to an external system.
//!
//! Delivery is best effort: no retries, and the outcome is only ever logged.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::payload::SubmissionPayload;
use super::sheet::{SheetRow, SinkResponse};
use crate::error::SubmissionError;

/// How much of the endpoint's reply is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Fire the request and never look at the reply (Apps Script web apps).
    #[default]
    Opaque,
    /// A non-2xx status is a rejection.
    Strict,
    /// The reply body is a [`SinkResponse`] and `success` decides.
    Backend,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opaque => write!(f, "opaque"),
            Self::Strict => write!(f, "strict"),
            Self::Backend => write!(f, "backend"),
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opaque" => Ok(Self::Opaque),
            "strict" => Ok(Self::Strict),
            "backend" => Ok(Self::Backend),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

/// Successful hand-off to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The request went out; whether it was stored is unknowable.
    Unconfirmed,
    /// The endpoint acknowledged the submission.
    Confirmed { message: Option<String> },
}

/// Something that accepts a finished application.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<Delivery, SubmissionError>;
}

/// Posts the payload as JSON to an HTTP endpoint.
pub struct HttpSink {
    endpoint: String,
    mode: TransportMode,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, mode: TransportMode, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            mode,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmissionError {
        if e.is_timeout() {
            SubmissionError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout: self.timeout,
            }
        } else {
            SubmissionError::Transport {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl SubmissionSink for HttpSink {
    fn name(&self) -> &str {
        "http"
    }

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<Delivery, SubmissionError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        match self.mode {
            TransportMode::Opaque => {
                debug!(status = %status, "Opaque submission sent; reply ignored");
                Ok(Delivery::Unconfirmed)
            }
            TransportMode::Strict => {
                if status.is_success() {
                    Ok(Delivery::Confirmed { message: None })
                } else {
                    Err(SubmissionError::Rejected {
                        endpoint: self.endpoint.clone(),
                        status: status.as_u16(),
                    })
                }
            }
            TransportMode::Backend => {
                let body = resp.text().await.map_err(|e| self.transport_error(e))?;
                let reply: SinkResponse = serde_json::from_str(&body)?;
                if reply.success {
                    Ok(Delivery::Confirmed {
                        message: reply.message,
                    })
                } else {
                    Err(SubmissionError::Backend {
                        reason: reply
                            .error
                            .unwrap_or_else(|| "no error message".to_string()),
                    })
                }
            }
        }
    }
}

/// Stand-in used when no endpoint is configured: logs the payload for manual
/// entry and reports [`SubmissionError::NotConfigured`].
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<Delivery, SubmissionError> {
        let json = serde_json::to_string(payload)?;
        warn!("Submission endpoint not configured; set FORM_SUBMISSION_URL");
        info!(payload = %json, "Form data (for manual entry)");
        for (header, cell) in SheetRow::from_payload(payload).labelled() {
            info!(column = header, value = cell, "Sheet row");
        }
        Err(SubmissionError::NotConfigured)
    }
}
