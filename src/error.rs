//! Error types for the application form.

use std::time::Duration;

/// Top-level error type for the form service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Sequencing error: {0}")]
    Sequencing(#[from] SequencingError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A step's uncommitted input failed its presence check.
///
/// The `Display` text is shown to the applicant as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Single-choice step with zero or several selections.
    #[error("Lütfen bir seçenek seçin.")]
    SelectOne { selected: usize },

    /// Multi-choice (or the choice part of a mixed step) with nothing selected.
    #[error("Lütfen en az bir seçenek seçin.")]
    SelectAtLeastOne,

    /// Free text left blank or whitespace-only.
    #[error("Lütfen bu alanı doldurun.")]
    EmptyText,

    /// One or more declared fields left blank.
    #[error("Lütfen tüm alanları doldurun.")]
    IncompleteFields { missing: Vec<String> },
}

/// Broken invariant in the active step sequence or answer store.
///
/// These indicate a bug, never user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencingError {
    #[error("Answer stored for inactive step {step:?}")]
    StaleAnswer { step: String },

    #[error("Cursor {cursor} out of range for {len} active steps")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("Logical title {title:?} is active more than once")]
    DuplicateStep { title: String },

    #[error("Insertion region [{start}, {end}) exceeds {len} active steps")]
    RegionOutOfRange { start: usize, end: usize, len: usize },
}

/// Delivery of the final payload failed. Never fatal to the wizard.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Submission endpoint not configured")]
    NotConfigured,

    #[error("Transport error sending to {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Endpoint {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Endpoint {endpoint} rejected submission with status {status}")]
    Rejected { endpoint: String, status: u16 },

    #[error("Backend reported failure: {reason}")]
    Backend { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the form service.
pub type Result<T> = std::result::Result<T, Error>;
