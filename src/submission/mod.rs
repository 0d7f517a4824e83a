//! Submission: formatting the finished form and handing it to an external sink.

pub mod dispatch;
pub mod payload;
pub mod sheet;
pub mod sink;

pub use dispatch::{SpawnDispatcher, SubmissionDispatcher};
pub use payload::{PersonalInfo, SubmissionPayload};
pub use sheet::{SHEET_HEADERS, SheetRow, SinkResponse};
pub use sink::{Delivery, HttpSink, LogSink, SubmissionSink, TransportMode};
