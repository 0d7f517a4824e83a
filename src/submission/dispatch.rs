//! Fire-and-forget hand-off of the finished payload.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinSet;
use tracing::{error, info};
use uuid::Uuid;

use super::payload::SubmissionPayload;
use super::sink::{Delivery, SubmissionSink};
use crate::error::SubmissionError;

/// Receives the payload exactly once when a session completes.
///
/// Implementations must return immediately; the wizard never waits on, or
/// learns about, the delivery outcome.
pub trait SubmissionDispatcher: Send + Sync {
    fn dispatch(&self, session_id: Uuid, payload: SubmissionPayload);
}

/// Delivers each payload on its own tokio task and logs the outcome.
///
/// Tasks are tracked so shutdown can wait for in-flight deliveries with
/// [`SpawnDispatcher::drain`].
pub struct SpawnDispatcher {
    sink: Arc<dyn SubmissionSink>,
    in_flight: Mutex<JoinSet<Result<Delivery, SubmissionError>>>,
}

impl SpawnDispatcher {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            sink,
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    /// Number of deliveries not yet reaped.
    pub fn pending(&self) -> usize {
        self.tasks().len()
    }

    /// Wait for every in-flight delivery and return their outcomes.
    pub async fn drain(&self) -> Vec<Result<Delivery, SubmissionError>> {
        let mut tasks = std::mem::take(&mut *self.tasks());
        if !tasks.is_empty() {
            info!(pending = tasks.len(), "Waiting for in-flight submissions");
        }
        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!(error = %e, "Submission task failed"),
            }
        }
        outcomes
    }

    fn tasks(&self) -> MutexGuard<'_, JoinSet<Result<Delivery, SubmissionError>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SubmissionDispatcher for SpawnDispatcher {
    /// Must be called inside a tokio runtime.
    fn dispatch(&self, session_id: Uuid, payload: SubmissionPayload) {
        let sink = Arc::clone(&self.sink);
        let mut tasks = self.tasks();
        // Reap finished deliveries so the set only holds live ones.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(deliver(sink, session_id, payload));
    }
}

async fn deliver(
    sink: Arc<dyn SubmissionSink>,
    session_id: Uuid,
    payload: SubmissionPayload,
) -> Result<Delivery, SubmissionError> {
    let outcome = sink.deliver(&payload).await;
    match &outcome {
        Ok(Delivery::Unconfirmed) => {
            info!(session_id = %session_id, sink = sink.name(), "Form data submitted (unconfirmed)");
        }
        Ok(Delivery::Confirmed { message }) => {
            info!(
                session_id = %session_id,
                sink = sink.name(),
                message = message.as_deref().unwrap_or(""),
                "Form data submitted"
            );
        }
        Err(SubmissionError::NotConfigured) => {}
        Err(e) => {
            let json = serde_json::to_string(&payload).unwrap_or_default();
            error!(
                session_id = %session_id,
                sink = sink.name(),
                error = %e,
                payload = %json,
                "Error submitting form; payload kept for manual entry"
            );
        }
    }
    outcome
}
