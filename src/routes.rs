//! REST endpoints driving a single form session.
//!
//! Each handler takes the session write lock for the whole event, so
//! transitions are applied one at a time.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::form::StepInput;
use crate::navigator::{Navigator, WizardEvent};
use crate::submission::{SpawnDispatcher, SubmissionDispatcher};

/// Shared state for the form routes.
#[derive(Clone)]
pub struct FormRouteState {
    pub session: Arc<RwLock<Navigator>>,
    pub catalog: Catalog,
    pub dispatcher: Arc<dyn SubmissionDispatcher>,
}

impl FormRouteState {
    pub fn new(catalog: Catalog, dispatcher: Arc<dyn SubmissionDispatcher>) -> Self {
        let navigator = Navigator::new(catalog.clone(), Arc::clone(&dispatcher));
        Self {
            session: Arc::new(RwLock::new(navigator)),
            catalog,
            dispatcher,
        }
    }
}

/// Build the form REST routes.
pub fn form_routes(state: FormRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/form", get(current_view))
        .route("/api/form/start", post(start))
        .route("/api/form/next", post(next))
        .route("/api/form/back", post(back))
        .route("/api/form/reset", post(reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the form on `listener` until `shutdown` resolves, then wait for
/// submissions still in flight.
pub async fn serve<F>(
    listener: TcpListener,
    catalog: Catalog,
    dispatcher: Arc<SpawnDispatcher>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = FormRouteState::new(catalog, dispatcher.clone());
    axum::serve(listener, form_routes(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    let outcomes = dispatcher.drain().await;
    if !outcomes.is_empty() {
        info!(delivered = outcomes.len(), "In-flight submissions finished");
    }
    Ok(())
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "application-form"
    }))
}

// ── Wizard ──────────────────────────────────────────────────────────────

/// GET /api/form
async fn current_view(State(state): State<FormRouteState>) -> impl IntoResponse {
    let nav = state.session.read().await;
    Json(nav.view())
}

/// POST /api/form/start
async fn start(State(state): State<FormRouteState>) -> impl IntoResponse {
    apply(&state, WizardEvent::Start).await
}

/// POST /api/form/next
///
/// 422 with the validation message and the unchanged view when the input
/// does not satisfy the current step.
async fn next(
    State(state): State<FormRouteState>,
    Json(input): Json<StepInput>,
) -> impl IntoResponse {
    apply(&state, WizardEvent::Next(input)).await
}

/// POST /api/form/back
async fn back(State(state): State<FormRouteState>) -> impl IntoResponse {
    apply(&state, WizardEvent::Back).await
}

/// POST /api/form/reset
///
/// Discards the session and starts over at the welcome screen.
async fn reset(State(state): State<FormRouteState>) -> impl IntoResponse {
    let mut nav = state.session.write().await;
    *nav = Navigator::new(state.catalog.clone(), Arc::clone(&state.dispatcher));
    info!(session_id = %nav.session_id(), "Form session reset");
    Json(nav.view())
}

async fn apply(state: &FormRouteState, event: WizardEvent) -> axum::response::Response {
    let mut nav = state.session.write().await;
    match nav.handle(event) {
        Ok(view) => Json(view).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": e.to_string(),
                "view": nav.view(),
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::submission::SubmissionPayload;

    struct Discard;

    impl SubmissionDispatcher for Discard {
        fn dispatch(&self, _session_id: Uuid, _payload: SubmissionPayload) {}
    }

    fn app() -> (Router, FormRouteState) {
        let state = FormRouteState::new(Catalog::reference(), Arc::new(Discard));
        (form_routes(state.clone()), state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = app();
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn fresh_session_shows_welcome() {
        let (app, _) = app();
        let (status, body) = send(app, "GET", "/api/form", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["screen"], "welcome");
    }

    #[tokio::test]
    async fn start_then_back_returns_to_welcome() {
        let (app, _) = app();
        let (_, body) = send(app.clone(), "POST", "/api/form/start", None).await;
        assert_eq!(body["screen"], "step");
        assert_eq!(body["position"], 0);
        assert_eq!(body["show_back"], false);

        let (_, body) = send(app, "POST", "/api/form/back", None).await;
        assert_eq!(body["screen"], "welcome");
    }

    #[tokio::test]
    async fn invalid_next_is_unprocessable_and_keeps_position() {
        let (app, state) = app();
        send(app.clone(), "POST", "/api/form/start", None).await;
        for _ in 0..3 {
            send(app.clone(), "POST", "/api/form/next", Some(serde_json::json!({}))).await;
        }

        let (status, body) = send(
            app,
            "POST",
            "/api/form/next",
            Some(serde_json::json!({ "fields": { "fullname": "Ayşe" } })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Lütfen tüm alanları doldurun.");
        assert_eq!(body["view"]["position"], 3);
        assert_eq!(
            state.session.read().await.phase(),
            crate::form::WizardPhase::Step(3)
        );
    }

    #[tokio::test]
    async fn reset_starts_a_new_session() {
        let (app, state) = app();
        let before = state.session.read().await.session_id();
        send(app.clone(), "POST", "/api/form/start", None).await;

        let (status, body) = send(app, "POST", "/api/form/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["screen"], "welcome");
        assert_ne!(state.session.read().await.session_id(), before);
    }
}
