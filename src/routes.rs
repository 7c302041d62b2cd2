//! REST endpoints for the waitlist funnel.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dashboard::{ReportedCopy, copy_referral_link, twitter_share_url};
use crate::error::{FunnelError, SessionError};
use crate::funnel::{View, ViewRouter};
use crate::sessions::SessionStore;

/// Shared state for funnel routes.
#[derive(Clone)]
pub struct FunnelRouteState {
    pub sessions: Arc<SessionStore>,
    /// Head count shown under the landing form.
    pub waitlist_size: u32,
}

/// Build the funnel REST routes.
pub fn funnel_routes(state: FunnelRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/email", put(set_email))
        .route("/api/sessions/{id}/twitter", post(follow_twitter))
        .route("/api/sessions/{id}/discord", post(join_discord))
        .route("/api/sessions/{id}/complete", post(complete))
        .route("/api/sessions/{id}/back", post(back))
        .route("/api/sessions/{id}/share", post(share))
        .route("/api/sessions/{id}/copy", post(copy_link))
        .with_state(state)
}

// ── Rendering ───────────────────────────────────────────────────────────

/// JSON body describing the active view of a session.
fn render_view(id: Uuid, router: &ViewRouter, waitlist_size: u32) -> Value {
    match router.view() {
        View::Landing(state) => json!({
            "session_id": id,
            "view": "landing",
            "landing": {
                "email": state.email(),
                "email_error": state.email_error(),
                "twitter_followed": state.twitter_followed(),
                "discord_joined": state.discord_joined(),
                "phase": state.phase(),
                "ready": state.is_ready(),
                "waitlist_size": waitlist_size,
            },
        }),
        View::Dashboard(snapshot) => json!({
            "session_id": id,
            "view": "dashboard",
            "dashboard": snapshot,
        }),
    }
}

fn error_body(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

fn session_error_response(err: SessionError) -> Response {
    let status = match err {
        SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
        SessionError::InvalidId(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(error_body(err))).into_response()
}

fn funnel_status(err: &FunnelError) -> StatusCode {
    match err {
        FunnelError::InvalidEmailFormat => StatusCode::UNPROCESSABLE_ENTITY,
        FunnelError::NotReady | FunnelError::AlreadySubmitted | FunnelError::WrongView { .. } => {
            StatusCode::CONFLICT
        }
        FunnelError::ClipboardWriteFailure { .. } => StatusCode::OK,
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| session_error_response(SessionError::InvalidId(raw.to_string())))
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "waitlist-funnel"
    }))
}

// ── Sessions ────────────────────────────────────────────────────────────

async fn create_session(State(state): State<FunnelRouteState>) -> Response {
    let id = state.sessions.create().await;
    let size = state.waitlist_size;
    match state
        .sessions
        .with_session(id, |router| render_view(id, router, size))
        .await
    {
        Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Err(e) => session_error_response(e),
    }
}

async fn get_session(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let size = state.waitlist_size;
    match state
        .sessions
        .with_session(id, |router| render_view(id, router, size))
        .await
    {
        Ok(body) => Json(body).into_response(),
        Err(e) => session_error_response(e),
    }
}

async fn delete_session(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if state.sessions.remove(id).await {
        Json(json!({"status": "deleted"})).into_response()
    } else {
        session_error_response(SessionError::NotFound { id })
    }
}

// ── Landing actions ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EmailRequest {
    email: String,
}

/// Runs an action against a session and renders the resulting view.
///
/// Funnel errors still carry the current view so the client can show the
/// inline email error.
async fn session_action<F>(state: &FunnelRouteState, raw_id: &str, action: F) -> Response
where
    F: FnOnce(&mut ViewRouter) -> Result<Value, FunnelError>,
{
    let id = match parse_id(raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let size = state.waitlist_size;
    let outcome = state
        .sessions
        .with_session(id, |router| {
            let result = action(router);
            (result, render_view(id, router, size))
        })
        .await;

    match outcome {
        Ok((Ok(extra), mut view)) => {
            if let (Some(body), Some(extra)) = (view.as_object_mut(), extra.as_object()) {
                body.extend(extra.clone());
            }
            Json(view).into_response()
        }
        Ok((Err(e), view)) => {
            info!(session_id = %id, error = %e, "Funnel action refused");
            let mut body = error_body(&e);
            body["view"] = view;
            (funnel_status(&e), Json(body)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

async fn set_email(
    State(state): State<FunnelRouteState>,
    Path(id): Path<String>,
    Json(body): Json<EmailRequest>,
) -> Response {
    session_action(&state, &id, move |router| {
        router.set_email(body.email)?;
        Ok(json!({}))
    })
    .await
}

async fn follow_twitter(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    session_action(&state, &id, |router| {
        let url = router.follow_twitter()?;
        Ok(json!({ "open_url": url }))
    })
    .await
}

async fn join_discord(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    session_action(&state, &id, |router| {
        let url = router.join_discord()?;
        Ok(json!({ "open_url": url }))
    })
    .await
}

async fn complete(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    session_action(&state, &id, |router| {
        router.submit()?;
        Ok(json!({}))
    })
    .await
}

async fn back(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    session_action(&state, &id, |router| {
        router.back()?;
        Ok(json!({}))
    })
    .await
}

// ── Dashboard actions ───────────────────────────────────────────────────

async fn share(State(state): State<FunnelRouteState>, Path(id): Path<String>) -> Response {
    session_action(&state, &id, |router| {
        let link = &router.dashboard("share")?.referral_link;
        Ok(json!({ "share_url": twitter_share_url(link) }))
    })
    .await
}

/// The browser performs the clipboard write and reports how it went; the
/// response is the notification to show.
async fn copy_link(
    State(state): State<FunnelRouteState>,
    Path(id): Path<String>,
    Json(report): Json<ReportedCopy>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let link = match state
        .sessions
        .with_session(id, |router| {
            router.dashboard("copy").map(|snapshot| snapshot.referral_link.clone())
        })
        .await
    {
        Ok(Ok(link)) => link,
        Ok(Err(e)) => return (funnel_status(&e), Json(error_body(&e))).into_response(),
        Err(e) => return session_error_response(e),
    };

    let notification = copy_referral_link(&report, &link).await;
    if !report.written {
        warn!(session_id = %id, "Client could not copy referral link");
    }
    Json(json!({ "notification": notification, "referral_link": link })).into_response()
}
