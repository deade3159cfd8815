//! `/health` endpoint.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::warn;

use crate::server::AppState;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the store cannot be read.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Number of stored contacts, when known.
    pub contacts: Option<usize>,
}

/// Build a health response from live counters.
pub fn health_check(start_time: Instant, contacts: Option<usize>) -> HealthResponse {
    HealthResponse {
        status: if contacts.is_some() { "ok" } else { "degraded" }.into(),
        uptime_secs: start_time.elapsed().as_secs(),
        contacts,
    }
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let contacts = match state.store.count() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(error = %e, "health check could not count contacts");
            None
        }
    };
    let resp = health_check(state.start_time, contacts);
    let status = if resp.contacts.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(resp))
}
