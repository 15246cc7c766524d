//! Unauthenticated endpoints: liveness and browser bootstrap config.

#[cfg(test)]
#[path = "public_test.rs"]
mod tests;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `{supabase_url, supabase_anon_key}` for the browser client, or 503 when
/// the server was started without auth configured.
pub async fn public_config(State(state): State<AppState>) -> Response {
    match state.supabase {
        Some(config) => Json(config.as_ref().clone()).into_response(),
        None => {
            tracing::debug!("public config requested but auth is not configured");
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({ "error": "auth not configured" })))
                .into_response()
        }
    }
}
