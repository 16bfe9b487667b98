use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub anti_forgery: &'static str,
    pub security_headers: bool,
}

/// GET /health
/// Service identity plus which write-path guards this process runs with.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        service: env!("CARGO_PKG_NAME"),
        anti_forgery: if state.config.csrf_enabled {
            "enforced"
        } else {
            "disabled"
        },
        security_headers: state.config.security_headers,
    })
}
