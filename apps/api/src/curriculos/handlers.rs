use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::curriculos::validation::validate_curriculo;
use crate::errors::AppError;
use crate::models::curriculo::{CurriculoPayload, CurriculoRow};
use crate::security::sanitize_rich_text;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// GET /csrf-token
pub async fn handle_csrf_token(State(state): State<AppState>) -> Json<CsrfTokenResponse> {
    Json(CsrfTokenResponse {
        csrf_token: state.csrf.issue_token(),
    })
}

/// POST /curriculos
///
/// guard → validate/sanitize → insert. Nothing reaches the store unless the
/// earlier steps pass. The token is read from the untyped body so a field of
/// the wrong type cannot get past the guard as a 400.
pub async fn handle_create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CurriculoRow>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected curriculo body: {rejection}");
        AppError::MalformedBody(rejection.body_text())
    })?;

    if state.config.csrf_enabled {
        let token = body.get("_csrf").and_then(Value::as_str);
        if !state.csrf.verify_token(token) {
            warn!("Rejected curriculo submission: invalid anti-forgery token");
            return Err(AppError::InvalidAntiForgeryToken);
        }
    }

    let payload: CurriculoPayload = serde_json::from_value(body).map_err(|e| {
        warn!("Rejected curriculo body: {e}");
        AppError::MalformedBody(e.to_string())
    })?;

    let curriculo = validate_curriculo(payload).inspect_err(|e| warn!("{e}"))?;
    let created = state.store.insert(&curriculo).await?;

    info!(id = created.id, "Curriculo created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /curriculos
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<CurriculoRow>>, AppError> {
    let rows = state.store.fetch_all().await?;
    Ok(Json(rows))
}

/// GET /curriculos/:id
///
/// Rich text is sanitized again on the way out. Write-time sanitization is the
/// primary control; this only covers rows stored before it existed.
pub async fn handle_get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CurriculoRow>, AppError> {
    let id = parse_id(&raw_id)?;

    let mut row = state
        .store
        .fetch_by_id(id)
        .await?
        .ok_or(AppError::RecordNotFound(id))?;

    row.experiencia_profissional = sanitize_rich_text(row.experiencia_profissional.as_str());
    Ok(Json(row))
}

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}
