use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredField(Vec<&'static str>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid anti-forgery token")]
    InvalidAntiForgeryToken,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Record not found: {0}")]
    RecordNotFound(i32),

    #[error("Store failure: {0}")]
    StoreFailure(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingRequiredField(_)
            | AppError::MalformedBody(_)
            | AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidAntiForgeryToken => StatusCode::FORBIDDEN,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreFailure(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            AppError::MalformedBody(_) => "MALFORMED_BODY",
            AppError::InvalidAntiForgeryToken => "INVALID_CSRF_TOKEN",
            AppError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            AppError::RecordNotFound(_) => "NOT_FOUND",
            AppError::StoreFailure(_) => "STORE_FAILURE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let body = match &self {
            AppError::MissingRequiredField(fields) => json!({
                "code": code,
                "message": "Required fields are missing",
                "fields": fields,
            }),
            AppError::MalformedBody(msg) => json!({
                "code": code,
                "message": format!("Request body is not a valid curriculo payload: {msg}"),
            }),
            AppError::InvalidAntiForgeryToken => json!({
                "code": code,
                "message": "Invalid anti-forgery token",
            }),
            AppError::InvalidIdentifier(raw) => json!({
                "code": code,
                "message": format!("'{raw}' is not a valid curriculo id"),
            }),
            AppError::RecordNotFound(id) => json!({
                "code": code,
                "message": format!("Curriculo {id} not found"),
            }),
            AppError::StoreFailure(e) => {
                tracing::error!("Store error: {e}");
                json!({
                    "code": code,
                    "message": "A database error occurred",
                    "detail": e.to_string(),
                })
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                json!({
                    "code": code,
                    "message": "An internal server error occurred",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingRequiredField(vec!["nome"]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidIdentifier("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidAntiForgeryToken.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::RecordNotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::StoreFailure(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_from_anyhow() {
        let err: AppError = anyhow::anyhow!("token secret unreadable").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_internal_error_body_hides_cause() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(body["message"].is_string());
        assert!(!bytes.windows(13).any(|w| w == b"secret detail"));
    }

    #[test]
    fn test_missing_fields_display_lists_names() {
        let err = AppError::MissingRequiredField(vec!["nome", "email"]);
        assert_eq!(err.to_string(), "Missing required fields: nome, email");
    }
}
