use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted résumé. Column names are snake_case, JSON keys camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurriculoRow {
    pub id: i32,
    pub nome: String,
    pub telefone: String,
    pub email: String,
    pub endereco_web: String,
    pub experiencia_profissional: String,
}

/// Raw submission body for `POST /curriculos`, before validation.
///
/// Every field is optional here so that a missing field surfaces as
/// `MissingRequiredField` instead of a JSON rejection. The `_csrf` token is
/// read by the handler before this type is built, and ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculoPayload {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco_web: Option<String>,
    pub experiencia_profissional: Option<String>,
}

/// Validated, sanitized fields ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurriculo {
    pub nome: String,
    pub telefone: String,
    pub email: String,
    pub endereco_web: String,
    pub experiencia_profissional: String,
}
