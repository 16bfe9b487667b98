use crate::errors::AppError;
use crate::models::curriculo::{CurriculoPayload, NewCurriculo};
use crate::security::{sanitize_plain_text, sanitize_rich_text};

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Checks required fields, then sanitizes every text field.
///
/// - `nome`, `email`, `experienciaProfissional` must be present and non-blank,
///   both before and after sanitization.
/// - `telefone` and `enderecoWeb` default to `""` when absent.
///
/// Never touches the store; on `Err` the caller must stop processing.
pub fn validate_curriculo(payload: CurriculoPayload) -> Result<NewCurriculo, AppError> {
    let missing = missing_fields(&[
        ("nome", is_blank(&payload.nome)),
        ("email", is_blank(&payload.email)),
        (
            "experienciaProfissional",
            is_blank(&payload.experiencia_profissional),
        ),
    ]);
    if !missing.is_empty() {
        return Err(AppError::MissingRequiredField(missing));
    }

    let curriculo = NewCurriculo {
        nome: sanitize_plain_text(payload.nome.as_deref()),
        telefone: sanitize_plain_text(payload.telefone.as_deref()),
        email: sanitize_plain_text(payload.email.as_deref()),
        endereco_web: sanitize_plain_text(payload.endereco_web.as_deref()),
        experiencia_profissional: sanitize_rich_text(payload.experiencia_profissional.as_deref()),
    };

    // Input made only of markup (e.g. a bare <script>) sanitizes to nothing.
    let emptied = missing_fields(&[
        ("nome", curriculo.nome.trim().is_empty()),
        ("email", curriculo.email.trim().is_empty()),
        (
            "experienciaProfissional",
            curriculo.experiencia_profissional.trim().is_empty(),
        ),
    ]);
    if !emptied.is_empty() {
        return Err(AppError::MissingRequiredField(emptied));
    }

    Ok(curriculo)
}

fn missing_fields(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect()
}
