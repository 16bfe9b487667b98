use std::sync::Arc;

use crate::config::Config;
use crate::curriculos::store::CurriculoStore;
use crate::security::CsrfGuard;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Production: `PgCurriculoStore`.
    pub store: Arc<dyn CurriculoStore>,
    /// Issues and verifies anti-forgery tokens against the shared secret.
    pub csrf: CsrfGuard,
    pub config: Config,
}
