pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::curriculos::handlers;
use crate::security::headers::with_security_headers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let security_headers = state.config.security_headers;

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/csrf-token", get(handlers::handle_csrf_token))
        .route(
            "/curriculos",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route("/curriculos/:id", get(handlers::handle_get))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if security_headers {
        with_security_headers(router)
    } else {
        router
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
