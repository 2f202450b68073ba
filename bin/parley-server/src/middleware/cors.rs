//! CORS layer construction.

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the CORS layer: a restrictive origin list when
/// `PARLEY_CORS_ORIGINS` is set, wildcard otherwise.
pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    let Some(origins_str) = &state.config.cors_allowed_origins else {
        // Wildcard suits development; set PARLEY_CORS_ORIGINS in production.
        return wildcard();
    };

    let origins: Vec<axum::http::HeaderValue> = origins_str
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        wildcard()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_headers(Any)
            .allow_methods(Any)
    }
}

fn wildcard() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}
