use std::sync::Arc;

use axum::{http::HeaderValue, Extension, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    config::Config,
    handlers::{contact::contact_handler, posts::posts_handler, user::users_handler},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = configure_cors(&app_state.config);

    let api_route = Router::new()
        .merge(posts_handler())
        .merge(users_handler())
        .merge(contact_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route).layer(cors)
}

pub fn configure_cors(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match config.cors_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(_)) => {
            warn!("CORS_ORIGIN is not a valid header value, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}
