pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::permissions;
use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::require_permission;
use crate::state::AppState;

/// Build the full router. Protected methods carry their own permission gate,
/// so `/drinks` serves GET publicly while POST is gated.
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let gate = |permission: &'static str| from_fn_with_state(state.gate(permission), require_permission);

    let router = Router::new()
        .route("/health", get(public::health_get))
        .route(
            "/drinks",
            get(public::drinks_list)
                .merge(post(protected::drinks_create).route_layer(gate(permissions::POST_DRINK)))
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/drinks-detail",
            get(protected::drinks_detail)
                .route_layer(gate(permissions::GET_DRINKS_DETAIL))
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/drinks/:id",
            patch(protected::drinks_update)
                .route_layer(gate(permissions::PATCH_DRINK))
                .merge(delete(protected::drinks_delete).route_layer(gate(permissions::DELETE_DRINK)))
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .with_state(state);

    let router = if security.enable_cors {
        router.layer(cors_layer(security))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
