// handlers/mod.rs - two security tiers
//
// Public (no token) → Protected (bearer token with a per-route permission).
// The permission gate itself lives in middleware::auth and is attached per
// method route in the router, so handlers here only see already-authorized
// requests.
pub mod protected;
pub mod public;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::RouteNotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
