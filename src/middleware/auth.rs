use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{check_permission, AuthError, TokenVerifier};
use crate::error::ApiError;

/// State of a single permission check: which verifier to use and what to require.
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self { verifier, permission }
    }
}

/// Validates the bearer token, requires the gate's permission and injects the
/// decoded [`crate::auth::Claims`] into the request extensions.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(request.headers())?;
        gate.verifier.verify(token).map_err(|e| {
            tracing::warn!("Rejected token for '{}': {}", gate.permission, e);
            e
        })?
    };

    check_permission(&claims, gate.permission).map_err(|e| {
        tracing::warn!(
            "Subject {:?} lacks permission '{}'",
            claims.sub.as_deref().unwrap_or("unknown"),
            gate.permission
        );
        e
    })?;

    tracing::debug!(
        "Authorized {:?} for '{}'",
        claims.sub.as_deref().unwrap_or("unknown"),
        gate.permission
    );

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::HeaderMissing)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Authorization header must be bearer token."))?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(*token),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::InvalidHeader(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::InvalidHeader("Token not found.")),
        _ => Err(AuthError::InvalidHeader("Authorization header must be bearer token.")),
    }
}
