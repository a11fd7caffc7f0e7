use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Permission strings checked by the drink routes.
pub mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINK: &str = "post:drink";
    pub const PATCH_DRINK: &str = "patch:drink";
    pub const DELETE_DRINK: &str = "delete:drink";
}

/// `aud` may be a single string or a list, depending on the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    pub fn new(config: &AuthConfig, subject: impl Into<String>, permissions: Vec<String>) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(config.token_expiry_hours as i64)).timestamp();

        Self {
            sub: Some(subject.into()),
            iss: config.issuer.clone(),
            aud: Some(Audience::One(config.audience.clone())),
            exp,
            iat: Some(now.timestamp()),
            permissions,
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Authorization failures. Each variant carries the wire code, description and status.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("{0}")]
    InvalidHeader(&'static str),

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Permission not found.")]
    PermissionDenied(String),

    #[error("Unable to verify authentication token.")]
    NotConfigured,

    #[error("Invalid verification key: {0}")]
    KeyParsing(String),

    #[error("Token signing requires AUTH_JWT_SECRET")]
    SigningUnavailable,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::HeaderMissing => "authorization_header_missing",
            AuthError::InvalidHeader(_) | AuthError::NotConfigured => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::PermissionDenied(_) => "unauthorized",
            AuthError::KeyParsing(_)
            | AuthError::SigningUnavailable
            | AuthError::TokenGeneration(_) => "auth_configuration",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AuthError::KeyParsing(_)
            | AuthError::SigningUnavailable
            | AuthError::TokenGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Verifies bearer tokens against the configured key, audience and issuer.
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let (key, algorithm) = match (&config.jwt_public_key, &config.jwt_secret) {
            (Some(pem), _) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AuthError::KeyParsing(e.to_string()))?;
                (Some(key), Algorithm::RS256)
            }
            (None, Some(secret)) => (Some(DecodingKey::from_secret(secret.as_bytes())), Algorithm::HS256),
            (None, None) => {
                tracing::warn!("No JWT verification key configured; protected routes will reject every request");
                (None, Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway_secs;
        validation.set_audience(&[config.audience.as_str()]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        Ok(Self { key, validation })
    }

    /// Decode and validate signature, expiry, audience and issuer.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self.key.as_ref().ok_or_else(|| {
            tracing::error!("JWT verification key not configured");
            AuthError::NotConfigured
        })?;

        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience
                | ErrorKind::InvalidIssuer
                | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                _ => AuthError::InvalidHeader("Unable to parse authentication token."),
            })
    }
}

/// Require `permission` among the decoded claims.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    if claims.has_permission(permission) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(permission.to_string()))
    }
}

/// Mint an HS256 token. Only meant for development and tests; production
/// tokens come from the identity provider.
pub fn issue_token(
    config: &AuthConfig,
    subject: &str,
    permissions: Vec<String>,
) -> Result<String, AuthError> {
    let secret = config.jwt_secret.as_ref().ok_or(AuthError::SigningUnavailable)?;
    let claims = Claims::new(config, subject, permissions);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}
