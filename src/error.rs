// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::services::drink_service::DrinkError;

/// Every failure leaves the service through this type as
/// `{ success: false, error: <code>, message: <string> }`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    RequestBody,
    BadRequest,

    // 401 / 403, with the authorization scheme's own code
    Auth(AuthError),

    // 404 Not Found
    DrinkNotFound,
    RouteNotFound,

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 422 Unprocessable Entity
    Unprocessable,

    // 500 Internal Server Error
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RequestBody | ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => err.status(),
            ApiError::DrinkNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` field: a named code for body and auth failures, the numeric status otherwise.
    pub fn error_code(&self) -> Value {
        match self {
            ApiError::RequestBody => json!("Request body error"),
            ApiError::Auth(err) => json!(err.code()),
            other => json!(other.status_code().as_u16()),
        }
    }

    /// Client-safe message
    pub fn message(&self) -> String {
        match self {
            ApiError::RequestBody => "Request body was empty or valid keys are missing".to_string(),
            ApiError::BadRequest => "Bad request".to_string(),
            ApiError::Auth(err) => err.to_string(),
            ApiError::DrinkNotFound => "The drink(s) could not be found".to_string(),
            ApiError::RouteNotFound => "not found".to_string(),
            ApiError::MethodNotAllowed => "method not allowed".to_string(),
            ApiError::Unprocessable => "unprocessable".to_string(),
            ApiError::Internal => "internal server error".to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.error_code(),
            "message": self.message(),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::KeyParsing(_) | AuthError::SigningUnavailable | AuthError::TokenGeneration(_) => {
                tracing::error!("Authorization misconfigured: {}", err);
                ApiError::Internal
            }
            other => ApiError::Auth(other),
        }
    }
}

impl From<DrinkError> for ApiError {
    fn from(err: DrinkError) -> Self {
        match err {
            DrinkError::InvalidBody => ApiError::RequestBody,
            DrinkError::MalformedJson(msg) => {
                tracing::debug!("Rejected malformed JSON body: {}", msg);
                ApiError::BadRequest
            }
            DrinkError::NotFound => ApiError::DrinkNotFound,
            DrinkError::Unprocessable(cause) => {
                // Root cause stays in the logs only
                tracing::warn!("Unprocessable drink request: {}", cause);
                ApiError::Unprocessable
            }
            DrinkError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::DrinkNotFound,
            other => {
                tracing::error!("Drink store error: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
