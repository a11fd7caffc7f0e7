use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::database::DrinkView;

/// Wrapper for API responses: the payload's fields sit next to `success: true`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response (200)
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = match serde_json::to_value(&self.data) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                let mut fields = serde_json::Map::new();
                fields.insert("data".to_string(), other);
                fields
            }
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": 500,
                        "message": "internal server error"
                    })),
                )
                    .into_response();
            }
        };

        envelope.insert("success".to_string(), Value::Bool(true));
        (StatusCode::OK, Json(Value::Object(envelope))).into_response()
    }
}

/// `{ "drinks": [...] }`
#[derive(Debug, Serialize)]
pub struct DrinkList {
    pub drinks: Vec<DrinkView>,
}

/// `{ "delete": <id> }`
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub delete: i32,
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn flattens_payload_next_to_success() {
        let response = ApiResponse::success(Deleted { delete: 3 }).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, json!({"success": true, "delete": 3}));
    }

    #[tokio::test]
    async fn drink_list_envelope() {
        let list = DrinkList {
            drinks: vec![DrinkView {
                id: 1,
                title: "Water".to_string(),
                recipe: json!("none"),
            }],
        };
        let body = body_of(ApiResponse::success(list).into_response()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["drinks"][0]["title"], "Water");
    }
}
