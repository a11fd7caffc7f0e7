use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, DrinkList};
use crate::services::drink_service;
use crate::state::AppState;

/// GET /drinks - public menu with summarized recipes
///
/// An empty menu answers 404 rather than an empty list; clients depend on it.
pub async fn list(State(state): State<AppState>) -> ApiResult<DrinkList> {
    let drinks = drink_service::list_drinks(state.store.as_ref()).await?;

    Ok(ApiResponse::success(DrinkList {
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}
