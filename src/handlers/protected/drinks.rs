use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Deleted, DrinkList};
use crate::services::drink_service;
use crate::state::AppState;

/// Non-integer ids match no drink route.
fn drink_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::RouteNotFound)
}

/// GET /drinks-detail - requires `get:drinks-detail`
pub async fn detail(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> ApiResult<DrinkList> {
    let drinks = drink_service::list_drinks(state.store.as_ref()).await?;

    Ok(ApiResponse::success(DrinkList {
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// POST /drinks - requires `post:drink`
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> ApiResult<DrinkList> {
    tracing::debug!("Create drink requested by {:?}", claims.sub);
    let drink = drink_service::create_drink(state.store.as_ref(), &body).await?;

    Ok(ApiResponse::success(DrinkList {
        drinks: vec![drink.long()],
    }))
}

/// PATCH /drinks/:id - requires `patch:drink`
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> ApiResult<DrinkList> {
    let id = drink_id(path)?;
    tracing::debug!("Update of drink {} requested by {:?}", id, claims.sub);

    let drink = drink_service::update_drink(state.store.as_ref(), id, &body).await?;

    Ok(ApiResponse::success(DrinkList {
        drinks: vec![drink.long()],
    }))
}

/// DELETE /drinks/:id - requires `delete:drink`
pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Deleted> {
    let id = drink_id(path)?;
    tracing::debug!("Delete of drink {} requested by {:?}", id, claims.sub);

    let deleted = drink_service::delete_drink(state.store.as_ref(), id).await?;
    Ok(ApiResponse::success(Deleted { delete: deleted }))
}
