use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::{CreateDirectionRequest, DirectionView};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created_id, ok};
use crate::AppState;

pub async fn list_directions(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let directions = state
        .db
        .directions
        .list_for_recipe(auth.user_id, recipe_id)
        .await?;
    let views: Vec<DirectionView> = directions.iter().map(DirectionView::from).collect();
    Ok(ok(views))
}

/// Directions carry free text and may be empty.
pub async fn create_direction(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CreateDirectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .db
        .directions
        .create(auth.user_id, recipe_id, body)
        .await?;
    Ok(created_id(id))
}

pub async fn delete_direction(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.directions.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
