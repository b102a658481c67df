//! Preparation and cooking times.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::{CreateTimeRequest, TimeView};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created_id, ok};
use crate::AppState;

pub async fn list_times(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let times = state.db.times.list_for_recipe(auth.user_id, recipe_id).await?;
    let views: Vec<TimeView> = times.iter().map(TimeView::from).collect();
    Ok(ok(views))
}

pub async fn create_time(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CreateTimeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .db
        .times
        .create(auth.user_id, recipe_id, body.validated()?)
        .await?;
    Ok(created_id(id))
}

pub async fn delete_time(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.times.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
