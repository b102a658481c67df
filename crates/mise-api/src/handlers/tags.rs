use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::{CreateTagRequest, TagView};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created_id, ok};
use crate::AppState;

pub async fn list_tags(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list_for_recipe(auth.user_id, recipe_id).await?;
    let views: Vec<TagView> = tags.iter().map(TagView::from).collect();
    Ok(ok(views))
}

pub async fn create_tag(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CreateTagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .db
        .tags
        .create(auth.user_id, recipe_id, body.validated()?)
        .await?;
    Ok(created_id(id))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.tags.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
