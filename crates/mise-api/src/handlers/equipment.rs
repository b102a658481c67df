//! Equipment attached to recipes, plus description autocomplete.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::defaults::MAX_AUTOCOMPLETE_MATCHES;
use mise_core::{CreateEquipmentRequest, EquipmentView};

use super::SearchParams;
use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{created_id, ok, Matches};
use crate::AppState;

pub async fn list_equipment(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let equipment = state
        .db
        .equipment
        .list_for_recipe(auth.user_id, recipe_id)
        .await?;
    let views: Vec<EquipmentView> = equipment.iter().map(EquipmentView::from).collect();
    Ok(ok(views))
}

pub async fn create_equipment(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .db
        .equipment
        .create(auth.user_id, recipe_id, body.validated()?)
        .await?;
    Ok(created_id(id))
}

pub async fn delete_equipment(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.equipment.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Distinct equipment descriptions across the caller's recipes.
pub async fn search_equipment(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let matches = state
        .db
        .equipment
        .search(auth.user_id, &params.search_term, MAX_AUTOCOMPLETE_MATCHES)
        .await?;
    Ok(ok(Matches { matches }))
}
