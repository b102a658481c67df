//! Recipe CRUD.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::{CreateRecipeRequest, RecipeSummaryView, RecipeView, UpdateRecipeRequest};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created_id, ok};
use crate::AppState;

pub async fn list_recipes(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.db.recipes.list(auth.user_id).await?;
    let views: Vec<RecipeSummaryView> = recipes.iter().map(RecipeSummaryView::from).collect();
    Ok(ok(views))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(body): ApiJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.db.recipes.create(auth.user_id, body.validated()?).await?;
    Ok(created_id(id))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.db.recipes.get_detail(auth.user_id, recipe_id).await?;
    Ok(ok(RecipeView::from(&detail)))
}

/// Partial update. Answers with the recipe as it now stands.
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .recipes
        .update(auth.user_id, recipe_id, body.validated()?)
        .await?;
    let detail = state.db.recipes.get_detail(auth.user_id, recipe_id).await?;
    Ok(ok(RecipeView::from(&detail)))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.recipes.delete(auth.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
