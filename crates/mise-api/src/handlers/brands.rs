use axum::{extract::State, http::StatusCode, response::IntoResponse};

use mise_core::{CreateNamedRequest, NamedView};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created_id, ok};
use crate::AppState;

pub async fn list_brands(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let brands = state.db.brands.list(auth.user_id).await?;
    let views: Vec<NamedView> = brands.iter().map(NamedView::from).collect();
    Ok(ok(views))
}

pub async fn create_brand(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(body): ApiJson<CreateNamedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.validated()?;
    let brand = state.db.brands.create(auth.user_id, &body.name).await?;
    Ok(created_id(brand.id))
}

pub async fn get_brand(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let brand = state.db.brands.get(auth.user_id, id).await?;
    Ok(ok(NamedView::from(&brand)))
}

pub async fn delete_brand(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.brands.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
