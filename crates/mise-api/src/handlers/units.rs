//! Measurement units and unit-name autocomplete.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::debug;

use mise_core::defaults::MAX_AUTOCOMPLETE_MATCHES;
use mise_core::{CreateNamedRequest, NamedView};

use super::SearchParams;
use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{created_id, ok, Matches};
use crate::AppState;

pub async fn list_units(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let units = state.db.units.list(auth.user_id).await?;
    let views: Vec<NamedView> = units.iter().map(NamedView::from).collect();
    Ok(ok(views))
}

pub async fn create_unit(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(body): ApiJson<CreateNamedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.validated()?;
    let unit = state.db.units.create(auth.user_id, &body.name).await?;
    Ok(created_id(unit.id))
}

pub async fn delete_unit(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.units.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unit names containing `search_term`, shortest first, at most
/// `MAX_AUTOCOMPLETE_MATCHES`. A missing or empty term matches nothing.
pub async fn search_units(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let units = state
        .db
        .units
        .search(auth.user_id, &params.search_term, MAX_AUTOCOMPLETE_MATCHES)
        .await?;
    debug!(
        user_id = auth.user_id,
        result_count = units.len(),
        "Unit search"
    );
    let matches = units.into_iter().map(|u| u.name).collect();
    Ok(ok(Matches { matches }))
}
