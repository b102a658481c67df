//! Route registration.
//!
//! [`ROUTES`] lists every endpoint with its access level; [`router`] wires
//! the same table to handlers. Authenticated handlers take the
//! [`RequireAuth`](crate::auth::RequireAuth) extractor, which rejects the
//! request with 401 before the handler body runs.

use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{json_error_bodies, ApiError};
use crate::handlers::{
    accounts, brands, directions, equipment, health, recipes, tags, times, units,
};
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub method: &'static str,
    pub path: &'static str,
    pub access: Access,
}

const fn public(method: &'static str, path: &'static str) -> RouteSpec {
    RouteSpec {
        method,
        path,
        access: Access::Public,
    }
}

const fn authed(method: &'static str, path: &'static str) -> RouteSpec {
    RouteSpec {
        method,
        path,
        access: Access::Authenticated,
    }
}

pub const ROUTES: &[RouteSpec] = &[
    public("GET", "/health"),
    public("POST", "/api/signup"),
    public("POST", "/api/login"),
    authed("GET", "/api/recipes"),
    authed("POST", "/api/recipes"),
    authed("GET", "/api/recipes/:recipe_id"),
    authed("PATCH", "/api/recipes/:recipe_id"),
    authed("DELETE", "/api/recipes/:recipe_id"),
    authed("GET", "/api/recipes/:recipe_id/equipment"),
    authed("POST", "/api/recipes/:recipe_id/equipment"),
    authed("GET", "/api/recipes/:recipe_id/tags"),
    authed("POST", "/api/recipes/:recipe_id/tags"),
    authed("GET", "/api/recipes/:recipe_id/times"),
    authed("POST", "/api/recipes/:recipe_id/times"),
    authed("GET", "/api/recipes/:recipe_id/directions"),
    authed("POST", "/api/recipes/:recipe_id/directions"),
    authed("GET", "/api/equipment/search"),
    authed("DELETE", "/api/equipment/:id"),
    authed("DELETE", "/api/tags/:id"),
    authed("DELETE", "/api/times/:id"),
    authed("DELETE", "/api/directions/:id"),
    authed("GET", "/api/brands"),
    authed("POST", "/api/brands"),
    authed("GET", "/api/brands/:id"),
    authed("DELETE", "/api/brands/:id"),
    authed("GET", "/api/units"),
    authed("POST", "/api/units"),
    authed("GET", "/api/units/search"),
    authed("DELETE", "/api/units/:id"),
];

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Request span carrying the correlation id. `user_id` is filled in by
/// `RequireAuth` once the token resolves.
fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Build the application router with its middleware stack.
pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Accounts
        .route("/api/signup", post(accounts::signup))
        .route("/api/login", post(accounts::login))
        // Recipes
        .route(
            "/api/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/api/recipes/:recipe_id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        // Recipe components
        .route(
            "/api/recipes/:recipe_id/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/api/recipes/:recipe_id/tags",
            get(tags::list_tags).post(tags::create_tag),
        )
        .route(
            "/api/recipes/:recipe_id/times",
            get(times::list_times).post(times::create_time),
        )
        .route(
            "/api/recipes/:recipe_id/directions",
            get(directions::list_directions).post(directions::create_direction),
        )
        .route("/api/equipment/search", get(equipment::search_equipment))
        .route("/api/equipment/:id", delete(equipment::delete_equipment))
        .route("/api/tags/:id", delete(tags::delete_tag))
        .route("/api/times/:id", delete(times::delete_time))
        .route("/api/directions/:id", delete(directions::delete_direction))
        // Catalog
        .route(
            "/api/brands",
            get(brands::list_brands).post(brands::create_brand),
        )
        .route(
            "/api/brands/:id",
            get(brands::get_brand).delete(brands::delete_brand),
        )
        .route("/api/units", get(units::list_units).post(units::create_unit))
        .route("/api/units/search", get(units::search_units))
        .route("/api/units/:id", delete(units::delete_unit))
        .fallback(unknown_route)
        // Middleware
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&config.allowed_origins))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(middleware::map_response(json_error_bodies))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_table_has_no_duplicates() {
        let mut seen = HashSet::new();
        for route in ROUTES {
            assert!(
                seen.insert((route.method, route.path)),
                "duplicate route {} {}",
                route.method,
                route.path
            );
        }
    }

    #[test]
    fn test_only_accounts_and_health_are_public() {
        let public: Vec<&str> = ROUTES
            .iter()
            .filter(|r| r.access == Access::Public)
            .map(|r| r.path)
            .collect();
        assert_eq!(public, vec!["/health", "/api/signup", "/api/login"]);
    }
}
