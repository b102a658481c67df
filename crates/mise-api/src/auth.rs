//! Bearer-token authentication.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::Span;

use mise_core::credentials::hash_token;
use mise_core::logging::USER_ID;

use crate::error::ApiError;
use crate::AppState;

/// Extractor that requires a valid bearer token.
///
/// Resolves `Authorization: Bearer <token>` to its owner and records the
/// owner's id on the request span. Handlers that take this extractor never
/// run for anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth {
    pub user_id: i64,
}

/// Token from `Authorization: Bearer <token>`. The scheme is matched
/// case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let user = state
            .db
            .users
            .resolve_token(&hash_token(token))
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

        Span::current().record(USER_ID, user.id);
        Ok(RequireAuth { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/recipes");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer mise_abc"))), Some("mise_abc"));
        assert_eq!(bearer_token(&parts(Some("bearer mise_abc"))), Some("mise_abc"));
        assert_eq!(bearer_token(&parts(Some("BEARER mise_abc"))), Some("mise_abc"));
        assert_eq!(bearer_token(&parts(Some("Bearer"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearerx mise_abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}
