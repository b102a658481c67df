use axum::response::IntoResponse;
use serde_json::json;

use crate::response::ok;

pub async fn health_check() -> impl IntoResponse {
    ok(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
