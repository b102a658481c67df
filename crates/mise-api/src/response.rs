//! Success envelopes.
//!
//! Every successful body is `{"data": ...}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// Body of a 201 response.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

/// Body of an autocomplete response.
#[derive(Debug, Serialize)]
pub struct Matches {
    pub matches: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenIssued {
    pub token: String,
}

pub fn ok<T: Serialize>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::CREATED, ok(data))
}

pub fn created_id(id: i64) -> (StatusCode, Json<Data<Created>>) {
    created(Created { id })
}
