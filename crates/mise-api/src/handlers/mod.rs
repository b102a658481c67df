//! HTTP handlers, one module per resource.

pub mod accounts;
pub mod brands;
pub mod directions;
pub mod equipment;
pub mod health;
pub mod recipes;
pub mod tags;
pub mod times;
pub mod units;

use serde::Deserialize;

/// `?search_term=` for autocomplete endpoints. Missing means empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search_term: String,
}
