//! # mise-core
//!
//! Core types, traits, and abstractions for the mise recipe backend.
//!
//! This crate provides the entity definitions, the ownership-scoped
//! repository traits, and the allow-listed views that other mise crates
//! depend on.

pub mod credentials;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod views;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use views::*;
