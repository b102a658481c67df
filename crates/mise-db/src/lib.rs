//! # mise-db
//!
//! Storage layer for the mise recipe service.
//!
//! This crate provides:
//! - Connection pool management
//! - PostgreSQL repository implementations for every entity
//! - An in-memory backend implementing the same repository traits
//!
//! All repositories are scoped to the authenticated user. A row that belongs
//! to someone else is reported as `Error::NotFound`, the same as a row that
//! does not exist.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mise_db::{CreateRecipeRequest, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/mise").await?;
//!     db.migrate().await?;
//!
//!     let id = db.recipes.create(user_id, CreateRecipeRequest {
//!         title: "Focaccia".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("Created recipe: {}", id);
//!     Ok(())
//! }
//! ```
pub mod brands;
pub mod directions;
pub mod equipment;
pub mod memory;
pub mod ownership;
pub mod pool;
pub mod recipes;
pub mod tags;
pub mod times;
pub mod units;
pub mod users;

// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

use std::sync::Arc;

use sqlx::PgPool;

// Re-export core types
pub use mise_core::*;

pub use brands::PgBrandRepository;
pub use directions::PgDirectionRepository;
pub use equipment::PgEquipmentRepository;
pub use memory::MemoryStore;
pub use ownership::{contains_pattern, escape_like};
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use recipes::PgRecipeRepository;
pub use tags::PgTagRepository;
pub use times::PgTimeRepository;
pub use units::PgUnitRepository;
pub use users::PgUserRepository;

/// Handle to every repository, backed by either PostgreSQL or memory.
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub units: Arc<dyn UnitRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub equipment: Arc<dyn EquipmentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub times: Arc<dyn TimeRepository>,
    pub directions: Arc<dyn DirectionRepository>,
    pool: Option<PgPool>,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            brands: Arc::new(PgBrandRepository::new(pool.clone())),
            units: Arc::new(PgUnitRepository::new(pool.clone())),
            recipes: Arc::new(PgRecipeRepository::new(pool.clone())),
            equipment: Arc::new(PgEquipmentRepository::new(pool.clone())),
            tags: Arc::new(PgTagRepository::new(pool.clone())),
            times: Arc::new(PgTimeRepository::new(pool.clone())),
            directions: Arc::new(PgDirectionRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Database backed by a fresh [`MemoryStore`]. Nothing is persisted.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            brands: Arc::new(store.clone()),
            units: Arc::new(store.clone()),
            recipes: Arc::new(store.clone()),
            equipment: Arc::new(store.clone()),
            tags: Arc::new(store.clone()),
            times: Arc::new(store.clone()),
            directions: Arc::new(store),
            pool: None,
        }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations. No-op for the in-memory backend.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        if let Some(pool) = &self.pool {
            sqlx::migrate!("../../migrations")
                .run(pool)
                .await
                .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        }
        Ok(())
    }

    /// The PostgreSQL pool, if this database is not in-memory.
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}

#[cfg(test)]
mod tests;
