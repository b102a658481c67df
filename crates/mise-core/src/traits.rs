//! Repository traits for mise.
//!
//! Every operation takes the caller's `user_id` and resolves ownership before
//! touching a record. A record that exists but belongs to someone else is
//! reported exactly like a record that does not exist: `Error::NotFound`.
//!
//! Implementations live in `mise-db` (PostgreSQL and in-memory).

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for users and their bearer tokens.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user and its first token in one atomic step.
    ///
    /// Returns `Error::Conflict` if the username is taken.
    async fn create(&self, username: &str, password_hash: &str, token_hash: &str) -> Result<User>;

    /// Fetch a user by ID.
    async fn get(&self, id: i64) -> Result<Option<User>>;

    /// Fetch a user by username.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Store an additional token for a user.
    async fn issue_token(&self, user_id: i64, token_hash: &str) -> Result<()>;

    /// Resolve a token digest to its owner.
    async fn resolve_token(&self, token_hash: &str) -> Result<Option<User>>;

    /// Delete a user and everything it owns.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// BRAND AND UNIT REPOSITORIES
// =============================================================================

#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Create a brand. Returns `Error::Conflict` on a duplicate name.
    async fn create(&self, user_id: i64, name: &str) -> Result<Brand>;

    /// List the caller's brands ordered by name.
    async fn list(&self, user_id: i64) -> Result<Vec<Brand>>;

    async fn get(&self, user_id: i64, id: i64) -> Result<Brand>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Create a unit. Returns `Error::Conflict` on a duplicate name.
    async fn create(&self, user_id: i64, name: &str) -> Result<Unit>;

    /// List the caller's units ordered by name.
    async fn list(&self, user_id: i64) -> Result<Vec<Unit>>;

    /// Case-insensitive substring search on unit names.
    ///
    /// An empty term yields an empty list without querying the store.
    /// Results are ordered by ascending name length (ties by name, then id)
    /// and truncated to `limit`.
    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<Unit>>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

// =============================================================================
// RECIPE REPOSITORY
// =============================================================================

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a new recipe and return its ID.
    async fn create(&self, user_id: i64, req: CreateRecipeRequest) -> Result<i64>;

    /// Fetch a recipe owned by the caller.
    async fn get(&self, user_id: i64, id: i64) -> Result<Recipe>;

    /// Fetch a recipe with its equipment, tags, and times.
    async fn get_detail(&self, user_id: i64, id: i64) -> Result<RecipeDetail>;

    /// List the caller's recipes ordered by title.
    async fn list(&self, user_id: i64) -> Result<Vec<Recipe>>;

    /// Apply a partial update.
    async fn update(&self, user_id: i64, id: i64, req: UpdateRecipeRequest) -> Result<()>;

    /// Delete a recipe together with its equipment, tags, times, and directions.
    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

// =============================================================================
// RECIPE COMPONENT REPOSITORIES
// =============================================================================

/// Equipment belongs to a recipe; ownership resolves through that recipe.
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateEquipmentRequest)
        -> Result<i64>;

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Equipment>>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;

    /// Distinct equipment descriptions matching `term`, across all of the
    /// caller's recipes. Same ordering and empty-term rules as unit search.
    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<String>>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTagRequest) -> Result<i64>;

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Tag>>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

#[async_trait]
pub trait TimeRepository: Send + Sync {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTimeRequest) -> Result<i64>;

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Time>>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

#[async_trait]
pub trait DirectionRepository: Send + Sync {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateDirectionRequest)
        -> Result<i64>;

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Direction>>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}
