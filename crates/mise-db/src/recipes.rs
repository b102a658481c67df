//! Recipe repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;

use mise_core::{
    CreateRecipeRequest, Error, Recipe, RecipeDetail, RecipeRepository, Result,
    UpdateRecipeRequest,
};

use crate::equipment::equipment_for_recipe;
use crate::tags::tags_for_recipe;
use crate::times::times_for_recipe;

const RECIPE_COLUMNS: &str =
    "id, title, notes, rating, servings, user_id, created_at_utc, updated_at_utc";

/// PostgreSQL implementation of RecipeRepository.
pub struct PgRecipeRepository {
    pool: Pool<Postgres>,
}

impl PgRecipeRepository {
    /// Create a new PgRecipeRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn recipe_from_row(row: PgRow) -> Recipe {
    Recipe {
        id: row.get("id"),
        title: row.get("title"),
        notes: row.get("notes"),
        rating: row.get("rating"),
        servings: row.get("servings"),
        user_id: row.get("user_id"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, user_id: i64, req: CreateRecipeRequest) -> Result<i64> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipe (title, notes, rating, servings, user_id, created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(&req.title)
        .bind(req.notes.unwrap_or_default())
        .bind(req.rating)
        .bind(req.servings)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "recipes",
            op = "create",
            user_id,
            recipe_id = id,
            "Recipe created"
        );
        Ok(id)
    }

    async fn get(&self, user_id: i64, id: i64) -> Result<Recipe> {
        let query = format!(
            "SELECT {} FROM recipe WHERE id = $1 AND user_id = $2",
            RECIPE_COLUMNS
        );
        sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .map(recipe_from_row)
            .ok_or_else(|| Error::not_found("Recipe", id))
    }

    async fn get_detail(&self, user_id: i64, id: i64) -> Result<RecipeDetail> {
        let recipe = self.get(user_id, id).await?;
        let equipment = equipment_for_recipe(&self.pool, id).await?;
        let tags = tags_for_recipe(&self.pool, id).await?;
        let times = times_for_recipe(&self.pool, id).await?;

        Ok(RecipeDetail {
            recipe,
            equipment,
            tags,
            times,
        })
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Recipe>> {
        let query = format!(
            "SELECT {} FROM recipe WHERE user_id = $1 ORDER BY title, id",
            RECIPE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(recipe_from_row).collect())
    }

    async fn update(&self, user_id: i64, id: i64, req: UpdateRecipeRequest) -> Result<()> {
        let now = Utc::now();

        // Build dynamic update query
        let mut updates = vec!["updated_at_utc = $1".to_string()];
        let mut param_count = 2;

        if req.title.is_some() {
            updates.push(format!("title = ${}", param_count));
            param_count += 1;
        }
        if req.notes.is_some() {
            updates.push(format!("notes = ${}", param_count));
            param_count += 1;
        }
        if req.rating.is_some() {
            updates.push(format!("rating = ${}", param_count));
            param_count += 1;
        }
        if req.servings.is_some() {
            updates.push(format!("servings = ${}", param_count));
            param_count += 1;
        }

        let query = format!(
            "UPDATE recipe SET {} WHERE id = ${} AND user_id = ${}",
            updates.join(", "),
            param_count,
            param_count + 1
        );

        let mut q = sqlx::query(&query).bind(now);

        if let Some(title) = &req.title {
            q = q.bind(title);
        }
        if let Some(notes) = &req.notes {
            q = q.bind(notes);
        }
        if let Some(rating) = req.rating {
            q = q.bind(rating);
        }
        if let Some(servings) = req.servings {
            q = q.bind(servings);
        }

        let result = q
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Recipe", id));
        }
        Ok(())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        // Equipment, tags, times, and directions go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM recipe WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Recipe", id));
        }

        debug!(
            subsystem = "database",
            component = "recipes",
            op = "delete",
            user_id,
            recipe_id = id,
            "Recipe deleted"
        );
        Ok(())
    }
}
