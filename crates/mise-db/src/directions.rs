//! Direction repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use mise_core::{CreateDirectionRequest, Direction, DirectionRepository, Error, Result};

use crate::ownership::ensure_recipe_owned;

/// PostgreSQL implementation of DirectionRepository.
pub struct PgDirectionRepository {
    pool: Pool<Postgres>,
}

impl PgDirectionRepository {
    /// Create a new PgDirectionRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn direction_from_row(row: PgRow) -> Direction {
    Direction {
        id: row.get("id"),
        description: row.get("description"),
        recipe_id: row.get("recipe_id"),
    }
}

#[async_trait]
impl DirectionRepository for PgDirectionRepository {
    async fn create(
        &self,
        user_id: i64,
        recipe_id: i64,
        req: CreateDirectionRequest,
    ) -> Result<i64> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO direction (description, recipe_id)
            SELECT $1, r.id FROM recipe r WHERE r.id = $2 AND r.user_id = $3
            RETURNING id
            "#,
        )
        .bind(&req.description)
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        id.ok_or_else(|| Error::not_found("Recipe", recipe_id))
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Direction>> {
        ensure_recipe_owned(&self.pool, user_id, recipe_id).await?;

        let rows = sqlx::query(
            "SELECT id, description, recipe_id FROM direction WHERE recipe_id = $1 ORDER BY id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(direction_from_row).collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM direction d
            USING recipe r
            WHERE d.id = $1 AND d.recipe_id = r.id AND r.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Direction", id));
        }
        Ok(())
    }
}
