//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use mise_core::{CreateTagRequest, Error, Result, Tag, TagRepository};

use crate::ownership::ensure_recipe_owned;

/// PostgreSQL implementation of TagRepository.
pub struct PgTagRepository {
    pool: Pool<Postgres>,
}

impl PgTagRepository {
    /// Create a new PgTagRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn tag_from_row(row: PgRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        recipe_id: row.get("recipe_id"),
    }
}

/// Load a recipe's tags. Ownership must already be established.
pub(crate) async fn tags_for_recipe(pool: &Pool<Postgres>, recipe_id: i64) -> Result<Vec<Tag>> {
    let rows = sqlx::query("SELECT id, name, recipe_id FROM tag WHERE recipe_id = $1 ORDER BY id")
        .bind(recipe_id)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;

    Ok(rows.into_iter().map(tag_from_row).collect())
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTagRequest) -> Result<i64> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO tag (name, recipe_id)
            SELECT $1, r.id FROM recipe r WHERE r.id = $2 AND r.user_id = $3
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        id.ok_or_else(|| Error::not_found("Recipe", recipe_id))
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Tag>> {
        ensure_recipe_owned(&self.pool, user_id, recipe_id).await?;
        tags_for_recipe(&self.pool, recipe_id).await
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM tag t
            USING recipe r
            WHERE t.id = $1 AND t.recipe_id = r.id AND r.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Tag", id));
        }
        Ok(())
    }
}
