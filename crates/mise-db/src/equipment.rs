//! Equipment repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;

use mise_core::{CreateEquipmentRequest, Equipment, EquipmentRepository, Error, Result};

use crate::ownership::{contains_pattern, ensure_recipe_owned};

/// PostgreSQL implementation of EquipmentRepository.
pub struct PgEquipmentRepository {
    pool: Pool<Postgres>,
}

impl PgEquipmentRepository {
    /// Create a new PgEquipmentRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn equipment_from_row(row: PgRow) -> Equipment {
    Equipment {
        id: row.get("id"),
        description: row.get("description"),
        recipe_id: row.get("recipe_id"),
    }
}

/// Load a recipe's equipment. Ownership must already be established.
pub(crate) async fn equipment_for_recipe(
    pool: &Pool<Postgres>,
    recipe_id: i64,
) -> Result<Vec<Equipment>> {
    let rows = sqlx::query(
        "SELECT id, description, recipe_id FROM equipment WHERE recipe_id = $1 ORDER BY id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)?;

    Ok(rows.into_iter().map(equipment_from_row).collect())
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn create(
        &self,
        user_id: i64,
        recipe_id: i64,
        req: CreateEquipmentRequest,
    ) -> Result<i64> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO equipment (description, recipe_id)
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

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Equipment>> {
        ensure_recipe_owned(&self.pool, user_id, recipe_id).await?;
        equipment_for_recipe(&self.pool, recipe_id).await
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM equipment e
            USING recipe r
            WHERE e.id = $1 AND e.recipe_id = r.id AND r.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Equipment", id));
        }
        Ok(())
    }

    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<String>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let matches: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT e.description
            FROM equipment e
            JOIN recipe r ON r.id = e.recipe_id
            WHERE r.user_id = $1 AND e.description ILIKE $2 ESCAPE '\'
            GROUP BY e.description
            ORDER BY char_length(e.description) ASC, lower(e.description) COLLATE "C" ASC,
                     e.description COLLATE "C" ASC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(contains_pattern(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "equipment",
            op = "search",
            user_id,
            result_count = matches.len(),
            "Equipment search complete"
        );
        Ok(matches)
    }
}
