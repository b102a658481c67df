//! Recipe time repository implementation.
//!
//! Rows live in `recipe_time`; `time` is a type name in PostgreSQL.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use mise_core::{CreateTimeRequest, Error, Result, Time, TimeRepository};

use crate::ownership::ensure_recipe_owned;

/// PostgreSQL implementation of TimeRepository.
pub struct PgTimeRepository {
    pool: Pool<Postgres>,
}

impl PgTimeRepository {
    /// Create a new PgTimeRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn time_from_row(row: PgRow) -> Time {
    Time {
        id: row.get("id"),
        category: row.get("category"),
        days: row.get("days"),
        hours: row.get("hours"),
        minutes: row.get("minutes"),
        note: row.get("note"),
        recipe_id: row.get("recipe_id"),
    }
}

/// Load a recipe's times. Ownership must already be established.
pub(crate) async fn times_for_recipe(pool: &Pool<Postgres>, recipe_id: i64) -> Result<Vec<Time>> {
    let rows = sqlx::query(
        r#"
        SELECT id, category, days, hours, minutes, note, recipe_id
        FROM recipe_time
        WHERE recipe_id = $1
        ORDER BY id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)?;

    Ok(rows.into_iter().map(time_from_row).collect())
}

#[async_trait]
impl TimeRepository for PgTimeRepository {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTimeRequest) -> Result<i64> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO recipe_time (category, days, hours, minutes, note, recipe_id)
            SELECT $1, $2, $3, $4, $5, r.id FROM recipe r WHERE r.id = $6 AND r.user_id = $7
            RETURNING id
            "#,
        )
        .bind(&req.category)
        .bind(req.days)
        .bind(req.hours)
        .bind(req.minutes)
        .bind(req.note.unwrap_or_default())
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        id.ok_or_else(|| Error::not_found("Recipe", recipe_id))
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Time>> {
        ensure_recipe_owned(&self.pool, user_id, recipe_id).await?;
        times_for_recipe(&self.pool, recipe_id).await
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM recipe_time t
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
            return Err(Error::not_found("Time", id));
        }
        Ok(())
    }
}
