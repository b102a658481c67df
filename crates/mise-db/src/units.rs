//! Unit repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;

use mise_core::{Error, Result, Unit, UnitRepository};

use crate::ownership::{conflict_or_database, contains_pattern};

/// PostgreSQL implementation of UnitRepository.
pub struct PgUnitRepository {
    pool: Pool<Postgres>,
}

impl PgUnitRepository {
    /// Create a new PgUnitRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn unit_from_row(row: PgRow) -> Unit {
    Unit {
        id: row.get("id"),
        name: row.get("name"),
        user_id: row.get("user_id"),
    }
}

#[async_trait]
impl UnitRepository for PgUnitRepository {
    async fn create(&self, user_id: i64, name: &str) -> Result<Unit> {
        let row = sqlx::query(
            "INSERT INTO unit (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, format!("Unit '{}' already exists", name)))?;

        Ok(unit_from_row(row))
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Unit>> {
        let rows =
            sqlx::query("SELECT id, name, user_id FROM unit WHERE user_id = $1 ORDER BY name, id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(rows.into_iter().map(unit_from_row).collect())
    }

    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<Unit>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT id, name, user_id
            FROM unit
            WHERE user_id = $1 AND name ILIKE $2 ESCAPE '\'
            ORDER BY char_length(name) ASC, lower(name) COLLATE "C" ASC, name COLLATE "C" ASC, id ASC
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
            component = "units",
            op = "search",
            user_id,
            result_count = rows.len(),
            "Unit search complete"
        );
        Ok(rows.into_iter().map(unit_from_row).collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM unit WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Unit", id));
        }
        Ok(())
    }
}
