//! Brand repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use mise_core::{Brand, BrandRepository, Error, Result};

use crate::ownership::conflict_or_database;

/// PostgreSQL implementation of BrandRepository.
pub struct PgBrandRepository {
    pool: Pool<Postgres>,
}

impl PgBrandRepository {
    /// Create a new PgBrandRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn brand_from_row(row: PgRow) -> Brand {
    Brand {
        id: row.get("id"),
        name: row.get("name"),
        user_id: row.get("user_id"),
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, user_id: i64, name: &str) -> Result<Brand> {
        let row = sqlx::query(
            "INSERT INTO brand (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, format!("Brand '{}' already exists", name)))?;

        Ok(brand_from_row(row))
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Brand>> {
        let rows =
            sqlx::query("SELECT id, name, user_id FROM brand WHERE user_id = $1 ORDER BY name, id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(rows.into_iter().map(brand_from_row).collect())
    }

    async fn get(&self, user_id: i64, id: i64) -> Result<Brand> {
        sqlx::query("SELECT id, name, user_id FROM brand WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .map(brand_from_row)
            .ok_or_else(|| Error::not_found("Brand", id))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM brand WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Brand", id));
        }
        Ok(())
    }
}
