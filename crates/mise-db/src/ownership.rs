//! Helpers shared by the PostgreSQL repositories.

use sqlx::{Pool, Postgres};

use mise_core::{Error, Result};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `%term%` with wildcards in `term` matched literally.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Fail with `NotFound` unless `recipe_id` belongs to `user_id`.
pub async fn ensure_recipe_owned(pool: &Pool<Postgres>, user_id: i64, recipe_id: i64) -> Result<()> {
    let owned: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipe WHERE id = $1 AND user_id = $2)")
            .bind(recipe_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(Error::Database)?;

    if owned {
        Ok(())
    } else {
        Err(Error::not_found("Recipe", recipe_id))
    }
}

/// Map a unique-constraint violation to `Error::Conflict`, anything else to
/// `Error::Database`.
pub fn conflict_or_database(err: sqlx::Error, message: impl Into<String>) -> Error {
    let is_unique = err
        .as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false);
    if is_unique {
        Error::Conflict(message.into())
    } else {
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\"), "c:\\\\");
        assert_eq!(escape_like("cup"), "cup");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("cup"), "%cup%");
        assert_eq!(contains_pattern("1/2_"), "%1/2\\_%");
    }

    #[test]
    fn test_non_database_error_is_not_conflict() {
        let err = conflict_or_database(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, Error::Database(_)));
    }
}
