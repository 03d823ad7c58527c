//! Good catalog backed by the `goods` table.

use sqlx::{PgPool, Row};

use eshop_core::Good;

use super::RepositoryError;
use crate::services::order::GoodCatalog;

/// Catalog lookup over the `goods` table.
///
/// Selection tokens are catalog identifiers rendered as strings; anything
/// that does not parse to an id, or parses to an unknown id, is not found.
pub struct PgGoodCatalog {
    pool: PgPool,
}

impl PgGoodCatalog {
    /// Create a new catalog over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GoodCatalog for PgGoodCatalog {
    async fn resolve(&self, token: &str) -> Result<Good, RepositoryError> {
        let id: i64 = token
            .trim()
            .parse()
            .map_err(|_| RepositoryError::NotFound)?;

        let row = sqlx::query("SELECT title, price FROM goods WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(Good::new(row.try_get("title")?, row.try_get("price")?))
    }
}
