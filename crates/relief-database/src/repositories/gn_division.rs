//! GN division lookups.

use async_trait::async_trait;
use sqlx::PgPool;

use relief_core::result::AppResult;
use relief_entity::geo::GnDivision;

use super::db_err;
use crate::store::GnDivisionStore;

/// Read-only repository over the seeded `gn_divisions` table.
#[derive(Debug, Clone)]
pub struct GnDivisionRepository {
    pool: PgPool,
}

impl GnDivisionRepository {
    /// Create a new GN division repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GnDivisionStore for GnDivisionRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<GnDivision>> {
        sqlx::query_as::<_, GnDivision>(
            "SELECT code, name, ds_division, district FROM gn_divisions \
             WHERE UPPER(code) = UPPER($1)",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to look up GN division"))
    }

    async fn list_by_district(&self, district: &str) -> AppResult<Vec<GnDivision>> {
        sqlx::query_as::<_, GnDivision>(
            "SELECT code, name, ds_division, district FROM gn_divisions \
             WHERE LOWER(district) = LOWER($1) ORDER BY name ASC",
        )
        .bind(district)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list GN divisions"))
    }
}
