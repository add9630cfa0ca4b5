//! Branch repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use relief_core::error::{AppError, ErrorKind};
use relief_core::result::AppResult;
use relief_entity::branch::{Branch, BranchStatus, CreateBranch, UpdateBranch};

use super::{db_err, violated_constraint};
use crate::store::BranchStore;

/// Repository for branch offices.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    /// Create a new branch repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn name_conflict(name: &str) -> AppError {
    AppError::conflict(format!("Branch '{name}' already exists"))
}

#[async_trait]
impl BranchStore for BranchRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find branch"))
    }

    async fn list(&self, district: Option<&str>, include_inactive: bool) -> AppResult<Vec<Branch>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM branches WHERE TRUE");
        if !include_inactive {
            qb.push(" AND status = ").push_bind(BranchStatus::Active);
        }
        if let Some(district) = district {
            qb.push(" AND LOWER(district) = LOWER(")
                .push_bind(district)
                .push(")");
        }
        qb.push(" ORDER BY name ASC");

        qb.build_query_as::<Branch>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list branches"))
    }

    async fn create(&self, data: &CreateBranch) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>(
            "INSERT INTO branches (name, district, address, phone) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.district)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e).as_deref() {
            Some("branches_name_key") => name_conflict(&data.name),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create branch", e),
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateBranch) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>(
            "UPDATE branches SET name = COALESCE($2, name), \
                                 district = COALESCE($3, district), \
                                 address = COALESCE($4, address), \
                                 phone = COALESCE($5, phone), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.district)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e).as_deref() {
            Some("branches_name_key") => name_conflict(data.name.as_deref().unwrap_or_default()),
            _ => AppError::with_source(ErrorKind::Database, "Failed to update branch", e),
        })
    }

    async fn set_status(&self, id: Uuid, status: BranchStatus) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>(
            "UPDATE branches SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update branch status"))
    }
}
