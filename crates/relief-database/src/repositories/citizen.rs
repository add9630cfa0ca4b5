//! Citizen repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use relief_core::error::{AppError, ErrorKind};
use relief_core::result::AppResult;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_entity::case::CaseStatus;
use relief_entity::citizen::{Citizen, CitizenFilter, CreateCitizen, UpdateCitizen};

use super::{contains_pattern, db_err, violated_constraint};
use crate::store::CitizenStore;

/// Repository for citizen records.
#[derive(Debug, Clone)]
pub struct CitizenRepository {
    pool: PgPool,
}

impl CitizenRepository {
    /// Create a new citizen repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a CitizenFilter) {
    qb.push(" WHERE TRUE");
    if !filter.include_inactive {
        qb.push(" AND is_active");
    }
    if let Some(district) = &filter.district {
        qb.push(" AND LOWER(district) = LOWER(")
            .push_bind(district)
            .push(")");
    }
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (nic ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR full_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl CitizenStore for CitizenRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>("SELECT * FROM citizens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find citizen"))
    }

    async fn find_by_nic(&self, nic: &str) -> AppResult<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>("SELECT * FROM citizens WHERE LOWER(nic) = LOWER($1)")
            .bind(nic)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find citizen by NIC"))
    }

    async fn list(
        &self,
        filter: &CitizenFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Citizen>> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM citizens");
        push_filter(&mut count_qb, filter);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count citizens"))?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM citizens");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let citizens = qb
            .build_query_as::<Citizen>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list citizens"))?;

        Ok(PageResponse::new(citizens, page, total as u64))
    }

    async fn list_all(&self, filter: &CitizenFilter) -> AppResult<Vec<Citizen>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM citizens");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC");

        qb.build_query_as::<Citizen>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to export citizens"))
    }

    async fn create(&self, data: &CreateCitizen) -> AppResult<Citizen> {
        sqlx::query_as::<_, Citizen>(
            "INSERT INTO citizens \
                (nic, full_name, address, phone, district, gn_division, household_size, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.nic)
        .bind(&data.full_name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.district)
        .bind(&data.gn_division)
        .bind(data.household_size)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e).as_deref() {
            Some("citizens_nic_key") => {
                AppError::conflict(format!("Citizen with NIC '{}' already exists", data.nic))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create citizen", e),
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateCitizen) -> AppResult<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>(
            "UPDATE citizens SET full_name = COALESCE($2, full_name), \
                                 address = COALESCE($3, address), \
                                 phone = COALESCE($4, phone), \
                                 gn_division = COALESCE($5, gn_division), \
                                 household_size = COALESCE($6, household_size), \
                                 updated_at = NOW() \
             WHERE id = $1 AND is_active RETURNING *",
        )
        .bind(id)
        .bind(&data.full_name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.gn_division)
        .bind(data.household_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update citizen"))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>(
            "UPDATE citizens SET status = $3, review_note = $4, reviewed_by = $5, updated_at = NOW() \
             WHERE id = $1 AND status = $2 AND is_active RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(note)
        .bind(reviewer)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to review citizen"))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>(
            "UPDATE citizens SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to deactivate citizen"))
    }
}
