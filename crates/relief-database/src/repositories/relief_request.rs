//! Relief request repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use relief_core::result::AppResult;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_entity::case::CaseStatus;
use relief_entity::relief::{
    CreateReliefRequest, ReliefRequest, ReliefRequestFilter, UpdateReliefRequest,
};

use super::db_err;
use crate::store::ReliefRequestStore;

/// Repository for relief requests.
#[derive(Debug, Clone)]
pub struct ReliefRequestRepository {
    pool: PgPool,
}

impl ReliefRequestRepository {
    /// Create a new relief request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a ReliefRequestFilter) {
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
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(citizen_id) = filter.citizen_id {
        qb.push(" AND citizen_id = ").push_bind(citizen_id);
    }
    if let Some(from) = filter.from {
        qb.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND created_at < ").push_bind(to);
    }
}

#[async_trait]
impl ReliefRequestStore for ReliefRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ReliefRequest>> {
        sqlx::query_as::<_, ReliefRequest>("SELECT * FROM relief_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find relief request"))
    }

    async fn list(
        &self,
        filter: &ReliefRequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReliefRequest>> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM relief_requests");
        push_filter(&mut count_qb, filter);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count relief requests"))?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM relief_requests");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let requests = qb
            .build_query_as::<ReliefRequest>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list relief requests"))?;

        Ok(PageResponse::new(requests, page, total as u64))
    }

    async fn list_all(&self, filter: &ReliefRequestFilter) -> AppResult<Vec<ReliefRequest>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM relief_requests");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC");

        qb.build_query_as::<ReliefRequest>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to export relief requests"))
    }

    async fn create(&self, data: &CreateReliefRequest) -> AppResult<ReliefRequest> {
        sqlx::query_as::<_, ReliefRequest>(
            "INSERT INTO relief_requests (citizen_id, category, description, district, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.citizen_id)
        .bind(data.category)
        .bind(&data.description)
        .bind(&data.district)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to create relief request"))
    }

    async fn update(
        &self,
        id: Uuid,
        data: &UpdateReliefRequest,
    ) -> AppResult<Option<ReliefRequest>> {
        sqlx::query_as::<_, ReliefRequest>(
            "UPDATE relief_requests SET category = COALESCE($2, category), \
                                        description = COALESCE($3, description), \
                                        updated_at = NOW() \
             WHERE id = $1 AND is_active RETURNING *",
        )
        .bind(id)
        .bind(data.category)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update relief request"))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<ReliefRequest>> {
        sqlx::query_as::<_, ReliefRequest>(
            "UPDATE relief_requests \
             SET status = $3, review_note = $4, reviewed_by = $5, updated_at = NOW() \
             WHERE id = $1 AND status = $2 AND is_active RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(note)
        .bind(reviewer)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to review relief request"))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<ReliefRequest>> {
        sqlx::query_as::<_, ReliefRequest>(
            "UPDATE relief_requests SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to deactivate relief request"))
    }
}
