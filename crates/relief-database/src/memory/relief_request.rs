//! In-memory relief request store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use relief_core::result::AppResult;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_entity::case::CaseStatus;
use relief_entity::relief::{
    CreateReliefRequest, ReliefRequest, ReliefRequestFilter, UpdateReliefRequest,
};

use crate::store::ReliefRequestStore;

/// Relief request store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryReliefRequestStore {
    requests: Arc<RwLock<Vec<ReliefRequest>>>,
}

impl MemoryReliefRequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReliefRequestStore for MemoryReliefRequestStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ReliefRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &ReliefRequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReliefRequest>> {
        let requests = self.requests.read().await;
        let matched: Vec<ReliefRequest> = requests
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matched, page))
    }

    async fn list_all(&self, filter: &ReliefRequestFilter) -> AppResult<Vec<ReliefRequest>> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateReliefRequest) -> AppResult<ReliefRequest> {
        let now = Utc::now();
        let request = ReliefRequest {
            id: Uuid::new_v4(),
            citizen_id: data.citizen_id,
            category: data.category,
            description: data.description.clone(),
            district: data.district.clone(),
            status: CaseStatus::Pending,
            review_note: None,
            reviewed_by: None,
            is_active: true,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.requests.write().await.push(request.clone());
        Ok(request)
    }

    async fn update(
        &self,
        id: Uuid,
        data: &UpdateReliefRequest,
    ) -> AppResult<Option<ReliefRequest>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == id && r.is_active) else {
            return Ok(None);
        };
        if let Some(category) = data.category {
            request.category = category;
        }
        if let Some(description) = &data.description {
            request.description = description.clone();
        }
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<ReliefRequest>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == id && r.is_active && r.status == from)
        else {
            return Ok(None);
        };
        request.status = to;
        request.review_note = note.map(str::to_string);
        request.reviewed_by = Some(reviewer);
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<ReliefRequest>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == id && r.is_active) else {
            return Ok(None);
        };
        request.is_active = false;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_entity::relief::ReliefCategory;

    fn new_request(citizen_id: Uuid, category: ReliefCategory) -> CreateReliefRequest {
        CreateReliefRequest {
            citizen_id,
            category,
            description: "flood damage".to_string(),
            district: "Gampaha".to_string(),
            created_by: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_filter_by_citizen_and_category() {
        let store = MemoryReliefRequestStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.create(&new_request(a, ReliefCategory::Food)).await.unwrap();
        store.create(&new_request(a, ReliefCategory::Shelter)).await.unwrap();
        store.create(&new_request(b, ReliefCategory::Food)).await.unwrap();

        let filter = ReliefRequestFilter {
            citizen_id: Some(a),
            ..Default::default()
        };
        assert_eq!(store.list_all(&filter).await.unwrap().len(), 2);

        let filter = ReliefRequestFilter {
            category: Some(ReliefCategory::Food),
            ..Default::default()
        };
        let page = store.list(&filter, &PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].citizen_id, b);
    }

    #[tokio::test]
    async fn test_rejected_request_cannot_be_approved() {
        let store = MemoryReliefRequestStore::new();
        let r = store
            .create(&new_request(Uuid::new_v4(), ReliefCategory::Cash))
            .await
            .unwrap();
        let reviewer = Uuid::new_v4();

        store
            .transition(r.id, CaseStatus::Pending, CaseStatus::Rejected, Some("no"), reviewer)
            .await
            .unwrap()
            .unwrap();

        let second = store
            .transition(r.id, CaseStatus::Pending, CaseStatus::Approved, None, reviewer)
            .await
            .unwrap();
        assert!(second.is_none());
    }
}
