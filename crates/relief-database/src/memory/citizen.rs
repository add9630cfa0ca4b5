//! In-memory citizen store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use relief_core::error::AppError;
use relief_core::result::AppResult;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_entity::case::CaseStatus;
use relief_entity::citizen::{Citizen, CitizenFilter, CreateCitizen, UpdateCitizen};

use crate::store::CitizenStore;

/// Citizen store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryCitizenStore {
    citizens: Arc<RwLock<Vec<Citizen>>>,
}

impl MemoryCitizenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CitizenStore for MemoryCitizenStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Citizen>> {
        let citizens = self.citizens.read().await;
        Ok(citizens.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_nic(&self, nic: &str) -> AppResult<Option<Citizen>> {
        let citizens = self.citizens.read().await;
        Ok(citizens
            .iter()
            .find(|c| c.nic.eq_ignore_ascii_case(nic))
            .cloned())
    }

    async fn list(
        &self,
        filter: &CitizenFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Citizen>> {
        let citizens = self.citizens.read().await;
        let matched: Vec<Citizen> = citizens
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matched, page))
    }

    async fn list_all(&self, filter: &CitizenFilter) -> AppResult<Vec<Citizen>> {
        let citizens = self.citizens.read().await;
        Ok(citizens
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateCitizen) -> AppResult<Citizen> {
        let mut citizens = self.citizens.write().await;
        if citizens.iter().any(|c| c.nic.eq_ignore_ascii_case(&data.nic)) {
            return Err(AppError::conflict(format!(
                "Citizen with NIC '{}' already exists",
                data.nic
            )));
        }

        let now = Utc::now();
        let citizen = Citizen {
            id: Uuid::new_v4(),
            nic: data.nic.clone(),
            full_name: data.full_name.clone(),
            address: data.address.clone(),
            phone: data.phone.clone(),
            district: data.district.clone(),
            gn_division: data.gn_division.clone(),
            household_size: data.household_size,
            status: CaseStatus::Pending,
            review_note: None,
            reviewed_by: None,
            is_active: true,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        citizens.push(citizen.clone());
        Ok(citizen)
    }

    async fn update(&self, id: Uuid, data: &UpdateCitizen) -> AppResult<Option<Citizen>> {
        let mut citizens = self.citizens.write().await;
        let Some(citizen) = citizens.iter_mut().find(|c| c.id == id && c.is_active) else {
            return Ok(None);
        };
        if let Some(full_name) = &data.full_name {
            citizen.full_name = full_name.clone();
        }
        if let Some(address) = &data.address {
            citizen.address = Some(address.clone());
        }
        if let Some(phone) = &data.phone {
            citizen.phone = Some(phone.clone());
        }
        if let Some(gn_division) = &data.gn_division {
            citizen.gn_division = Some(gn_division.clone());
        }
        if let Some(size) = data.household_size {
            citizen.household_size = size;
        }
        citizen.updated_at = Utc::now();
        Ok(Some(citizen.clone()))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<Citizen>> {
        let mut citizens = self.citizens.write().await;
        let Some(citizen) = citizens
            .iter_mut()
            .find(|c| c.id == id && c.is_active && c.status == from)
        else {
            return Ok(None);
        };
        citizen.status = to;
        citizen.review_note = note.map(str::to_string);
        citizen.reviewed_by = Some(reviewer);
        citizen.updated_at = Utc::now();
        Ok(Some(citizen.clone()))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Citizen>> {
        let mut citizens = self.citizens.write().await;
        let Some(citizen) = citizens.iter_mut().find(|c| c.id == id && c.is_active) else {
            return Ok(None);
        };
        citizen.is_active = false;
        citizen.updated_at = Utc::now();
        Ok(Some(citizen.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_citizen(nic: &str, district: &str) -> CreateCitizen {
        CreateCitizen {
            nic: nic.to_string(),
            full_name: "A. Perera".to_string(),
            address: None,
            phone: None,
            district: district.to_string(),
            gn_division: None,
            household_size: 4,
            created_by: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_nic_unique_case_insensitive() {
        let store = MemoryCitizenStore::new();
        store.create(&new_citizen("199012345678", "Colombo")).await.unwrap();
        store.create(&new_citizen("901234567v", "Colombo")).await.unwrap();

        let err = store
            .create(&new_citizen("901234567V", "Galle"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, relief_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_deactivated_citizen_hidden_and_frozen() {
        let store = MemoryCitizenStore::new();
        let c = store.create(&new_citizen("1", "Colombo")).await.unwrap();

        assert!(store.deactivate(c.id).await.unwrap().is_some());
        assert!(store.deactivate(c.id).await.unwrap().is_none());

        let listed = store
            .list(&CitizenFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(listed.total_items, 0);

        let update = UpdateCitizen {
            household_size: Some(2),
            ..Default::default()
        };
        assert!(store.update(c.id, &update).await.unwrap().is_none());
        assert!(store.find_by_id(c.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_transition_only_from_observed_status() {
        let store = MemoryCitizenStore::new();
        let c = store.create(&new_citizen("1", "Colombo")).await.unwrap();
        let reviewer = Uuid::new_v4();

        let approved = store
            .transition(c.id, CaseStatus::Pending, CaseStatus::Approved, None, reviewer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, CaseStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(reviewer));

        let lost = store
            .transition(
                c.id,
                CaseStatus::Pending,
                CaseStatus::Rejected,
                Some("dup"),
                reviewer,
            )
            .await
            .unwrap();
        assert!(lost.is_none());
    }
}
