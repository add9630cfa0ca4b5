//! In-memory branch store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use relief_core::error::AppError;
use relief_core::result::AppResult;
use relief_entity::branch::{Branch, BranchStatus, CreateBranch, UpdateBranch};

use crate::store::BranchStore;

/// Branch store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryBranchStore {
    branches: Arc<RwLock<Vec<Branch>>>,
}

impl MemoryBranchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(branches: &[Branch], name: &str, except: Option<Uuid>) -> bool {
    branches
        .iter()
        .any(|b| Some(b.id) != except && b.name.eq_ignore_ascii_case(name))
}

#[async_trait]
impl BranchStore for MemoryBranchStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        let branches = self.branches.read().await;
        Ok(branches.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, district: Option<&str>, include_inactive: bool) -> AppResult<Vec<Branch>> {
        let branches = self.branches.read().await;
        let mut matched: Vec<Branch> = branches
            .iter()
            .filter(|b| include_inactive || b.status == BranchStatus::Active)
            .filter(|b| district.is_none_or(|d| b.district.eq_ignore_ascii_case(d)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }

    async fn create(&self, data: &CreateBranch) -> AppResult<Branch> {
        let mut branches = self.branches.write().await;
        if name_taken(&branches, &data.name, None) {
            return Err(AppError::conflict(format!(
                "Branch '{}' already exists",
                data.name
            )));
        }

        let now = Utc::now();
        let branch = Branch {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            district: data.district.clone(),
            address: data.address.clone(),
            phone: data.phone.clone(),
            status: BranchStatus::Active,
            created_at: now,
            updated_at: now,
        };
        branches.push(branch.clone());
        Ok(branch)
    }

    async fn update(&self, id: Uuid, data: &UpdateBranch) -> AppResult<Option<Branch>> {
        let mut branches = self.branches.write().await;
        if let Some(name) = data.name.as_deref() {
            if name_taken(&branches, name, Some(id)) {
                return Err(AppError::conflict(format!("Branch '{name}' already exists")));
            }
        }

        let Some(branch) = branches.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            branch.name = name.clone();
        }
        if let Some(district) = &data.district {
            branch.district = district.clone();
        }
        if let Some(address) = &data.address {
            branch.address = Some(address.clone());
        }
        if let Some(phone) = &data.phone {
            branch.phone = Some(phone.clone());
        }
        branch.updated_at = Utc::now();
        Ok(Some(branch.clone()))
    }

    async fn set_status(&self, id: Uuid, status: BranchStatus) -> AppResult<Option<Branch>> {
        let mut branches = self.branches.write().await;
        let Some(branch) = branches.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        branch.status = status;
        branch.updated_at = Utc::now();
        Ok(Some(branch.clone()))
    }
}
