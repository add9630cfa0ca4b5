//! Storage traits implemented by the PostgreSQL repositories and the
//! in-memory stores.
//!
//! Conditional updates take the status the caller observed (`from`) and
//! return `None` when the row is missing or its status moved on, so two
//! reviewers racing on the same record cannot both win.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use relief_core::result::AppResult;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_entity::branch::{Branch, BranchStatus, CreateBranch, UpdateBranch};
use relief_entity::case::CaseStatus;
use relief_entity::citizen::{Citizen, CitizenFilter, CreateCitizen, UpdateCitizen};
use relief_entity::geo::GnDivision;
use relief_entity::relief::{
    CreateReliefRequest, ReliefRequest, ReliefRequestFilter, UpdateReliefRequest,
};
use relief_entity::user::{CreateUser, UpdateUser, User, UserFilter, UserRole, UserStatus};

/// User persistence.
#[async_trait]
pub trait UserStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users matching the filter, newest first.
    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AppResult<PageResponse<User>>;

    /// Insert a user. Duplicate username or email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Update profile fields.
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Move a user from `from` to `to`, optionally assigning a district.
    async fn update_status(
        &self,
        id: Uuid,
        from: UserStatus,
        to: UserStatus,
        district: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// Change a user's role.
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>>;

    /// Replace the password hash. Returns `false` if the user does not exist.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

/// Citizen record persistence.
#[async_trait]
pub trait CitizenStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find a citizen by primary key (active or not).
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Citizen>>;

    /// Find a citizen by NIC (case-insensitive, active or not).
    async fn find_by_nic(&self, nic: &str) -> AppResult<Option<Citizen>>;

    /// List citizens matching the filter, newest first.
    async fn list(
        &self,
        filter: &CitizenFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Citizen>>;

    /// Every citizen matching the filter, oldest first.
    async fn list_all(&self, filter: &CitizenFilter) -> AppResult<Vec<Citizen>>;

    /// Insert a citizen. Duplicate NIC is a `Conflict`.
    async fn create(&self, data: &CreateCitizen) -> AppResult<Citizen>;

    /// Update editable fields of an active citizen.
    async fn update(&self, id: Uuid, data: &UpdateCitizen) -> AppResult<Option<Citizen>>;

    /// Review transition from `from` to `to`.
    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<Citizen>>;

    /// Soft-delete. Returns `None` if missing or already inactive.
    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Citizen>>;
}

/// Relief request persistence.
#[async_trait]
pub trait ReliefRequestStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find a request by primary key (active or not).
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ReliefRequest>>;

    /// List requests matching the filter, newest first.
    async fn list(
        &self,
        filter: &ReliefRequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReliefRequest>>;

    /// Every request matching the filter, oldest first.
    async fn list_all(&self, filter: &ReliefRequestFilter) -> AppResult<Vec<ReliefRequest>>;

    /// Insert a request.
    async fn create(&self, data: &CreateReliefRequest) -> AppResult<ReliefRequest>;

    /// Update editable fields of an active request.
    async fn update(
        &self,
        id: Uuid,
        data: &UpdateReliefRequest,
    ) -> AppResult<Option<ReliefRequest>>;

    /// Review transition from `from` to `to`.
    async fn transition(
        &self,
        id: Uuid,
        from: CaseStatus,
        to: CaseStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> AppResult<Option<ReliefRequest>>;

    /// Soft-delete. Returns `None` if missing or already inactive.
    async fn deactivate(&self, id: Uuid) -> AppResult<Option<ReliefRequest>>;
}

/// Branch office persistence.
#[async_trait]
pub trait BranchStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find a branch by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>>;

    /// List branches ordered by name.
    async fn list(&self, district: Option<&str>, include_inactive: bool) -> AppResult<Vec<Branch>>;

    /// Insert a branch. Duplicate name is a `Conflict`.
    async fn create(&self, data: &CreateBranch) -> AppResult<Branch>;

    /// Update branch fields. Duplicate name is a `Conflict`.
    async fn update(&self, id: Uuid, data: &UpdateBranch) -> AppResult<Option<Branch>>;

    /// Set the operational status.
    async fn set_status(&self, id: Uuid, status: BranchStatus) -> AppResult<Option<Branch>>;
}

/// GN division reference data.
#[async_trait]
pub trait GnDivisionStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find a division by GN UID code (case-insensitive).
    async fn find_by_code(&self, code: &str) -> AppResult<Option<GnDivision>>;

    /// Every division in a district, ordered by name.
    async fn list_by_district(&self, district: &str) -> AppResult<Vec<GnDivision>>;
}

/// Bundle of every store handle, cheap to clone.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Citizens.
    pub citizens: Arc<dyn CitizenStore>,
    /// Relief requests.
    pub relief_requests: Arc<dyn ReliefRequestStore>,
    /// Branches.
    pub branches: Arc<dyn BranchStore>,
    /// GN divisions.
    pub gn_divisions: Arc<dyn GnDivisionStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        use crate::repositories::{
            BranchRepository, CitizenRepository, GnDivisionRepository, ReliefRequestRepository,
            UserRepository,
        };

        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            citizens: Arc::new(CitizenRepository::new(pool.clone())),
            relief_requests: Arc::new(ReliefRequestRepository::new(pool.clone())),
            branches: Arc::new(BranchRepository::new(pool.clone())),
            gn_divisions: Arc::new(GnDivisionRepository::new(pool)),
        }
    }

    /// Empty in-memory stores seeded with the given GN divisions.
    pub fn in_memory(divisions: Vec<GnDivision>) -> Self {
        use crate::memory::{
            MemoryBranchStore, MemoryCitizenStore, MemoryGnDivisionStore,
            MemoryReliefRequestStore, MemoryUserStore,
        };

        Self {
            users: Arc::new(MemoryUserStore::new()),
            citizens: Arc::new(MemoryCitizenStore::new()),
            relief_requests: Arc::new(MemoryReliefRequestStore::new()),
            branches: Arc::new(MemoryBranchStore::new()),
            gn_divisions: Arc::new(MemoryGnDivisionStore::new(divisions)),
        }
    }
}
