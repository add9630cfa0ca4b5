//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use relief_auth::{
    JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, PolicyEvaluator, SessionManager,
};
use relief_core::config::AppConfig;
use relief_core::error::AppError;
use relief_database::Stores;
use relief_service::{
    AccessService, AdminUserService, AutofillService, BranchService, CitizenService,
    DashboardService, GnDivisionService, ReliefRequestService, ReportService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Handlers reach
/// storage only through the services, which authorize first.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token issue, rotation and verification.
    pub session_manager: Arc<SessionManager>,

    /// Self-service account operations.
    pub user_service: Arc<UserService>,
    /// User administration.
    pub admin_user_service: Arc<AdminUserService>,
    /// Citizen records.
    pub citizen_service: Arc<CitizenService>,
    /// Relief requests.
    pub relief_service: Arc<ReliefRequestService>,
    /// Branch offices.
    pub branch_service: Arc<BranchService>,
    /// Reports and exports.
    pub report_service: Arc<ReportService>,
    /// Dashboard counters.
    pub dashboard_service: Arc<DashboardService>,
    /// Citizen autofill.
    pub autofill_service: Arc<AutofillService>,
    /// GN division lookup.
    pub gn_division_service: Arc<GnDivisionService>,
    /// Policy inspection.
    pub access_service: Arc<AccessService>,

    /// When the process started.
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let policy = Arc::new(PolicyEvaluator::new());
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let session_manager = Arc::new(SessionManager::new(
            encoder,
            decoder,
            stores.users.clone(),
            hasher.clone(),
        ));

        Ok(Self {
            session_manager,
            user_service: Arc::new(UserService::new(
                stores.users.clone(),
                hasher.clone(),
                validator.clone(),
            )),
            admin_user_service: Arc::new(AdminUserService::new(
                stores.users.clone(),
                hasher,
                validator,
                policy.clone(),
            )),
            citizen_service: Arc::new(CitizenService::new(
                stores.citizens.clone(),
                stores.gn_divisions.clone(),
                policy.clone(),
            )),
            relief_service: Arc::new(ReliefRequestService::new(
                stores.relief_requests.clone(),
                stores.citizens.clone(),
                policy.clone(),
            )),
            branch_service: Arc::new(BranchService::new(stores.branches.clone(), policy.clone())),
            report_service: Arc::new(ReportService::new(
                stores.citizens.clone(),
                stores.relief_requests.clone(),
                policy.clone(),
            )),
            dashboard_service: Arc::new(DashboardService::new(
                stores.citizens.clone(),
                stores.relief_requests.clone(),
                stores.branches.clone(),
                policy.clone(),
            )),
            autofill_service: Arc::new(AutofillService::new(
                stores.citizens.clone(),
                stores.gn_divisions.clone(),
                policy.clone(),
            )),
            gn_division_service: Arc::new(GnDivisionService::new(
                stores.gn_divisions,
                policy.clone(),
            )),
            access_service: Arc::new(AccessService::new(policy)),
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }
}
