//! Shared fixtures for service unit tests.

use std::sync::Arc;

use uuid::Uuid;

use relief_auth::{PasswordHasher, PasswordValidator, PolicyEvaluator};
use relief_core::config::AuthConfig;
use relief_database::Stores;
use relief_entity::geo::GnDivision;
use relief_entity::user::UserRole;

use crate::context::RequestContext;

pub(crate) struct Deps {
    pub stores: Stores,
    pub policy: Arc<PolicyEvaluator>,
    pub hasher: Arc<PasswordHasher>,
    pub validator: Arc<PasswordValidator>,
}

pub(crate) fn deps() -> Deps {
    let mut cfg = AuthConfig::with_secrets("a".repeat(32), "b".repeat(32));
    cfg.argon2_memory_kib = 1024;
    cfg.argon2_iterations = 1;

    Deps {
        stores: Stores::in_memory(divisions()),
        policy: Arc::new(PolicyEvaluator::new()),
        hasher: Arc::new(PasswordHasher::new(&cfg).expect("argon2 params")),
        validator: Arc::new(PasswordValidator::new(&cfg)),
    }
}

pub(crate) fn divisions() -> Vec<GnDivision> {
    [
        ("COL-05-112", "Kotahena East", "Colombo", "Colombo"),
        ("COL-10-047", "Kolonnawa", "Kolonnawa", "Colombo"),
        ("GAL-06-009", "Galle Fort", "Galle Four Gravets", "Galle"),
    ]
    .into_iter()
    .map(|(code, name, ds, district)| GnDivision {
        code: code.into(),
        name: name.into(),
        ds_division: ds.into(),
        district: district.into(),
    })
    .collect()
}

pub(crate) fn admin() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "admin", UserRole::Admin, None)
}

pub(crate) fn officer(district: &str) -> RequestContext {
    RequestContext::new(
        Uuid::new_v4(),
        "officer",
        UserRole::Officer,
        Some(district.into()),
    )
}

pub(crate) fn volunteer(district: &str) -> RequestContext {
    RequestContext::new(
        Uuid::new_v4(),
        "volunteer",
        UserRole::Volunteer,
        Some(district.into()),
    )
}

pub(crate) const PASSWORD: &str = "Relief-Desk-2024!";
