//! Citizen autofill by NIC.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_database::{CitizenStore, GnDivisionStore};
use relief_entity::access::{Action, Resource};
use relief_entity::case::CaseStatus;
use relief_entity::geo::GnDivision;

use crate::citizen::normalize_nic;
use crate::context::RequestContext;

/// Fields needed to prefill a relief request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenAutofill {
    /// Citizen record ID.
    pub citizen_id: Uuid,
    /// Normalized NIC.
    pub nic: String,
    /// Full name.
    pub full_name: String,
    /// Address.
    pub address: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// District.
    pub district: String,
    /// Household size.
    pub household_size: i32,
    /// Verification status.
    pub status: CaseStatus,
    /// GN division details, when recorded.
    pub gn_division: Option<GnDivision>,
}

/// Looks up active citizens for form prefill.
#[derive(Debug, Clone)]
pub struct AutofillService {
    citizens: Arc<dyn CitizenStore>,
    divisions: Arc<dyn GnDivisionStore>,
    policy: Arc<PolicyEvaluator>,
}

impl AutofillService {
    /// Creates a new autofill service.
    pub fn new(
        citizens: Arc<dyn CitizenStore>,
        divisions: Arc<dyn GnDivisionStore>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            citizens,
            divisions,
            policy,
        }
    }

    /// Find an active citizen by NIC within the caller's district.
    pub async fn by_nic(&self, ctx: &RequestContext, nic: &str) -> Result<CitizenAutofill, AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Autofill, Action::Read)?;

        let nic = normalize_nic(nic)?;
        let citizen = self
            .citizens
            .find_by_nic(&nic)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::not_found("No citizen registered with that NIC"))?;
        ctx.ensure_district(&citizen.district)?;

        let gn_division = match citizen.gn_division.as_deref() {
            Some(code) => self.divisions.find_by_code(code).await?,
            None => None,
        };

        Ok(CitizenAutofill {
            citizen_id: citizen.id,
            nic: citizen.nic,
            full_name: citizen.full_name,
            address: citizen.address,
            phone: citizen.phone,
            district: citizen.district,
            household_size: citizen.household_size,
            status: citizen.status,
            gn_division,
        })
    }
}
