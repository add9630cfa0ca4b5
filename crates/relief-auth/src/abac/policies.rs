//! The policy table.

use serde::{Deserialize, Serialize};

use relief_entity::access::{Action, Resource};
use relief_entity::user::UserRole;

/// The attributes a policy predicate sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Caller's role.
    pub role: UserRole,
    /// Caller's assigned district, if any.
    pub district: Option<String>,
}

impl Subject {
    /// Build a subject. Blank districts count as unassigned.
    pub fn new(role: UserRole, district: Option<String>) -> Self {
        let district = district
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Self { role, district }
    }

    /// Whether the subject has an assigned district.
    pub fn has_district(&self) -> bool {
        self.district.is_some()
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    /// Resource tag the row applies to.
    pub resource: Resource,
    /// Action the row applies to.
    pub action: Action,
    /// Who the row admits, in words.
    pub description: &'static str,
    /// Decides the row.
    pub predicate: fn(&Subject) -> bool,
}

/// Any signed-in member: admins, or officers and volunteers with a district.
fn member(s: &Subject) -> bool {
    s.role.is_admin() || s.has_district()
}

/// Admins, or officers with a district.
fn staff(s: &Subject) -> bool {
    match s.role {
        UserRole::Admin => true,
        UserRole::Officer => s.has_district(),
        UserRole::Volunteer => false,
    }
}

fn admin(s: &Subject) -> bool {
    s.role.is_admin()
}

const fn rule(
    resource: Resource,
    action: Action,
    description: &'static str,
    predicate: fn(&Subject) -> bool,
) -> Policy {
    Policy {
        resource,
        action,
        description,
        predicate,
    }
}

const MEMBER: &str = "any member with an assigned district, or an admin";
const STAFF: &str = "admins, or officers with an assigned district";
const ADMIN: &str = "admins only";

/// Scanned top to bottom; the first (resource, action) match decides.
/// Pairs that do not appear are denied.
pub static POLICIES: &[Policy] = &[
    rule(Resource::Dashboard, Action::Read, MEMBER, member),
    rule(Resource::Citizen, Action::Create, MEMBER, member),
    rule(Resource::Citizen, Action::Read, MEMBER, member),
    rule(Resource::Citizen, Action::Update, STAFF, staff),
    rule(Resource::Citizen, Action::Delete, ADMIN, admin),
    rule(Resource::ReliefRequest, Action::Create, MEMBER, member),
    rule(Resource::ReliefRequest, Action::Read, MEMBER, member),
    rule(Resource::ReliefRequest, Action::Update, STAFF, staff),
    rule(Resource::ReliefRequest, Action::Delete, ADMIN, admin),
    rule(Resource::User, Action::Create, ADMIN, admin),
    rule(Resource::User, Action::Read, ADMIN, admin),
    rule(Resource::User, Action::Update, ADMIN, admin),
    rule(Resource::User, Action::Delete, ADMIN, admin),
    rule(Resource::Branch, Action::Create, ADMIN, admin),
    rule(Resource::Branch, Action::Read, MEMBER, member),
    rule(Resource::Branch, Action::Update, ADMIN, admin),
    rule(Resource::Branch, Action::Delete, ADMIN, admin),
    rule(Resource::Report, Action::Read, STAFF, staff),
    rule(Resource::Abac, Action::Read, ADMIN, admin),
    rule(Resource::Autofill, Action::Read, MEMBER, member),
    rule(Resource::GnUid, Action::Read, MEMBER, member),
];
