//! Policy evaluation.

use serde::Serialize;

use relief_core::error::AppError;
use relief_entity::access::{Action, Resource};
use relief_entity::user::UserRole;

use super::policies::{POLICIES, Policy, Subject};

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// A policy matched and its predicate admitted the subject.
    Allowed,
    /// A policy matched but its predicate rejected the subject.
    PredicateRejected,
    /// No policy exists for the pair.
    NoPolicy,
}

/// Outcome of [`PolicyEvaluator::explain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Resource checked.
    pub resource: Resource,
    /// Action checked.
    pub action: Action,
    /// Whether access is granted.
    pub allowed: bool,
    /// Why.
    pub reason: DecisionReason,
    /// Description of the matched policy, if one matched.
    pub policy: Option<&'static str>,
}

/// Serializable view of one policy row.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    /// Resource tag.
    pub resource: Resource,
    /// Action.
    pub action: Action,
    /// Who the row admits.
    pub description: &'static str,
    /// Roles admitted when the subject has a district assigned.
    pub roles: Vec<UserRole>,
}

/// Evaluates (subject, resource, action) against an ordered policy table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEvaluator {
    policies: &'static [Policy],
}

impl PolicyEvaluator {
    /// Evaluator over the built-in table.
    pub fn new() -> Self {
        Self { policies: POLICIES }
    }

    /// Evaluator over a custom table.
    pub fn with_policies(policies: &'static [Policy]) -> Self {
        Self { policies }
    }

    fn find(&self, resource: Resource, action: Action) -> Option<&'static Policy> {
        self.policies
            .iter()
            .find(|p| p.resource == resource && p.action == action)
    }

    /// Allow or deny.
    pub fn evaluate(&self, subject: &Subject, resource: Resource, action: Action) -> bool {
        self.find(resource, action)
            .is_some_and(|p| (p.predicate)(subject))
    }

    /// Like [`evaluate`](Self::evaluate), with the reason attached.
    pub fn explain(&self, subject: &Subject, resource: Resource, action: Action) -> Decision {
        let (allowed, reason, policy) = match self.find(resource, action) {
            None => (false, DecisionReason::NoPolicy, None),
            Some(p) if (p.predicate)(subject) => {
                (true, DecisionReason::Allowed, Some(p.description))
            }
            Some(p) => (false, DecisionReason::PredicateRejected, Some(p.description)),
        };
        Decision {
            resource,
            action,
            allowed,
            reason,
            policy,
        }
    }

    /// Returns `Ok(())` if allowed, or an `Authorization` error if denied.
    pub fn authorize(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<(), AppError> {
        if self.evaluate(subject, resource, action) {
            Ok(())
        } else {
            tracing::debug!(
                role = %subject.role,
                resource = %resource,
                action = %action,
                "Policy denied"
            );
            Err(AppError::authorization(format!(
                "Role '{}' may not {} {}",
                subject.role, action, resource
            )))
        }
    }

    /// Every row of the table in evaluation order.
    pub fn policies(&self) -> Vec<PolicyView> {
        self.policies
            .iter()
            .map(|p| PolicyView {
                resource: p.resource,
                action: p.action,
                description: p.description,
                roles: UserRole::ALL
                    .into_iter()
                    .filter(|role| (p.predicate)(&Subject::new(*role, Some("-".into()))))
                    .collect(),
            })
            .collect()
    }
}

impl Default for PolicyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use relief_core::error::ErrorKind;

    use super::*;

    fn subject(role: UserRole, district: Option<&str>) -> Subject {
        Subject::new(role, district.map(str::to_string))
    }

    fn any_role() -> impl Strategy<Value = UserRole> {
        prop::sample::select(UserRole::ALL.to_vec())
    }

    fn any_resource() -> impl Strategy<Value = Resource> {
        prop::sample::select(Resource::ALL.to_vec())
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop::sample::select(Action::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_unlisted_pairs_are_denied(
            role in any_role(),
            resource in any_resource(),
            action in any_action(),
            district in proptest::option::of("[A-Za-z ]{0,12}"),
        ) {
            let listed = POLICIES
                .iter()
                .any(|p| p.resource == resource && p.action == action);
            prop_assume!(!listed);

            let evaluator = PolicyEvaluator::new();
            let s = Subject::new(role, district);
            prop_assert!(!evaluator.evaluate(&s, resource, action));
            prop_assert_eq!(evaluator.explain(&s, resource, action).reason, DecisionReason::NoPolicy);
        }

        #[test]
        fn prop_non_admin_without_district_is_denied_everywhere(
            role in prop::sample::select(vec![UserRole::Officer, UserRole::Volunteer]),
            resource in any_resource(),
            action in any_action(),
        ) {
            let evaluator = PolicyEvaluator::new();
            prop_assert!(!evaluator.evaluate(&subject(role, None), resource, action));
        }

        #[test]
        fn prop_evaluate_matches_explain(
            role in any_role(),
            resource in any_resource(),
            action in any_action(),
        ) {
            let evaluator = PolicyEvaluator::new();
            let s = subject(role, Some("Colombo"));
            prop_assert_eq!(
                evaluator.evaluate(&s, resource, action),
                evaluator.explain(&s, resource, action).allowed
            );
        }
    }

    #[test]
    fn test_empty_table_denies_admin() {
        let evaluator = PolicyEvaluator::with_policies(&[]);
        assert!(!evaluator.evaluate(&subject(UserRole::Admin, None), Resource::User, Action::Read));
    }

    #[test]
    fn test_first_match_wins() {
        fn yes(_: &Subject) -> bool {
            true
        }
        fn no(_: &Subject) -> bool {
            false
        }
        static TABLE: &[Policy] = &[
            Policy {
                resource: Resource::Branch,
                action: Action::Read,
                description: "first",
                predicate: no,
            },
            Policy {
                resource: Resource::Branch,
                action: Action::Read,
                description: "second",
                predicate: yes,
            },
        ];

        let evaluator = PolicyEvaluator::with_policies(TABLE);
        let decision = evaluator.explain(&subject(UserRole::Admin, None), Resource::Branch, Action::Read);
        assert!(!decision.allowed);
        assert_eq!(decision.policy, Some("first"));
    }

    #[test]
    fn test_volunteer_matrix() {
        let evaluator = PolicyEvaluator::new();
        let v = subject(UserRole::Volunteer, Some("Gampaha"));

        assert!(evaluator.evaluate(&v, Resource::Citizen, Action::Create));
        assert!(evaluator.evaluate(&v, Resource::ReliefRequest, Action::Read));
        assert!(!evaluator.evaluate(&v, Resource::Citizen, Action::Update));
        assert!(!evaluator.evaluate(&v, Resource::Report, Action::Read));
        assert!(!evaluator.evaluate(&v, Resource::User, Action::Read));
        assert!(!evaluator.evaluate(&v, Resource::Dashboard, Action::Delete));
    }

    #[test]
    fn test_authorize_returns_authorization_error() {
        let err = PolicyEvaluator::new()
            .authorize(
                &subject(UserRole::Officer, Some("Galle")),
                Resource::User,
                Action::Create,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_policy_view_roles() {
        let views = PolicyEvaluator::new().policies();
        assert_eq!(views.len(), POLICIES.len());

        let update = views
            .iter()
            .find(|v| v.resource == Resource::Citizen && v.action == Action::Update)
            .unwrap();
        assert_eq!(update.roles, vec![UserRole::Admin, UserRole::Officer]);

        let abac = views
            .iter()
            .find(|v| v.resource == Resource::Abac)
            .unwrap();
        assert_eq!(abac.roles, vec![UserRole::Admin]);
    }
}
