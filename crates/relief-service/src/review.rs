//! Review (approve / reject) input shared by citizens and relief requests.

use serde::{Deserialize, Serialize};
use validator::Validate;

use relief_core::error::AppError;
use relief_entity::case::CaseStatus;

/// Body of an approve or reject call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    /// Reviewer's note. Required when rejecting.
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

impl ReviewRequest {
    /// The trimmed note for a transition to `to`, enforcing that
    /// rejections carry one.
    pub fn note_for(&self, to: CaseStatus) -> Result<Option<String>, AppError> {
        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if to == CaseStatus::Rejected && note.is_none() {
            return Err(AppError::validation("A note is required when rejecting"));
        }
        Ok(note)
    }
}

/// Check that `from` may move to `to`.
pub(crate) fn ensure_transition(from: CaseStatus, to: CaseStatus) -> Result<(), AppError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::conflict(format!(
            "Cannot move a {} record to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Trim, treating blank as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_needs_note() {
        let blank = ReviewRequest {
            note: Some("  ".into()),
        };
        assert!(blank.note_for(CaseStatus::Rejected).is_err());
        assert_eq!(blank.note_for(CaseStatus::Approved).unwrap(), None);

        let noted = ReviewRequest {
            note: Some(" duplicate ".into()),
        };
        assert_eq!(
            noted.note_for(CaseStatus::Rejected).unwrap().as_deref(),
            Some("duplicate")
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(ensure_transition(CaseStatus::Pending, CaseStatus::Approved).is_ok());
        assert!(ensure_transition(CaseStatus::Approved, CaseStatus::Rejected).is_err());
        assert!(ensure_transition(CaseStatus::Rejected, CaseStatus::Pending).is_err());
    }
}
