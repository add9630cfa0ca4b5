//! Protected resource tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A protected resource, serialized as its `page:*` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Landing dashboard.
    #[serde(rename = "page:dashboard")]
    Dashboard,
    /// Citizen records.
    #[serde(rename = "page:citizen")]
    Citizen,
    /// Relief requests.
    #[serde(rename = "page:relief_request")]
    ReliefRequest,
    /// User administration.
    #[serde(rename = "page:user")]
    User,
    /// Branch offices.
    #[serde(rename = "page:branch")]
    Branch,
    /// Reports and exports.
    #[serde(rename = "page:report")]
    Report,
    /// Policy table inspection.
    #[serde(rename = "page:abac")]
    Abac,
    /// Form autofill lookups.
    #[serde(rename = "page:autofill")]
    Autofill,
    /// GN division lookups.
    #[serde(rename = "page:gnuid")]
    GnUid,
}

impl Resource {
    /// Every resource.
    pub const ALL: [Resource; 9] = [
        Self::Dashboard,
        Self::Citizen,
        Self::ReliefRequest,
        Self::User,
        Self::Branch,
        Self::Report,
        Self::Abac,
        Self::Autofill,
        Self::GnUid,
    ];

    /// Return the resource tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "page:dashboard",
            Self::Citizen => "page:citizen",
            Self::ReliefRequest => "page:relief_request",
            Self::User => "page:user",
            Self::Branch => "page:branch",
            Self::Report => "page:report",
            Self::Abac => "page:abac",
            Self::Autofill => "page:autofill",
            Self::GnUid => "page:gnuid",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resource {
    type Err = relief_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| relief_core::AppError::validation(format!("Unknown resource: '{s}'")))
    }
}
