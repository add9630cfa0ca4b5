//! GN division model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A Grama Niladhari division, keyed by its GN UID code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GnDivision {
    /// GN UID code, e.g. `COL-05-112`.
    pub code: String,
    /// Division name.
    pub name: String,
    /// Divisional Secretariat the division belongs to.
    pub ds_division: String,
    /// District.
    pub district: String,
}
