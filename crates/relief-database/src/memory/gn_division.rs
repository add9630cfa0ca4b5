//! In-memory GN division reference data.

use async_trait::async_trait;

use relief_core::result::AppResult;
use relief_entity::geo::GnDivision;

use crate::store::GnDivisionStore;

/// Fixed set of GN divisions supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryGnDivisionStore {
    divisions: Vec<GnDivision>,
}

impl MemoryGnDivisionStore {
    /// Create a store holding `divisions`.
    pub fn new(divisions: Vec<GnDivision>) -> Self {
        Self { divisions }
    }
}

#[async_trait]
impl GnDivisionStore for MemoryGnDivisionStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<GnDivision>> {
        Ok(self
            .divisions
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn list_by_district(&self, district: &str) -> AppResult<Vec<GnDivision>> {
        let mut matched: Vec<GnDivision> = self
            .divisions
            .iter()
            .filter(|d| d.district.eq_ignore_ascii_case(district))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }
}
