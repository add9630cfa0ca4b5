//! `?page=&page_size=` query parameters.

use serde::Deserialize;

use relief_core::types::pagination::PageRequest;

/// Optional paging parameters; missing values fall back to [`PageRequest::default`].
///
/// `per_page` is accepted as an alias for `page_size`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    #[serde(alias = "per_page")]
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn into_page_request(self) -> PageRequest {
        let fallback = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(fallback.page),
            self.page_size.unwrap_or(fallback.page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_use_defaults() {
        let page = PaginationParams::default().into_page_request();
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let page = PaginationParams {
            page: Some(0),
            page_size: Some(10_000),
        }
        .into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }
}
