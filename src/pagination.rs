//! This modules defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when the request does not specify a valid limit.
    pub default_limit: u64,
    /// The largest number of items a client may request per page.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// A page number and size that have been clamped to valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The page number, starting from 1.
    pub page: u64,
    /// The number of items per page.
    pub limit: u64,
}

impl PaginationConfig {
    /// Resolve the page and limit from a request.
    ///
    /// A missing or non-positive page falls back to the first page. A missing
    /// limit, or one outside `1..=max_limit`, falls back to the default limit.
    pub fn resolve(&self, page: Option<i64>, limit: Option<i64>) -> PageRequest {
        let page = match page {
            None => self.default_page,
            Some(page) if page < 1 => 1,
            Some(page) => page as u64,
        };

        let limit = match limit {
            Some(limit) if limit >= 1 && limit as u64 <= self.max_limit => limit as u64,
            _ => self.default_limit,
        };

        PageRequest { page, limit }
    }
}

impl PageRequest {
    /// The number of items before the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// The number of pages needed to show `total` items, `limit` at a time.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

/// One page of items plus where it sits in the full result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// The position of this page.
    pub pagination: PageInfo,
}

/// Describes the position of a [Page].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    /// The number of items across all pages.
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap `data` fetched for `request` out of `total` items.
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: PageInfo {
                page: request.page,
                limit: request.limit,
                total,
                total_pages: total_pages(total, request.limit),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, PaginationConfig, total_pages};

    #[test]
    fn resolve_uses_defaults_when_missing() {
        let config = PaginationConfig::default();

        assert_eq!(
            config.resolve(None, None),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn resolve_clamps_page_below_one() {
        let config = PaginationConfig::default();

        assert_eq!(config.resolve(Some(0), None).page, 1);
        assert_eq!(config.resolve(Some(-3), None).page, 1);
        assert_eq!(config.resolve(Some(4), None).page, 4);
    }

    #[test]
    fn resolve_resets_out_of_range_limit() {
        let config = PaginationConfig::default();

        assert_eq!(config.resolve(None, Some(0)).limit, 10);
        assert_eq!(config.resolve(None, Some(101)).limit, 10);
        assert_eq!(config.resolve(None, Some(-1)).limit, 10);
        assert_eq!(config.resolve(None, Some(100)).limit, 100);
        assert_eq!(config.resolve(None, Some(1)).limit, 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }
}
