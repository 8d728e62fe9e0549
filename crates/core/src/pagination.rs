//! Page-number pagination for listings.
//!
//! Page numbers are 1-based. A missing or non-integer page number selects
//! page 1; an integer outside `1..=num_pages` is clamped to the nearest
//! valid page. A listing with no rows still has a single, empty page.

use serde::Serialize;

/// Ads shown per listing page.
pub const ADS_PER_PAGE: i64 = 5;

/// Metadata for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Splits `total_count` rows into pages of `page_size`.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: i64,
    total_count: i64,
}

impl Paginator {
    /// `page_size` is floored at 1 and `total_count` at 0.
    pub fn new(total_count: i64, page_size: i64) -> Self {
        Self {
            page_size: page_size.max(1),
            total_count: total_count.max(0),
        }
    }

    pub fn num_pages(&self) -> i64 {
        let pages = (self.total_count + self.page_size - 1) / self.page_size;
        pages.max(1)
    }

    /// Resolve a raw page parameter to a valid page.
    pub fn page(&self, requested: Option<&str>) -> PageInfo {
        let num_pages = self.num_pages();
        let number = parse_page_number(requested)
            .unwrap_or(1)
            .clamp(1, num_pages);

        PageInfo {
            number,
            page_size: self.page_size,
            total_count: self.total_count,
            num_pages,
            has_next: number < num_pages,
            has_previous: number > 1,
        }
    }
}

/// Parse a page parameter; `None` when missing or not an integer.
pub fn parse_page_number(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}
