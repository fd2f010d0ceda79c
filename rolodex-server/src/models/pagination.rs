//! Pagination types

use serde::{Deserialize, Serialize};

/// Default items per page
pub const DEFAULT_PER_PAGE: i64 = 6;

/// Pagination parameters as requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: i64,
    /// Requested items per page; `<= 0` asks for every matching row
    pub per_page: i64,
}

impl Pagination {
    /// Create pagination, clamping page to a minimum of 1.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Whether the client asked for all rows on one page.
    pub fn wants_all(&self) -> bool {
        self.per_page <= 0
    }

    /// Resolve the page against the number of matching rows.
    ///
    /// When every row was requested the effective page size becomes `total`.
    pub fn window(&self, total: i64) -> PageWindow {
        let per_page = if self.wants_all() { total } else { self.per_page };

        PageWindow {
            page: self.page,
            per_page,
            offset: (self.page - 1).saturating_mul(per_page),
        }
    }
}

/// A page resolved against a known row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
    pub offset: i64,
}

impl PageWindow {
    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Number of pages needed for `total` rows; zero when nothing can be paged.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        0
    } else {
        total / per_page + i64::from(total % per_page != 0)
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Current page number
    pub page: i64,
    /// Effective items per page
    pub per_page: i64,
    /// Matching rows across all pages
    pub total: i64,
    /// `ceil(total / per_page)`
    pub total_pages: i64,
    /// Rows on this page
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, window: PageWindow) -> Self {
        Self {
            page: window.page,
            per_page: window.per_page,
            total,
            total_pages: total_pages(total, window.per_page),
            data,
        }
    }
}

/// Raw `?page=&per_page=&search=` query string.
///
/// Numbers are parsed leniently: a value without a leading integer
/// falls back to the default instead of rejecting the request. Repeated
/// and unknown keys are accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct PaginationParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
}

impl PaginationParams {
    pub fn pagination(&self) -> Pagination {
        let page = self.page.as_deref().and_then(parse_leading_int).unwrap_or(1);
        let per_page = self
            .per_page
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(DEFAULT_PER_PAGE);

        Pagination::new(page, per_page)
    }

    /// Search text, ignoring an empty value.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

impl From<Vec<(String, String)>> for PaginationParams {
    /// The first occurrence of a repeated key wins.
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "per_page" => &mut params.per_page,
                "search" => &mut params.search,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Parse the leading integer of `s` (`"12abc"` → 12, `"abc"` → none).
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
