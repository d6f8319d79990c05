//! Page requests and paginated responses.

use crate::error::DomainError;
use serde::Serialize;

/// Page size used when the client does not send `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request; larger values are clamped
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated `(page, limit)` pair. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate raw query values.
    ///
    /// Missing values fall back to page 1 and [`DEFAULT_PAGE_SIZE`]; a limit
    /// above [`MAX_PAGE_SIZE`] is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] when `page < 1` or `limit < 1`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(i64::from(DEFAULT_PAGE_SIZE));

        if page < 1 {
            return Err(DomainError::invalid("page must be greater than or equal to 1"));
        }
        if limit < 1 {
            return Err(DomainError::invalid("limit must be greater than or equal to 1"));
        }

        let page = u32::try_from(page).map_err(|_| DomainError::invalid("page is too large"))?;
        let limit = u32::try_from(limit.min(i64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE);

        Ok(Self { page, limit })
    }

    /// 1-based page number
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page starts
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Number of pages needed to hold `total` rows
    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Total number of matching items across all pages
    pub total: u64,
    /// The page that was requested
    pub page: u32,
    /// `ceil(total / limit)`
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the rows and the total count.
    #[must_use]
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            data,
            total,
            page: request.page(),
            total_pages: request.total_pages(total),
        }
    }
}

/// A bare `{ "data": [...] }` envelope for unpaginated lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataEnvelope<T> {
    /// The items
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for DataEnvelope<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}
