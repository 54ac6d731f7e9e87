use crate::model::api::PaginationDto;

/// Page size used when the client does not send `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound on `limit` regardless of what the client asks for.
pub const MAX_LIMIT: u64 = 50;

/// Highest page number accepted; keeps the row offset `(page - 1) * limit` within `i64`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// A 1-based page request with a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Normalizes raw query values: page defaults to 1 and is clamped to `1..=MAX_PAGE`,
    /// limit defaults to 10 and is clamped to `1..=50`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// Zero-based page index as expected by SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total item count across all pages.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.limit)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    pub fn pagination_dto(&self) -> PaginationDto {
        PaginationDto {
            page: self.request.page,
            limit: self.request.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }
}
