//! Admin listing queries with pagination and search.
//!
//! Listings are served from the local store only. Results are always
//! newest first; the pagination block reflects the total after any
//! search filter is applied.

use std::sync::Arc;

use serde::Serialize;

use crate::adapters::{SqliteStore, StoredRecord};
use crate::domain::StoreError;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound on requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters of one listing request.
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// 1-based page number. Values below 1 are floored to 1.
    pub page: u32,

    /// Requested page size, clamped to `[1, MAX_PAGE_SIZE]`.
    pub limit: u32,

    /// Optional search term. Empty strings mean no filter.
    pub search: Option<String>,
}

impl ListRequest {
    /// Request for a specific page with the default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Attach a search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Attach a page size (clamped when the query runs).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Effective `(page, limit)` after flooring and clamping.
    fn normalized(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.clamp(1, MAX_PAGE_SIZE))
    }

    fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

/// Pagination block accompanying every listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Derive the block from the effective page, limit, and post-filter
    /// total.
    fn compute(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = (total + limit as u64 - 1) / limit as u64;
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: (page as u64) < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of records plus its pagination block.
#[derive(Debug, Clone, Serialize)]
pub struct Page<E> {
    pub data: Vec<E>,
    pub pagination: Pagination,
}

/// Submission counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionStats {
    pub registrations: u64,
    pub requirements: u64,
    pub total_submissions: u64,
}

/// Paginated, searchable listings over locally stored entities.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<SqliteStore>,
}

impl QueryService {
    /// Create a query service over the local store.
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// One page of records of kind `E`.
    ///
    /// A page past the end returns empty data with `has_next == false`
    /// rather than an error.
    pub async fn list<E>(&self, request: &ListRequest) -> Result<Page<E>, StoreError>
    where
        E: StoredRecord + Serialize,
    {
        let (page, limit) = request.normalized();
        let offset = (page as i64 - 1) * limit as i64;

        let (data, total) = match request.term() {
            Some(term) => (
                self.store
                    .list_page_matching::<E>(term, offset, limit as i64)
                    .await?,
                self.store.count_matching::<E>(term).await?,
            ),
            None => (
                self.store.list_page::<E>(offset, limit as i64).await?,
                self.store.count::<E>().await?,
            ),
        };

        Ok(Page {
            data,
            pagination: Pagination::compute(page, limit, total as u64),
        })
    }

    /// Submission counts across the local form tables.
    pub async fn stats(&self) -> Result<SubmissionStats, StoreError> {
        let registrations = self.store.count::<crate::domain::Registration>().await? as u64;
        let requirements = self.store.count::<crate::domain::Requirements>().await? as u64;

        Ok(SubmissionStats {
            registrations,
            requirements,
            total_submissions: registrations + requirements,
        })
    }
}
