//! Offset pagination primitives shared by the message log and the feed.
//!
//! The store has no native skip/offset: an offset page is produced by
//! fetching the first `page * limit` rows of the partition in clustering
//! order and slicing the requested window in memory. The cost therefore
//! grows with page depth; callers paginating deeply should prefer the
//! timestamp-cursor path, which narrows the scanned range instead.

use serde::Serialize;
use thiserror::Error;

/// Rejected page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageRequest {
    /// Pages are 1-based; page zero does not exist.
    #[error("page numbers start at 1")]
    ZeroPage,

    /// A zero limit would always produce an empty window.
    #[error("page limit must be at least 1")]
    ZeroLimit,
}

/// A validated 1-based page request.
///
/// # Examples
///
/// ```
/// use ronchamp::pagination::PageRequest;
///
/// let request = PageRequest::new(2, 20).expect("valid request");
/// assert_eq!(request.fetch_window(), 40);
/// assert_eq!(request.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a page request, rejecting zero page or limit.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageRequest`] when either parameter is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, InvalidPageRequest> {
        if page == 0 {
            return Err(InvalidPageRequest::ZeroPage);
        }
        if limit == 0 {
            return Err(InvalidPageRequest::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The maximum number of rows in the returned window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows that must be fetched from the store before slicing.
    ///
    /// Widened to `u64` so deep pages cannot overflow the multiplication.
    #[must_use]
    pub const fn fetch_window(&self) -> u64 {
        (self.page as u64) * (self.limit as u64)
    }

    /// Rows to drop from the head of the fetched window.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        ((self.page as u64) - 1) * (self.limit as u64)
    }

    /// Slices the requested window out of rows fetched in clustering order.
    #[must_use]
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        rows.into_iter().skip(offset).take(limit).collect()
    }
}

/// A page of results together with its pagination envelope.
///
/// `total` counts the rows present in this page after lossy-read skips;
/// `skipped` reports how many fetched rows were dropped because they could
/// not be resolved, so feed inconsistencies stay observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    /// The rows of the requested window, in clustering order.
    pub data: Vec<T>,
    /// Number of rows in `data`.
    pub total: usize,
    /// The 1-based page number that was requested.
    pub page: u32,
    /// The requested window size.
    pub limit: u32,
    /// Rows dropped by the skip-and-continue read policy.
    pub skipped: usize,
}

impl<T> Paginated<T> {
    /// Wraps a sliced window in its envelope.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, skipped: usize) -> Self {
        Self {
            total: data.len(),
            data,
            page: request.page(),
            limit: request.limit(),
            skipped,
        }
    }
}
