//! # Paginator
//!
//! Drives infinite-scroll and pull-to-refresh lists against a [`PageSource`].
//!
//! ## State
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `data` | Records fetched so far, in page order |
//! | `loading` | A request is in flight |
//! | `offset` | Offset of the last page appended |
//! | `all_data_loaded` | The last page was short; no further pages |
//!
//! `fetch_data` starts over from offset 0 and is never blocked. `fetch_more_data` is
//! skipped while anything is loading or once `all_data_loaded` is set, so repeated
//! scroll-end events cannot issue duplicate requests.
//!
//! ## Overlapping requests
//!
//! Each `fetch_data` call starts a new generation. A response that arrives after a
//! newer `fetch_data` has started belongs to an older generation and is dropped, so a
//! slow first search can never overwrite the results of the search that replaced it.

use crate::pagination::error::PaginationError;
use crate::pagination::query::{Filters, PageQuery, DEFAULT_PAGE_LIMIT};
use crate::pagination::source::PageSource;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Copy of a paginator's observable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState<R> {
    pub data: Vec<R>,
    pub loading: bool,
    pub offset: usize,
    pub all_data_loaded: bool,
}

/// Why a `fetch_more_data` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Loading,
    AllDataLoaded,
}

/// What a fetch call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page arrived and was applied.
    Loaded { received: usize, all_data_loaded: bool },
    /// No request was issued.
    Skipped(SkipReason),
    /// The page arrived after a newer `fetch_data` started and was discarded.
    Superseded,
}

struct Inner<R> {
    data: Vec<R>,
    in_flight: usize,
    offset: usize,
    all_data_loaded: bool,
    generation: u64,
}

impl<R> Default for Inner<R> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            in_flight: 0,
            offset: 0,
            all_data_loaded: false,
            generation: 0,
        }
    }
}

/// Marks one request as in flight; clears the mark when dropped, on every exit path.
struct LoadingGuard<'a, R> {
    inner: &'a Mutex<Inner<R>>,
}

impl<'a, R> LoadingGuard<'a, R> {
    /// Must be called with the count already incremented under the lock.
    fn adopt(inner: &'a Mutex<Inner<R>>) -> Self {
        Self { inner }
    }
}

impl<R> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }
}

/// Paginated list controller for one screen.
///
/// All methods take `&self`; share it between the scroll handler and the search box
/// with an `Arc`. The internal lock is never held across an `.await`.
pub struct Paginator<S: PageSource> {
    source: S,
    default_limit: usize,
    inner: Mutex<Inner<S::Record>>,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S) -> Self {
        Self::with_default_limit(source, DEFAULT_PAGE_LIMIT)
    }

    pub fn with_default_limit(source: S, default_limit: usize) -> Self {
        Self {
            source,
            default_limit: default_limit.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S::Record>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the first page, replacing whatever was loaded before.
    ///
    /// On failure the previous data, offset and end-of-data flag are kept and the error
    /// is returned for the caller to display.
    pub async fn fetch_data(&self, filters: Filters) -> Result<FetchOutcome, PaginationError> {
        let limit = filters.effective_limit(self.default_limit);
        let query = PageQuery::new(0, limit, filters.fields);

        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.in_flight += 1;
            inner.generation
        };
        let _loading = LoadingGuard::adopt(&self.inner);
        debug!(limit, generation, ?query, "fetch_data");

        let page = match self.source.fetch_page(query).await {
            Ok(page) => page.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, generation, "fetch_data failed");
                return Err(e.into());
            }
        };

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(generation, current = inner.generation, "Stale first page dropped");
            return Ok(FetchOutcome::Superseded);
        }
        let received = page.len();
        let all_data_loaded = received < limit;
        inner.data = page;
        inner.offset = 0;
        inner.all_data_loaded = all_data_loaded;
        info!(received, all_data_loaded, "First page loaded");
        Ok(FetchOutcome::Loaded {
            received,
            all_data_loaded,
        })
    }

    /// Append the next page.
    ///
    /// Skipped while loading or after the last page. An empty page sets
    /// `all_data_loaded` without touching `data` or `offset`.
    pub async fn fetch_more_data(&self, filters: Filters) -> Result<FetchOutcome, PaginationError> {
        let limit = filters.effective_limit(self.default_limit);

        let (generation, next_offset) = {
            let mut inner = self.lock();
            if inner.in_flight > 0 {
                debug!("fetch_more_data skipped: loading");
                return Ok(FetchOutcome::Skipped(SkipReason::Loading));
            }
            if inner.all_data_loaded {
                debug!("fetch_more_data skipped: all data loaded");
                return Ok(FetchOutcome::Skipped(SkipReason::AllDataLoaded));
            }
            inner.in_flight += 1;
            (inner.generation, inner.offset + limit)
        };
        let _loading = LoadingGuard::adopt(&self.inner);

        let query = PageQuery::new(next_offset, limit, filters.fields);
        debug!(limit, generation, ?query, "fetch_more_data");

        let page = match self.source.fetch_page(query).await {
            Ok(page) => page.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, offset = next_offset, "fetch_more_data failed");
                return Err(e.into());
            }
        };

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(generation, current = inner.generation, "Stale page dropped");
            return Ok(FetchOutcome::Superseded);
        }
        let received = page.len();
        if received == 0 {
            inner.all_data_loaded = true;
            info!(offset = next_offset, "No more data");
            return Ok(FetchOutcome::Loaded {
                received,
                all_data_loaded: true,
            });
        }
        let all_data_loaded = received < limit;
        inner.data.extend(page);
        inner.offset = next_offset;
        inner.all_data_loaded = all_data_loaded;
        info!(received, offset = next_offset, total = inner.data.len(), all_data_loaded, "Page appended");
        Ok(FetchOutcome::Loaded {
            received,
            all_data_loaded,
        })
    }

    pub fn state(&self) -> PageState<S::Record> {
        let inner = self.lock();
        PageState {
            data: inner.data.clone(),
            loading: inner.in_flight > 0,
            offset: inner.offset,
            all_data_loaded: inner.all_data_loaded,
        }
    }

    pub fn data(&self) -> Vec<S::Record> {
        self.lock().data.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn all_data_loaded(&self) -> bool {
        self.lock().all_data_loaded
    }

    pub fn offset(&self) -> usize {
        self.lock().offset
    }
}
