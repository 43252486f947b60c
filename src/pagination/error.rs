//! Error types for paginated fetching.

use thiserror::Error;

/// Failure reported by a [`PageSource`](crate::pagination::PageSource).
#[derive(Debug, Error)]
pub enum PageSourceError {
    /// The backend refused or failed the request.
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// The backend answered with something that is not a page of records.
    #[error("Malformed page: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by [`Paginator`](crate::pagination::Paginator) operations.
///
/// The paginator keeps its previous state when this is returned; surfacing the error
/// is up to the caller.
#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("Page fetch failed: {0}")]
    Source(#[from] PageSourceError),
}
