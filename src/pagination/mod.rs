//! # Paginated Fetching
//!
//! Generic load-first-page / load-more controller used by every list screen (leads,
//! purchase orders, products, visits, ...).
//!
//! - [`Paginator`] - Holds the list and the paging flags
//! - [`PageSource`] - Backend query function; [`FnSource`] wraps a closure, [`VecSource`] a list
//! - [`Filters`] / [`PageQuery`] - What the screen asks for and what the backend receives
//! - [`mock`] - [`ScriptedSource`](mock::ScriptedSource) for tests

pub mod controller;
pub mod error;
pub mod mock;
pub mod query;
pub mod source;

pub use controller::{FetchOutcome, PageState, Paginator, SkipReason};
pub use error::{PageSourceError, PaginationError};
pub use query::{Filters, PageQuery, DEFAULT_PAGE_LIMIT};
pub use source::{decode_page, FnSource, PageSource, VecSource};
