//! Page requests and caller-supplied filters.

use crate::lenient::coerce_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// What a screen asks for: an optional page size plus any backend filters
/// (search term, state, partner, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Page size to request. Zero counts as unset.
    pub fn effective_limit(&self, default_limit: usize) -> usize {
        self.limit.filter(|limit| *limit > 0).unwrap_or(default_limit).max(1)
    }
}

impl From<Map<String, Value>> for Filters {
    /// Splits a loose JSON object into a limit and the remaining filter fields.
    fn from(mut fields: Map<String, Value>) -> Self {
        let limit = fields
            .remove("limit")
            .map(|v| coerce_number(&v))
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize);
        Self { limit, fields }
    }
}

/// One request to a [`PageSource`](crate::pagination::PageSource).
///
/// Serializes flat as `{"offset": .., "limit": .., ...filters}`, the shape the backend
/// list endpoints take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    pub offset: usize,
    pub limit: usize,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl PageQuery {
    /// Build a query. `offset` and `limit` keys inside `filters` are dropped so they
    /// cannot contradict the paging fields.
    pub fn new(offset: usize, limit: usize, mut filters: Map<String, Value>) -> Self {
        filters.remove("offset");
        filters.remove("limit");
        Self { offset, limit, filters }
    }

    pub fn filter(&self, key: &str) -> Option<&Value> {
        self.filters.get(key)
    }
}
