//! Where pages come from.

use crate::pagination::error::PageSourceError;
use crate::pagination::query::PageQuery;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;

/// A backend query function: given `{offset, limit, ...filters}`, return that page.
///
/// `Ok(None)` is a valid answer and counts as an empty page.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: Clone + Send + Sync + 'static;

    async fn fetch_page(&self, query: PageQuery)
        -> Result<Option<Vec<Self::Record>>, PageSourceError>;
}

/// Decode a raw JSON list response into a page.
///
/// `null` means the backend sent nothing and counts as an empty page. Anything else must
/// be an array of records.
pub fn decode_page<R: DeserializeOwned>(body: Value) -> Result<Option<Vec<R>>, PageSourceError> {
    if body.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(body)?))
}

/// Adapts an async closure into a [`PageSource`].
///
/// ```rust
/// use fieldcart::pagination::{FnSource, PageQuery, PageSourceError};
///
/// let source: FnSource<_, u32> = FnSource::new(|query: PageQuery| async move {
///     let page: Vec<u32> = (query.offset as u32..).take(query.limit).collect();
///     Ok::<_, PageSourceError>(Some(page))
/// });
/// # let _ = source;
/// ```
pub struct FnSource<F, R> {
    fetch: F,
    _record: PhantomData<fn() -> R>,
}

impl<F, R> FnSource<F, R> {
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, R> PageSource for FnSource<F, R>
where
    F: Fn(PageQuery) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<Vec<R>>, PageSourceError>> + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    type Record = R;

    async fn fetch_page(&self, query: PageQuery) -> Result<Option<Vec<R>>, PageSourceError> {
        (self.fetch)(query).await
    }
}

/// Serves pages out of a fixed list. Filters are ignored.
#[derive(Debug, Clone, Default)]
pub struct VecSource<R> {
    records: Vec<R>,
}

impl<R> VecSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<R> PageSource for VecSource<R>
where
    R: Clone + Send + Sync + 'static,
{
    type Record = R;

    async fn fetch_page(&self, query: PageQuery) -> Result<Option<Vec<R>>, PageSourceError> {
        let page = self
            .records
            .iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();
        Ok(Some(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct Lead {
        id: u32,
        name: String,
    }

    #[test]
    fn test_decode_page() {
        let page: Option<Vec<Lead>> = decode_page(json!([{"id": 1, "name": "Acme"}])).unwrap();
        assert_eq!(page, Some(vec![Lead { id: 1, name: "Acme".into() }]));
        assert_eq!(decode_page::<Lead>(Value::Null).unwrap(), None);

        let err = decode_page::<Lead>(json!({"error": "session expired"})).unwrap_err();
        assert!(matches!(err, PageSourceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_vec_source_slices_by_offset_and_limit() {
        let source = VecSource::new((0..7).collect::<Vec<u32>>());
        let page = source.fetch_page(PageQuery::new(5, 5, Map::new())).await.unwrap();
        assert_eq!(page, Some(vec![5, 6]));
        let past_end = source.fetch_page(PageQuery::new(10, 5, Map::new())).await.unwrap();
        assert_eq!(past_end, Some(vec![]));
    }

    #[tokio::test]
    async fn test_fn_source_forwards_query() {
        let source = FnSource::new(|query: PageQuery| async move {
            Ok(Some(vec![(query.offset, query.limit)]))
        });
        let page = source.fetch_page(PageQuery::new(3, 9, Map::new())).await.unwrap();
        assert_eq!(page, Some(vec![(3, 9)]));
    }
}
