//! # Scripted Page Source
//!
//! A [`PageSource`] for tests. Queue up the answers the backend should give, in order,
//! then inspect the queries the paginator actually sent.
//!
//! ```rust
//! use fieldcart::pagination::{mock::ScriptedSource, Filters, Paginator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = ScriptedSource::new();
//!     source.push_page(vec![1, 2, 3]);
//!
//!     let paginator = Paginator::with_default_limit(source, 5);
//!     paginator.fetch_data(Filters::new()).await.unwrap();
//!     assert!(paginator.all_data_loaded());
//!
//!     paginator.source().verify();
//! }
//! ```
//!
//! [`ScriptedSource::push_held`] leaves a request hanging until the test releases it,
//! which is how the `loading` window is observed.

use crate::pagination::error::PageSourceError;
use crate::pagination::query::PageQuery;
use crate::pagination::source::PageSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;

type PageResult<R> = Result<Option<Vec<R>>, PageSourceError>;

enum Scripted<R> {
    Ready(PageResult<R>),
    Held(oneshot::Receiver<PageResult<R>>),
}

/// Releases a held response.
pub struct HeldPage<R> {
    sender: oneshot::Sender<PageResult<R>>,
}

impl<R> HeldPage<R> {
    pub fn release(self, page: Vec<R>) {
        let _ = self.sender.send(Ok(Some(page)));
    }

    pub fn fail(self, message: impl Into<String>) {
        let _ = self.sender.send(Err(PageSourceError::Backend(message.into())));
    }
}

/// Page source answering from a script.
pub struct ScriptedSource<R> {
    script: Mutex<VecDeque<Scripted<R>>>,
    calls: Mutex<Vec<PageQuery>>,
}

impl<R> ScriptedSource<R> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, entry: Scripted<R>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(entry);
    }

    pub fn push_page(&self, page: Vec<R>) {
        self.push(Scripted::Ready(Ok(Some(page))));
    }

    /// The backend answers with nothing at all (`null`).
    pub fn push_none(&self) {
        self.push(Scripted::Ready(Ok(None)));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.push(Scripted::Ready(Err(PageSourceError::Backend(message.into()))));
    }

    /// Queue a response that stays pending until the returned handle is used.
    pub fn push_held(&self) -> HeldPage<R> {
        let (sender, receiver) = oneshot::channel();
        self.push(Scripted::Held(receiver));
        HeldPage { sender }
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<PageQuery> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Panics unless every scripted response has been consumed.
    pub fn verify(&self) {
        let remaining = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all scripted pages were requested. {remaining} remaining");
        }
    }
}

impl<R> Default for ScriptedSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> PageSource for ScriptedSource<R>
where
    R: Clone + Send + Sync + 'static,
{
    type Record = R;

    async fn fetch_page(&self, query: PageQuery) -> PageResult<R> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Held(receiver)) => receiver.await.unwrap_or_else(|_| {
                Err(PageSourceError::Backend("held page dropped".to_string()))
            }),
            None => Err(PageSourceError::Backend(format!(
                "no scripted page for offset {}",
                query.offset
            ))),
        }
    }
}
