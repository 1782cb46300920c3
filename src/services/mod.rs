pub mod memory;
pub mod query;

use std::sync::Arc;

use axum::async_trait;
use tokio::sync::watch;

use crate::clock::Clock;
use crate::composer::image::DataUrl;
use crate::models::following::FollowingList;
use crate::models::post::{Comment, CreatePost, Post};

pub use query::PostQuery;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything a composer or the feed talks to.
#[derive(Clone)]
pub struct Backend {
    pub posts: Arc<dyn PostStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub clock: Arc<dyn Clock>,
}

impl Backend {
    pub fn in_memory(store: Arc<memory::MemoryBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: store.clone(),
            objects: store,
            clock,
        }
    }

    /// A fresh in-memory backend whose clock is frozen at `rfc3339`.
    #[cfg(test)]
    pub(crate) fn in_memory_at(rfc3339: &str) -> (Arc<memory::MemoryBackend>, Self) {
        let at = chrono::DateTime::parse_from_rfc3339(rfc3339).unwrap();
        let store = Arc::new(memory::MemoryBackend::default());
        let backend = Self::in_memory(store.clone(), Arc::new(crate::clock::FixedClock(at)));
        (store, backend)
    }
}

/// Document side of the backend: the `posts` collection, the `following` records and
/// live queries over both.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    async fn create_post(&self, post: CreatePost) -> StoreResult<String>;
    async fn get_post(&self, id: &str) -> StoreResult<Post>;
    /// Updates `content` only.
    async fn update_post_content(&self, id: &str, content: &str) -> StoreResult<()>;
    /// Array-union append to `comments`: atomic with respect to other appenders, and a
    /// comment equal to one already present is not added again.
    async fn append_comment(&self, id: &str, comment: Comment) -> StoreResult<()>;

    /// Live query over posts. The first value is the current result set; every
    /// change to a matching document replaces it with a new full snapshot.
    async fn watch_posts(&self, query: PostQuery) -> StoreResult<Subscription<Vec<Post>>>;
    /// Live view of `following/{uid}`. `None` while the record does not exist.
    async fn watch_following(&self, uid: &str)
        -> StoreResult<Subscription<Option<FollowingList>>>;

    async fn follow(&self, uid: &str, target: &str) -> StoreResult<()>;
    async fn unfollow(&self, uid: &str, target: &str) -> StoreResult<()>;
}

/// Object side of the backend.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Stores the decoded payload of `data` under `key`.
    async fn upload_data_url(&self, key: &str, data: &DataUrl) -> StoreResult<ObjectRef>;
    async fn download_url(&self, object: &ObjectRef) -> StoreResult<String>;
    async fn get_object(&self, key: &str) -> StoreResult<StoredObject>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub key: String,
}

type Cancel = Box<dyn FnOnce() + Send + Sync>;

/// A live query handle. Dropping it unsubscribes.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    cancel: Option<Cancel>,
}

impl<T> Subscription<T> {
    pub fn new(rx: watch::Receiver<T>, cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            rx,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Waits for the next snapshot. Errors once the backend side went away.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }

    /// Latest snapshot, marking it as seen.
    pub fn latest(&mut self) -> T
    where
        T: Clone,
    {
        self.rx.borrow_and_update().clone()
    }

}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
