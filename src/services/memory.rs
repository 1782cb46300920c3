use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{
    ObjectRef, ObjectStore, PostQuery, PostStore, StoreError, StoreResult, StoredObject,
    Subscription,
};
use crate::background::posts_broker::PostsBroker;
use crate::composer::image::DataUrl;
use crate::models::following::{FollowedUser, FollowingList};
use crate::models::post::{Comment, CreatePost, Post};

#[derive(Default)]
struct Documents {
    /// insertion order
    posts: Vec<Post>,
    following: std::collections::HashMap<String, FollowingList>,
}

/// In-process stand-in for the hosted document database and object store.
///
/// Writes are serialized through one lock and published to live queries while it is
/// held, so subscribers observe snapshots in write order.
pub struct MemoryBackend {
    docs: Mutex<Documents>,
    objects: DashMap<String, StoredObject>,
    broker: Arc<PostsBroker>,
    media_base_url: String,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_uploads: AtomicBool,
}

impl MemoryBackend {
    pub fn new(media_base_url: impl Into<String>) -> Self {
        Self {
            docs: Mutex::new(Documents::default()),
            objects: DashMap::new(),
            broker: PostsBroker::new(),
            media_base_url: media_base_url.into().trim_end_matches('/').to_string(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn broker(&self) -> &PostsBroker {
        &self.broker
    }

    /// Makes single-document reads fail as if the backend were unreachable.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every document write fail as if the backend were unreachable.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn check_writes(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("document writes are failing".into()));
        }
        Ok(())
    }

    async fn modify_following(
        &self,
        uid: &str,
        f: impl FnOnce(&mut FollowingList),
    ) -> StoreResult<()> {
        self.check_writes()?;
        if uid.is_empty() {
            return Err(StoreError::InvalidArgument("empty uid".into()));
        }

        let mut docs = self.docs.lock().await;
        let list = docs.following.entry(uid.to_string()).or_default();
        f(list);
        let list = list.clone();
        self.broker.publish_following(uid, Some(&list));
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new("/media")
    }
}

#[async_trait]
impl PostStore for MemoryBackend {
    #[instrument(skip_all, fields(uid = %post.uid))]
    async fn create_post(&self, post: CreatePost) -> StoreResult<String> {
        self.check_writes()?;

        let id = uuid::Uuid::now_v7().simple().to_string();
        let mut docs = self.docs.lock().await;
        docs.posts.push(post.into_post(id.clone()));
        self.broker.publish_posts(&docs.posts);
        debug!(%id, "post created");
        Ok(id)
    }

    async fn get_post(&self, id: &str) -> StoreResult<Post> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("document reads are failing".into()));
        }
        let docs = self.docs.lock().await;
        docs.posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("posts/{id}")))
    }

    #[instrument(skip(self, content))]
    async fn update_post_content(&self, id: &str, content: &str) -> StoreResult<()> {
        self.check_writes()?;

        let mut docs = self.docs.lock().await;
        let post = docs
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("posts/{id}")))?;
        post.content = content.to_string();
        self.broker.publish_posts(&docs.posts);
        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn append_comment(&self, id: &str, comment: Comment) -> StoreResult<()> {
        self.check_writes()?;

        let mut docs = self.docs.lock().await;
        let post = docs
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("posts/{id}")))?;
        let comments = post.comments.get_or_insert_with(Vec::new);
        if comments.contains(&comment) {
            debug!("identical comment already present");
            return Ok(());
        }
        comments.push(comment);
        self.broker.publish_posts(&docs.posts);
        Ok(())
    }

    async fn watch_posts(&self, query: PostQuery) -> StoreResult<Subscription<Vec<Post>>> {
        let docs = self.docs.lock().await;
        let snapshot = query.run(&docs.posts);
        Ok(self.broker.subscribe_posts(query, snapshot))
    }

    async fn watch_following(
        &self,
        uid: &str,
    ) -> StoreResult<Subscription<Option<FollowingList>>> {
        let docs = self.docs.lock().await;
        let snapshot = docs.following.get(uid).cloned();
        Ok(self.broker.subscribe_following(uid, snapshot))
    }

    async fn follow(&self, uid: &str, target: &str) -> StoreResult<()> {
        let target = target.to_string();
        self.modify_following(uid, |list| {
            if !list.contains(&target) {
                list.users.push(FollowedUser { id: target });
            }
        })
        .await
    }

    async fn unfollow(&self, uid: &str, target: &str) -> StoreResult<()> {
        self.modify_following(uid, |list| list.users.retain(|u| u.id != target))
            .await
    }
}

#[async_trait]
impl ObjectStore for MemoryBackend {
    #[instrument(skip(self, data), fields(mime = %data.mime()))]
    async fn upload_data_url(&self, key: &str, data: &DataUrl) -> StoreResult<ObjectRef> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("uploads are failing".into()));
        }
        if key.is_empty() || key.split('/').any(|seg| seg.is_empty() || seg == "..") {
            return Err(StoreError::InvalidArgument(format!("bad object key {key:?}")));
        }

        let bytes = data
            .decode()
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))?;
        debug!(size = bytes.len(), "object stored");
        self.objects.insert(
            key.to_string(),
            StoredObject {
                content_type: data.mime().to_string(),
                bytes,
            },
        );
        Ok(ObjectRef {
            key: key.to_string(),
        })
    }

    async fn download_url(&self, object: &ObjectRef) -> StoreResult<String> {
        if !self.objects.contains_key(&object.key) {
            return Err(StoreError::NotFound(object.key.clone()));
        }
        Ok(format!("{}/{}", self.media_base_url, object.key))
    }

    async fn get_object(&self, key: &str) -> StoreResult<StoredObject> {
        self.objects
            .get(key)
            .map(|o| o.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}
