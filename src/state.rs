use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::composer::editor::PostEditor;
use crate::composer::post::PostComposer;
use crate::feed::HomeFeed;
use crate::i18n::Language;
use crate::models::user::User;
use crate::services::Backend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub lang: Language,
    pub sessions: Arc<Sessions>,
}

impl AppState {
    pub fn new(backend: Backend, lang: Language) -> Self {
        Self {
            backend,
            lang,
            sessions: Arc::new(Sessions::default()),
        }
    }
}

/// Per-user view state, keyed by uid: what a browser tab would keep in memory.
#[derive(Default)]
pub struct Sessions {
    composers: DashMap<String, Arc<Mutex<PostComposer>>>,
    editors: DashMap<String, Arc<Mutex<PostEditor>>>,
    feeds: DashMap<String, MountedFeed>,
}

/// A live feed and the number of sockets watching it.
struct MountedFeed {
    feed: Arc<Mutex<HomeFeed>>,
    sockets: usize,
}

impl Sessions {
    pub fn composer(&self, user: &User) -> Arc<Mutex<PostComposer>> {
        self.composers.entry(user.uid.clone()).or_default().clone()
    }

    pub fn editor(&self, user: &User) -> Arc<Mutex<PostEditor>> {
        self.editors.entry(user.uid.clone()).or_default().clone()
    }

    /// The user's feed if a socket currently keeps it mounted.
    pub fn live_feed(&self, user: &User) -> Option<Arc<Mutex<HomeFeed>>> {
        self.feeds.get(&user.uid).map(|mounted| mounted.feed.clone())
    }

    /// Attaches one socket to the user's feed, mounting it for the first one. Every
    /// call must be paired with [`Sessions::disconnect_feed`].
    pub async fn connect_feed(&self, backend: &Backend, user: &User) -> Arc<Mutex<HomeFeed>> {
        if let Some(mut mounted) = self.feeds.get_mut(&user.uid) {
            mounted.sockets += 1;
            return mounted.feed.clone();
        }

        let feed = HomeFeed::mount(backend.posts.clone(), Some(user)).await;
        // another socket may have mounted one meanwhile; the first one wins and ours is
        // dropped, which stops its driver
        let mut mounted = self
            .feeds
            .entry(user.uid.clone())
            .or_insert_with(|| MountedFeed {
                feed: Arc::new(Mutex::new(feed)),
                sockets: 0,
            });
        mounted.sockets += 1;
        debug!(uid = %user.uid, sockets = mounted.sockets, "feed socket attached");
        mounted.feed.clone()
    }

    /// Detaches one socket. The last one out unmounts the feed.
    pub async fn disconnect_feed(&self, user: &User) {
        if let Some(mut mounted) = self.feeds.get_mut(&user.uid) {
            mounted.sockets = mounted.sockets.saturating_sub(1);
        }
        if let Some((_, mounted)) = self.feeds.remove_if(&user.uid, |_, m| m.sockets == 0) {
            mounted.feed.lock().await.stop().await;
            debug!(uid = %user.uid, "last feed socket gone, feed unmounted");
        }
    }

    /// Tears the user's views down, releasing the feed's subscriptions.
    pub async fn end(&self, user: &User) {
        self.composers.remove(&user.uid);
        self.editors.remove(&user.uid);
        if let Some((_, mounted)) = self.feeds.remove(&user.uid) {
            mounted.feed.lock().await.stop().await;
        }
    }

    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }
}
