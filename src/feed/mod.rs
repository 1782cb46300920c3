use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::models::following::{followed_ids, FollowingList};
use crate::models::post::Post;
use crate::models::user::User;
use crate::services::{PostQuery, PostStore, StoreResult, Subscription};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    #[default]
    All,
    Following,
}

impl FeedTab {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedTab::All => "all",
            FeedTab::Following => "following",
        }
    }
}

/// Both tab lists as last pushed by their live queries.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedLists {
    pub all: Vec<Post>,
    pub following: Vec<Post>,
    pub following_ids: Vec<String>,
}

impl Default for FeedLists {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            following: Vec::new(),
            following_ids: followed_ids(None),
        }
    }
}

impl FeedLists {
    pub fn tab(&self, tab: FeedTab) -> &[Post] {
        match tab {
            FeedTab::All => &self.all,
            FeedTab::Following => &self.following,
        }
    }
}

/// The home timeline of one signed-in user.
///
/// Mounting starts a driver task that owns every live subscription; the feed itself
/// only reads the lists the driver publishes. Switching tabs is purely local.
/// Unmounting (or dropping) the feed stops the driver, which drops its subscriptions.
pub struct HomeFeed {
    lists: watch::Receiver<FeedLists>,
    active_tab: FeedTab,
    driver: Option<JoinHandle<()>>,
}

impl HomeFeed {
    pub async fn mount(store: Arc<dyn PostStore>, user: Option<&User>) -> Self {
        let (tx, lists) = watch::channel(FeedLists::default());
        let mut feed = Self {
            lists,
            active_tab: FeedTab::default(),
            driver: None,
        };

        let Some(user) = user else {
            debug!("no user, feed stays empty");
            return feed;
        };

        match FeedDriver::start(store, &user.uid, tx).await {
            Ok(driver) => {
                info!(uid = %user.uid, "home feed mounted");
                feed.driver = Some(tokio::spawn(driver.run()));
            }
            Err(e) => error!(uid = %user.uid, error = %e, "failed to subscribe home feed"),
        }
        feed
    }

    pub fn select_tab(&mut self, tab: FeedTab) {
        self.active_tab = tab;
    }

    pub fn active_tab(&self) -> FeedTab {
        self.active_tab
    }

    /// The list the active tab shows.
    pub fn visible(&self) -> Vec<Post> {
        self.lists.borrow().tab(self.active_tab).to_vec()
    }

    pub fn lists(&self) -> FeedLists {
        self.lists.borrow().clone()
    }

    /// Notified every time either list (or the followed ids) changes.
    pub fn changes(&self) -> watch::Receiver<FeedLists> {
        self.lists.clone()
    }

    pub fn is_live(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| !d.is_finished())
    }

    /// Stops the driver and waits until its subscriptions are released.
    pub async fn unmount(mut self) {
        self.stop().await;
    }

    /// Like [`HomeFeed::unmount`] for a feed shared behind a lock. The lists keep
    /// their last values; nothing is pushed afterwards.
    pub async fn stop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
            let _ = driver.await;
            debug!("home feed unmounted");
        }
    }
}

impl Drop for HomeFeed {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

struct FeedDriver {
    store: Arc<dyn PostStore>,
    following: Subscription<Option<FollowingList>>,
    all: Subscription<Vec<Post>>,
    following_posts: Subscription<Vec<Post>>,
    tx: watch::Sender<FeedLists>,
}

async fn subscribe_posts(
    store: &dyn PostStore,
    ids: &[String],
) -> StoreResult<(Subscription<Vec<Post>>, Subscription<Vec<Post>>)> {
    let all = store.watch_posts(PostQuery::All).await?;
    let following = store
        .watch_posts(PostQuery::AuthorIn(ids.to_vec()))
        .await?;
    Ok((all, following))
}

impl FeedDriver {
    async fn start(
        store: Arc<dyn PostStore>,
        uid: &str,
        tx: watch::Sender<FeedLists>,
    ) -> StoreResult<Self> {
        let mut following = store.watch_following(uid).await?;
        let ids = followed_ids(following.latest().as_ref());
        let (all, following_posts) = subscribe_posts(store.as_ref(), &ids).await?;

        let mut driver = Self {
            store,
            following,
            all,
            following_posts,
            tx,
        };
        driver.publish_queries(ids);
        Ok(driver)
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                res = self.following.changed() => {
                    if res.is_err() {
                        warn!("following record stream closed");
                        break;
                    }
                    self.refresh_following().await;
                }
                res = self.all.changed() => {
                    if res.is_err() {
                        warn!("all-posts stream closed");
                        break;
                    }
                    self.publish_all();
                }
                res = self.following_posts.changed() => {
                    if res.is_err() {
                        warn!("following-posts stream closed");
                        break;
                    }
                    self.publish_following_posts();
                }
                _ = self.tx.closed() => {
                    debug!("no feed readers left");
                    break;
                }
            }
        }
    }

    /// The followed ids changed: reissue both post queries with the new ids. The
    /// previous subscriptions are dropped, which unsubscribes them.
    #[instrument(skip_all)]
    async fn refresh_following(&mut self) {
        let ids = followed_ids(self.following.latest().as_ref());
        debug!(?ids, "followed ids changed");

        match subscribe_posts(self.store.as_ref(), &ids).await {
            Ok((all, following_posts)) => {
                self.all = all;
                self.following_posts = following_posts;
                self.publish_queries(ids);
            }
            Err(e) => error!(error = %e, "failed to resubscribe post queries"),
        }
    }

    /// Publishes the ids together with the first snapshots of the queries built on them.
    fn publish_queries(&mut self, ids: Vec<String>) {
        let all = self.all.latest();
        let following = self.following_posts.latest();
        self.tx.send_modify(|lists| {
            lists.following_ids = ids;
            lists.all = all;
            lists.following = following;
        });
    }

    fn publish_all(&mut self) {
        let posts = self.all.latest();
        self.tx.send_modify(|lists| lists.all = posts);
    }

    fn publish_following_posts(&mut self) {
        let posts = self.following_posts.latest();
        self.tx.send_modify(|lists| lists.following = posts);
    }
}
