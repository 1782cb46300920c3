use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::models::following::FollowingList;
use crate::models::post::Post;
use crate::services::{PostQuery, Subscription};

enum Topic {
    Posts {
        query: PostQuery,
        tx: watch::Sender<Vec<Post>>,
    },
    Following {
        uid: String,
        tx: watch::Sender<Option<FollowingList>>,
    },
}

struct Subscriber {
    topic: Topic,
}

/// Fan-out of live query snapshots.
///
/// Every subscriber owns a watch channel. After a write the store calls one of the
/// `publish_*` methods with the full state and each subscriber gets its re-evaluated
/// result, only if it changed.
pub struct PostsBroker {
    subscriptions: DashMap<uuid::Uuid, Subscriber>,
    issued: AtomicUsize,
}

impl PostsBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            subscriptions: DashMap::new(),
            issued: AtomicUsize::new(0),
        })
    }

    pub fn subscribe_posts(
        self: &Arc<Self>,
        query: PostQuery,
        snapshot: Vec<Post>,
    ) -> Subscription<Vec<Post>> {
        let (tx, rx) = watch::channel(snapshot);
        self.register(Topic::Posts { query, tx }, rx)
    }

    pub fn subscribe_following(
        self: &Arc<Self>,
        uid: &str,
        snapshot: Option<FollowingList>,
    ) -> Subscription<Option<FollowingList>> {
        let (tx, rx) = watch::channel(snapshot);
        let topic = Topic::Following {
            uid: uid.to_string(),
            tx,
        };
        self.register(topic, rx)
    }

    fn register<T>(self: &Arc<Self>, topic: Topic, rx: watch::Receiver<T>) -> Subscription<T> {
        let id = uuid::Uuid::now_v7();
        self.subscriptions.insert(id, Subscriber { topic });
        self.issued.fetch_add(1, Ordering::Relaxed);
        debug!(%id, "subscribed");

        let broker: Weak<Self> = Arc::downgrade(self);
        Subscription::new(rx, move || {
            if let Some(broker) = broker.upgrade() {
                broker.unsubscribe(&id);
            }
        })
    }

    pub fn unsubscribe(&self, id: &uuid::Uuid) -> Option<()> {
        let removed = self.subscriptions.remove(id).map(|_| ());
        if removed.is_some() {
            debug!(%id, "unsubscribed");
        }
        removed
    }

    pub fn publish_posts(&self, posts: &[Post]) {
        for sub in self.subscriptions.iter() {
            if let Topic::Posts { query, tx } = &sub.topic {
                let result = query.run(posts);
                let sent = tx.send_if_modified(|current| {
                    if *current == result {
                        return false;
                    }
                    *current = result;
                    true
                });
                if sent {
                    trace!(id = %sub.key(), ?query, "pushed posts snapshot");
                }
            }
        }
    }

    pub fn publish_following(&self, owner: &str, list: Option<&FollowingList>) {
        for sub in self.subscriptions.iter() {
            if let Topic::Following { uid, tx } = &sub.topic {
                if uid != owner {
                    continue;
                }
                // every write to the record is a push, even an identical one
                tx.send_replace(list.cloned());
                trace!(id = %sub.key(), %uid, "pushed following snapshot");
            }
        }
    }

    /// Subscriptions currently registered.
    pub fn active(&self) -> usize {
        self.subscriptions.len()
    }

    /// Subscriptions ever issued.
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn not_pushed<T>(sub: &mut Subscription<T>) -> bool {
        tokio::time::timeout(Duration::from_millis(50), sub.changed())
            .await
            .is_err()
    }

    fn post(id: &str, uid: &str, created_at: &str) -> Post {
        Post {
            id: id.into(),
            uid: uid.into(),
            created_at: created_at.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn only_changed_results_are_pushed() {
        let broker = PostsBroker::new();
        let mut all = broker.subscribe_posts(PostQuery::All, vec![]);
        let mut mine = broker.subscribe_posts(PostQuery::AuthorIn(vec!["u1".into()]), vec![]);

        let posts = vec![post("a", "u2", "1")];
        broker.publish_posts(&posts);

        all.changed().await.unwrap();
        assert_eq!(all.latest().len(), 1);
        assert!(not_pushed(&mut mine).await);

        broker.publish_posts(&posts);
        assert!(not_pushed(&mut all).await);
    }

    #[test]
    fn dropping_the_handle_unsubscribes() {
        let broker = PostsBroker::new();
        let sub = broker.subscribe_following("u1", None);
        let other = broker.subscribe_posts(PostQuery::All, vec![]);
        assert_eq!(broker.active(), 2);

        drop(sub);
        assert_eq!(broker.active(), 1);
        drop(other);
        assert_eq!(broker.active(), 0);
        assert_eq!(broker.issued(), 2);
    }

    #[tokio::test]
    async fn following_pushes_only_to_owner() {
        let broker = PostsBroker::new();
        let mut u1 = broker.subscribe_following("u1", None);
        let mut u2 = broker.subscribe_following("u2", None);

        broker.publish_following("u1", Some(&FollowingList::default()));

        u1.changed().await.unwrap();
        assert_eq!(u1.latest(), Some(FollowingList::default()));
        assert!(not_pushed(&mut u2).await);
        assert_eq!(u2.latest(), None);
    }
}
