use std::cmp::Ordering;

use crate::models::post::Post;

/// The two post queries the home feed issues. Both order by `createdAt` descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostQuery {
    All,
    /// `uid in [...]`
    AuthorIn(Vec<String>),
}

impl PostQuery {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostQuery::All => true,
            PostQuery::AuthorIn(uids) => uids.iter().any(|uid| *uid == post.uid),
        }
    }

    /// Runs the query over `posts`, given in insertion order.
    ///
    /// `createdAt` is compared as a string, like the hosted backend does for string
    /// fields. Equal values keep the newer document first.
    pub fn run<'a>(&self, posts: impl IntoIterator<Item = &'a Post>) -> Vec<Post> {
        let mut out: Vec<Post> = posts
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        out.reverse();
        out.sort_by(|a, b| newest_first(a, b));
        out
    }
}

fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.created_at.cmp(&a.created_at)
}
