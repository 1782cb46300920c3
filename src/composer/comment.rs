use tracing::{error, info};

use crate::i18n::{Notice, TranslationKey};
use crate::models::post::{Comment, Post};
use crate::models::user::User;
use crate::services::Backend;

#[derive(Debug, Default)]
pub struct CommentComposer {
    comment: String,
}

impl CommentComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, name: &str, value: &str) {
        if name == "comment" {
            self.comment = value.to_string();
        }
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn can_submit(&self) -> bool {
        !self.comment.is_empty()
    }

    /// Appends the comment to `post`. Does nothing without a post or a user.
    pub async fn submit(
        &mut self,
        backend: &Backend,
        post: Option<&Post>,
        user: Option<&User>,
    ) -> Option<Notice> {
        let (post, user) = post.zip(user)?;

        let comment = Comment {
            comment: self.comment.clone(),
            uid: user.uid.clone(),
            email: user.email.clone(),
            created_at: backend.clock.created_at(),
        };

        match backend.posts.append_comment(&post.id, comment).await {
            Ok(()) => {
                info!(post = %post.id, uid = %user.uid, "comment added");
                self.comment.clear();
                Some(Notice::success(TranslationKey::TOAST_COMMENT_CREATED))
            }
            Err(e) => {
                error!(post = %post.id, error = %e, "failed to add comment");
                None
            }
        }
    }
}
