use tracing::{debug, error, info};

use super::SelectedFile;
use crate::i18n::{Notice, TranslationKey};
use crate::models::post::Post;
use crate::services::Backend;

/// What a successful edit asks the view to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited {
    pub notice: Notice,
    pub navigate_to: String,
}

/// Edit form for an existing post. Only `content` can be changed.
#[derive(Debug, Default)]
pub struct PostEditor {
    content: String,
    post: Option<Post>,
    loaded_id: Option<String>,
}

impl PostEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the post for `id` and seeds the field with its content. Loading an id that
    /// is already loaded keeps the draft; a failed load is retried on the next call.
    pub async fn load(&mut self, backend: &Backend, id: Option<&str>) {
        let Some(id) = id else { return };
        if self.loaded_id.as_deref() == Some(id) {
            debug!(%id, "post already loaded");
            return;
        }

        match backend.posts.get_post(id).await {
            Ok(post) => {
                self.content = post.content.clone();
                self.post = Some(post);
                self.loaded_id = Some(id.to_string());
            }
            Err(e) => {
                error!(%id, error = %e, "failed to load post");
                self.content.clear();
                self.post = None;
                self.loaded_id = None;
            }
        }
    }

    /// Opening the edit view always refetches, dropping any earlier draft.
    pub async fn open(&mut self, backend: &Backend, id: &str) {
        self.loaded_id = None;
        self.load(backend, Some(id)).await;
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn on_change(&mut self, name: &str, value: &str) {
        if name == "content" {
            self.content = value.to_string();
        }
    }

    /// Image replacement is not supported when editing; the selection is ignored.
    pub fn handle_file_upload(&mut self, _file: Option<SelectedFile>) {}

    pub async fn submit(&mut self, backend: &Backend) -> Option<Edited> {
        let post = self.post.as_mut()?;

        match backend.posts.update_post_content(&post.id, &self.content).await {
            Ok(()) => {
                info!(post = %post.id, "post updated");
                post.content = self.content.clone();
                Some(Edited {
                    notice: Notice::success(TranslationKey::TOAST_POST_UPDATED),
                    navigate_to: post.path(),
                })
            }
            Err(e) => {
                error!(post = %post.id, error = %e, "failed to update post");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::post::CreatePost;
    use crate::services::memory::MemoryBackend;
    use crate::services::PostStore;

    async fn seed(store: &Arc<MemoryBackend>, content: &str) -> String {
        store
            .create_post(CreatePost {
                content: content.into(),
                created_at: "2024. 1. 5. 오전 09:00:00".into(),
                uid: "U1".into(),
                email: "u1@example.com".into(),
                hashtags: vec!["keep".into()],
                image_url: "/media/U1/img".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replaces_only_the_content() {
        let (store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let id = seed(&store, "old text").await;
        let before = store.get_post(&id).await.unwrap();

        let mut editor = PostEditor::new();
        editor.load(&backend, Some(&id)).await;
        assert_eq!(editor.content(), "old text");

        editor.on_change("content", "new text");
        let edited = editor.submit(&backend).await.unwrap();
        assert_eq!(edited.navigate_to, format!("posts/{id}"));
        assert_eq!(edited.notice, Notice::success(TranslationKey::TOAST_POST_UPDATED));

        let after = store.get_post(&id).await.unwrap();
        assert_eq!(after.content, "new text");
        assert_eq!(
            Post {
                content: before.content.clone(),
                ..after
            },
            before
        );
    }

    #[tokio::test]
    async fn loads_once_per_id() {
        let (store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let first = seed(&store, "first").await;
        let second = seed(&store, "second").await;

        let mut editor = PostEditor::new();
        editor.load(&backend, Some(&first)).await;
        editor.on_change("content", "typing");

        // same id: the draft survives
        editor.load(&backend, Some(&first)).await;
        assert_eq!(editor.content(), "typing");

        editor.load(&backend, Some(&second)).await;
        assert_eq!(editor.content(), "second");
        assert_eq!(editor.post().map(|p| p.id.as_str()), Some(second.as_str()));
    }

    #[tokio::test]
    async fn submit_without_post_is_a_no_op() {
        let (_store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let mut editor = PostEditor::new();
        editor.load(&backend, None).await;
        editor.on_change("content", "x");
        assert_eq!(editor.submit(&backend).await, None);

        editor.load(&backend, Some("missing")).await;
        assert!(editor.post().is_none());
        assert_eq!(editor.submit(&backend).await, None);
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let (store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let id = seed(&store, "text").await;

        let mut editor = PostEditor::new();
        store.fail_reads(true);
        editor.load(&backend, Some(&id)).await;
        assert!(editor.post().is_none());
        assert_eq!(editor.content(), "");

        store.fail_reads(false);
        editor.load(&backend, Some(&id)).await;
        assert_eq!(editor.content(), "text");

        editor.on_change("content", "fixed");
        assert!(editor.submit(&backend).await.is_some());
        assert_eq!(store.get_post(&id).await.unwrap().content, "fixed");
    }

    #[tokio::test]
    async fn open_refetches_the_same_id() {
        let (store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let id = seed(&store, "first").await;

        let mut editor = PostEditor::new();
        editor.open(&backend, &id).await;
        editor.on_change("content", "abandoned draft");
        store.update_post_content(&id, "changed elsewhere").await.unwrap();

        editor.open(&backend, &id).await;
        assert_eq!(editor.content(), "changed elsewhere");
    }

    #[tokio::test]
    async fn file_selection_is_ignored() {
        let (store, backend) = Backend::in_memory_at("2024-01-05T15:04:05+09:00");
        let id = seed(&store, "text").await;

        let mut editor = PostEditor::new();
        editor.load(&backend, Some(&id)).await;
        editor.handle_file_upload(Some(SelectedFile {
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        }));
        editor.submit(&backend).await.unwrap();

        assert_eq!(store.object_count(), 0);
        assert_eq!(
            store.get_post(&id).await.unwrap().image_url.as_deref(),
            Some("/media/U1/img")
        );
    }
}
