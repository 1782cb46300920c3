use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::hashtags::HashtagInput;
use super::image::DataUrl;
use super::{ComposerError, SelectedFile};
use crate::i18n::{Notice, TranslationKey};
use crate::models::post::CreatePost;
use crate::models::user::User;
use crate::services::Backend;

/// Shared view of "a submission is in flight". Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct SubmittingFlag(Arc<AtomicBool>);

impl SubmittingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Option<SubmitGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard(self.0.clone()))
    }
}

/// Held for the duration of one submission; releases the flag on drop, whatever the
/// outcome.
#[derive(Debug)]
struct SubmitGuard(Arc<AtomicBool>);

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Draft state of the "new post" form.
#[derive(Debug, Default)]
pub struct PostComposer {
    content: String,
    hashtags: HashtagInput,
    image: Option<DataUrl>,
    submitting: SubmittingFlag,
}

impl PostComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, name: &str, value: &str) {
        if name == "content" {
            self.content = value.to_string();
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn hashtags(&self) -> &HashtagInput {
        &self.hashtags
    }

    pub fn hashtags_mut(&mut self) -> &mut HashtagInput {
        &mut self.hashtags
    }

    /// Stages the chosen file as a data URL, or clears the staged image when nothing
    /// was chosen.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.image = file.map(|f| DataUrl::encode(&f.content_type, &f.bytes));
    }

    pub fn delete_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&DataUrl> {
        self.image.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_set()
    }

    pub fn can_submit(&self) -> bool {
        !self.content.is_empty() && !self.is_submitting()
    }

    /// Publishes the draft. Backend failures are logged and the draft is kept.
    pub async fn submit(&mut self, backend: &Backend, user: &User) -> Option<Notice> {
        let result = self.try_submit(backend, user).await;
        self.finish(result)
    }

    pub async fn try_submit(
        &mut self,
        backend: &Backend,
        user: &User,
    ) -> Result<String, ComposerError> {
        let submission = self.begin_submit()?;
        let id = submission.publish(backend, user).await?;
        self.reset();
        Ok(id)
    }

    /// Snapshots the draft and raises the submitting flag until the returned
    /// [`Submission`] is dropped. The composer itself is not borrowed afterwards, so
    /// callers can release their lock on it while the submission runs.
    pub fn begin_submit(&self) -> Result<Submission, ComposerError> {
        if self.content.is_empty() {
            return Err(ComposerError::EmptyContent);
        }
        let guard = self.submitting.acquire().ok_or(ComposerError::Busy)?;
        Ok(Submission {
            _guard: guard,
            content: self.content.clone(),
            hashtags: self.hashtags.tags().to_vec(),
            image: self.image.clone(),
        })
    }

    /// Applies the outcome of a submission: the draft is cleared on success and kept
    /// otherwise. Returns the notice to show.
    pub fn finish(&mut self, result: Result<String, ComposerError>) -> Option<Notice> {
        match result {
            Ok(id) => {
                info!(%id, "post published");
                self.reset();
                Some(Notice::success(TranslationKey::TOAST_POST_CREATED))
            }
            Err(e @ (ComposerError::EmptyContent | ComposerError::Busy)) => {
                debug!(%e, "post submit skipped");
                None
            }
            Err(e) => {
                error!(error = %e, "failed to publish post");
                None
            }
        }
    }

    fn reset(&mut self) {
        self.content.clear();
        self.hashtags.reset();
        self.image = None;
    }
}

/// One in-flight submission. Holds the submitting flag while alive.
#[derive(Debug)]
pub struct Submission {
    _guard: SubmitGuard,
    content: String,
    hashtags: Vec<String>,
    image: Option<DataUrl>,
}

impl Submission {
    /// Uploads the staged image, if any, then creates the post.
    #[instrument(skip_all, fields(uid = %user.uid, image = self.image.is_some()))]
    pub async fn publish(&self, backend: &Backend, user: &User) -> Result<String, ComposerError> {
        let mut image_url = String::new();
        if let Some(image) = &self.image {
            let key = format!("{}/{}", user.uid, uuid::Uuid::new_v4());
            // an upload followed by a failed create leaves the object behind
            let object = backend.objects.upload_data_url(&key, image).await?;
            image_url = backend.objects.download_url(&object).await?;
        }

        let id = backend
            .posts
            .create_post(CreatePost {
                content: self.content.clone(),
                created_at: backend.clock.created_at(),
                uid: user.uid.clone(),
                email: user.email.clone(),
                hashtags: self.hashtags.clone(),
                image_url,
            })
            .await?;
        Ok(id)
    }
}
