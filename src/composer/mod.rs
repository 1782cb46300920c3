//! Form state behind the compose, comment and edit views.
//!
//! Each composer owns its draft and talks to the backend only on submit. Submissions
//! return the notice to show, or `None` when nothing should be shown: preconditions
//! not met, or a backend failure (which is logged instead).

pub mod comment;
pub mod editor;
pub mod hashtags;
pub mod image;
pub mod post;

use crate::services::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ComposerError {
    #[error("content is empty")]
    EmptyContent,
    #[error("a submission is already in flight")]
    Busy,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A file picked in a `file-input` control.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
