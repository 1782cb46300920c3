use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Router};
use maud::{html, Markup};
use serde::Deserialize;
use tracing::debug;

use crate::auth::SignedIn;
use crate::components::{post_form, toast};
use crate::composer::post::PostComposer;
use crate::composer::SelectedFile;
use crate::error::AppError;
use crate::i18n::{Language, Notice};
use crate::state::AppState;

pub(super) fn form_with_toast(composer: &PostComposer, notice: Option<Notice>, lang: Language) -> Markup {
    html! {
        ( post_form::render(composer, lang) )
        ( toast::render(notice, lang) )
    }
}

#[derive(Deserialize)]
struct ContentForm {
    #[serde(default)]
    content: String,
}

async fn set_content(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Form(f): Form<ContentForm>,
) -> StatusCode {
    let composer = state.sessions.composer(&user);
    composer.lock().await.on_change("content", &f.content);
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
struct HashtagForm {
    #[serde(default)]
    hashtag: String,
    #[serde(default)]
    key: String,
}

async fn hashtag_key_up(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Form(f): Form<HashtagForm>,
) -> Markup {
    let composer = state.sessions.composer(&user);
    let mut composer = composer.lock().await;
    composer.hashtags_mut().on_change(&f.hashtag);
    let notice = composer.hashtags_mut().on_key_up(&f.key, &f.hashtag);
    form_with_toast(&composer, notice, state.lang)
}

#[derive(Deserialize)]
struct RemoveHashtagForm {
    tag: String,
}

async fn remove_hashtag(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Form(RemoveHashtagForm { tag }): Form<RemoveHashtagForm>,
) -> Markup {
    let composer = state.sessions.composer(&user);
    let mut composer = composer.lock().await;
    composer.hashtags_mut().remove(&tag);
    form_with_toast(&composer, None, state.lang)
}

async fn select_image(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    mut multipart: Multipart,
) -> Result<Markup, AppError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file-input") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if !bytes.is_empty() {
            file = Some(SelectedFile {
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }
    debug!(uid = %user.uid, selected = file.is_some(), "image selection");

    let composer = state.sessions.composer(&user);
    let mut composer = composer.lock().await;
    composer.select_file(file);
    Ok(form_with_toast(&composer, None, state.lang))
}

async fn delete_image(State(state): State<AppState>, SignedIn(user): SignedIn) -> Markup {
    let composer = state.sessions.composer(&user);
    let mut composer = composer.lock().await;
    composer.delete_image();
    form_with_toast(&composer, None, state.lang)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/composer/content", post(set_content))
        .route("/composer/hashtag", post(hashtag_key_up).delete(remove_hashtag))
        .route("/composer/image", post(select_image).delete(delete_image))
}
