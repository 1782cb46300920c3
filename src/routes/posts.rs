use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use maud::{html, Markup};
use serde::Deserialize;

use crate::auth::{CurrentUser, SignedIn};
use crate::components::{comment_form, edit_form, layout, post as post_components, toast};
use crate::composer::comment::CommentComposer;
use crate::error::AppError;
use crate::state::AppState;

use super::composer::form_with_toast;

#[derive(Deserialize)]
struct ContentForm {
    #[serde(default)]
    content: String,
}

#[axum_macros::debug_handler]
async fn create_post(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Form(f): Form<ContentForm>,
) -> Markup {
    let composer = state.sessions.composer(&user);
    let submission = {
        let mut composer = composer.lock().await;
        composer.on_change("content", &f.content);
        composer.begin_submit()
    };

    // the composer stays unlocked while the backend works, so the page can render
    // the form with its submit button disabled meanwhile
    let (result, in_flight) = match submission {
        Ok(submission) => (submission.publish(&state.backend, &user).await, Some(submission)),
        Err(e) => (Err(e), None),
    };

    let mut composer = composer.lock().await;
    let notice = composer.finish(result);
    drop(in_flight);
    form_with_toast(&composer, notice, state.lang)
}

async fn show_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Markup, AppError> {
    let post = state.backend.posts.get_post(&id).await?;
    let body = post_components::detail(&post, user.as_ref(), state.lang);
    Ok(layout::page(state.lang, &post.email, body))
}

async fn edit_page(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(id): Path<String>,
) -> Result<Markup, AppError> {
    let editor = state.sessions.editor(&user);
    let mut editor = editor.lock().await;
    editor.open(&state.backend, &id).await;
    if editor.post().is_none() {
        // load() logged the reason; ask the backend again for a proper status
        state.backend.posts.get_post(&id).await?;
    }
    let body = edit_form::render(&id, &editor, state.lang);
    Ok(layout::page(state.lang, &id, body))
}

async fn update_post(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(id): Path<String>,
    Form(f): Form<ContentForm>,
) -> Response {
    let editor = state.sessions.editor(&user);
    let mut editor = editor.lock().await;
    editor.load(&state.backend, Some(&id)).await;
    editor.on_change("content", &f.content);

    match editor.submit(&state.backend).await {
        Some(edited) => (
            [("HX-Redirect", format!("/{}", edited.navigate_to))],
            toast::render(Some(edited.notice), state.lang),
        )
            .into_response(),
        None => html! {
            ( edit_form::render(&id, &editor, state.lang) )
            ( toast::render(None, state.lang) )
        }
        .into_response(),
    }
}

#[derive(Deserialize)]
struct CommentForm {
    #[serde(default)]
    comment: String,
}

async fn add_comment(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(id): Path<String>,
    Form(f): Form<CommentForm>,
) -> Markup {
    let post = state
        .backend
        .posts
        .get_post(&id)
        .await
        .inspect_err(crate::ert!("comment target not loaded"))
        .ok();

    let mut composer = CommentComposer::new();
    composer.on_change("comment", &f.comment);
    let notice = if composer.can_submit() {
        composer.submit(&state.backend, post.as_ref(), Some(&user)).await
    } else {
        None
    };

    html! {
        ( comment_form::render(&id, composer.comment(), state.lang) )
        ( toast::render(notice, state.lang) )
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", get(show_post))
        .route("/posts/:id/edit", get(edit_page).post(update_post))
        .route("/posts/:id/comments", post(add_comment))
}
