use axum::extract::{Path, State};
use axum::routing::post;
use axum::Router;
use maud::{html, Markup};
use tracing::info;

use crate::auth::SignedIn;
use crate::error::AppError;
use crate::i18n::{Language, TranslationKey};
use crate::state::AppState;

fn follow_button(target: &str, following: bool, lang: Language) -> Markup {
    html! {
        @if following {
            button .post__following-btn hx-delete={ "/users/" (target) "/follow" } hx-swap="outerHTML" {
                ( lang.translate(TranslationKey::BUTTON_UNFOLLOW) )
            }
        } @else {
            button .post__follow-btn hx-post={ "/users/" (target) "/follow" } hx-swap="outerHTML" {
                ( lang.translate(TranslationKey::BUTTON_FOLLOW) )
            }
        }
    }
}

async fn follow(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(target): Path<String>,
) -> Result<Markup, AppError> {
    state.backend.posts.follow(&user.uid, &target).await?;
    info!(uid = %user.uid, %target, "followed");
    Ok(follow_button(&target, true, state.lang))
}

async fn unfollow(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(target): Path<String>,
) -> Result<Markup, AppError> {
    state.backend.posts.unfollow(&user.uid, &target).await?;
    info!(uid = %user.uid, %target, "unfollowed");
    Ok(follow_button(&target, false, state.lang))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users/:id/follow", post(follow).delete(unfollow))
}
