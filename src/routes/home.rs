use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use maud::Markup;
use serde::Deserialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, warn};

use crate::auth::{CurrentUser, SignedIn};
use crate::components::{home, layout, post as post_components};
use crate::feed::{FeedLists, FeedTab, HomeFeed};
use crate::i18n::{Language, TranslationKey};
use crate::models::user::User;
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct TabQuery {
    pub tab: Option<FeedTab>,
}

async fn home_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(q): Query<TabQuery>,
) -> Markup {
    let lang = state.lang;
    let title = lang.translate(TranslationKey::MENU_HOME);

    let body = match &user {
        Some(user) => {
            let composer = state.sessions.composer(user);
            let composer = composer.lock().await;
            match state.sessions.live_feed(user) {
                Some(feed) => {
                    let mut feed = feed.lock().await;
                    if let Some(tab) = q.tab {
                        feed.select_tab(tab);
                    }
                    home::render(&feed, Some(&*composer), Some(user), lang)
                }
                // no socket holds a feed yet: render a snapshot and let go of it, the
                // socket the page opens mounts the live one
                None => {
                    let mut feed = HomeFeed::mount(state.backend.posts.clone(), Some(user)).await;
                    feed.select_tab(q.tab.unwrap_or_default());
                    let body = home::render(&feed, Some(&*composer), Some(user), lang);
                    feed.unmount().await;
                    body
                }
            }
        }
        None => {
            let mut feed = HomeFeed::mount(state.backend.posts.clone(), None).await;
            feed.select_tab(q.tab.unwrap_or_default());
            home::render(&feed, None, None, lang)
        }
    };
    layout::page(lang, title, body)
}

/// Keeps the user's feed mounted while the socket is open and pushes the re-rendered
/// list of the requested tab every time the feed changes.
async fn feed_ws(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Query(q): Query<TabQuery>,
    wsu: WebSocketUpgrade,
) -> impl IntoResponse {
    wsu.on_failed_upgrade(|e| {
        error!(error = %e, "ws upgrade failed");
    })
    .on_upgrade(move |ws| async move {
        let feed = state.sessions.connect_feed(&state.backend, &user).await;
        let (changes, tab) = {
            let feed = feed.lock().await;
            (feed.changes(), q.tab.unwrap_or(feed.active_tab()))
        };
        drop(feed);
        info!(uid = %user.uid, tab = tab.as_str(), "feed socket connected");

        push_feed(ws, changes, tab, &user, state.lang).await;

        state.sessions.disconnect_feed(&user).await;
        info!(uid = %user.uid, "feed socket closed");
    })
}

async fn push_feed(
    ws: WebSocket,
    changes: watch::Receiver<FeedLists>,
    tab: FeedTab,
    user: &User,
    lang: Language,
) {
    let (mut sender, mut receiver) = ws.split();
    let mut updates = WatchStream::from_changes(changes);

    loop {
        tokio::select! {
            next = updates.next() => {
                let Some(lists) = next else {
                    debug!("feed stopped");
                    return;
                };
                let html =
                    post_components::list::render(lists.tab(tab), Some(user), lang).into_string();
                if let Err(e) = sender.send(Message::Text(html)).await {
                    warn!(%e, "feed socket died");
                    return;
                }
            }
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | None => return,
                Some(Err(e)) => {
                    warn!(%e, "feed socket errored");
                    return;
                }
                Some(Ok(_)) => {}
            },
        }
    }
}

async fn end_session(State(state): State<AppState>, SignedIn(user): SignedIn) -> StatusCode {
    state.sessions.end(&user).await;
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/feed/ws", get(feed_ws))
        .route("/session/end", post(end_session))
}
