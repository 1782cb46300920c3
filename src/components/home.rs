use maud::{html, Markup};

use super::{post, post_form};
use crate::composer::post::PostComposer;
use crate::feed::{FeedTab, HomeFeed};
use crate::i18n::{Language, TranslationKey};
use crate::models::user::User;

fn tab(active: FeedTab, tab: FeedTab, label: &str) -> Markup {
    html! {
        a .home__tab .home__tab--active[active == tab]
            href={ "/?tab=" (tab.as_str()) } { ( label ) }
    }
}

pub fn render(
    feed: &HomeFeed,
    composer: Option<&PostComposer>,
    viewer: Option<&User>,
    lang: Language,
) -> Markup {
    let active = feed.active_tab();
    html! {
        .home
            hx-ext=[viewer.map(|_| "ws")]
            ws-connect=[viewer.map(|_| format!("/feed/ws?tab={}", active.as_str()))] {
            .home__top {
                .home__title { ( lang.translate(TranslationKey::MENU_HOME) ) }
                .home__tabs {
                    ( tab(active, FeedTab::All, lang.translate(TranslationKey::TAB_ALL)) )
                    ( tab(active, FeedTab::Following, lang.translate(TranslationKey::TAB_FOLLOWING)) )
                }
            }
            @if let Some(composer) = composer {
                ( post_form::render(composer, lang) )
            }
            ( post::list::render(&feed.visible(), viewer, lang) )
        }
    }
}
