use maud::{html, Markup};

use super::PostBox;
use crate::i18n::{Language, TranslationKey};
use crate::models::post::Post;
use crate::models::user::User;

pub fn render(posts: &[Post], viewer: Option<&User>, lang: Language) -> Markup {
    html! {
        .post #post-list {
            @if posts.is_empty() {
                .post__no-posts {
                    .post__text { ( lang.translate(TranslationKey::NO_POSTS) ) }
                }
            } @else {
                @for post in posts {
                    ( PostBox { post, viewer, lang } )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_shows_placeholder() {
        let html = render(&[], None, Language::En).into_string();
        assert!(html.contains("No posts"));

        let html = render(&[], None, Language::Ko).into_string();
        assert!(html.contains("게시글이 없습니다"));
    }
}
