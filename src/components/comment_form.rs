use maud::{html, Markup};

use crate::i18n::{Language, TranslationKey};

pub fn render(post_id: &str, comment: &str, lang: Language) -> Markup {
    html! {
        form .post-form #comment-form
            hx-post={ "/posts/" (post_id) "/comments" }
            hx-swap="outerHTML" {
            textarea .post-form__textarea name="comment" #comment required
                placeholder=(lang.translate(TranslationKey::COMMENT_PLACEHOLDER)) { ( comment ) }
            .post-form__submit-area {
                div {}
                input .post-form__submit-btn type="submit"
                    value=(lang.translate(TranslationKey::BUTTON_COMMENT));
            }
        }
    }
}
