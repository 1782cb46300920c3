use maud::{html, Markup};

use crate::composer::editor::PostEditor;
use crate::i18n::{Language, TranslationKey};

pub fn render(post_id: &str, editor: &PostEditor, lang: Language) -> Markup {
    html! {
        form .post-form #edit-form
            hx-post={ "/posts/" (post_id) "/edit" }
            hx-swap="outerHTML" {
            textarea .post-form__textarea name="content" #content required
                placeholder=(lang.translate(TranslationKey::POST_PLACEHOLDER)) { ( editor.content() ) }
            .post-form__submit-area {
                label .post-form__file for="file-input" { "🖼" }
                // replacing the image is not supported yet, the control is inert
                input .hidden type="file" #file-input name="file-input" accept="image/*";
                input .post-form__submit-btn type="submit"
                    value=(lang.translate(TranslationKey::BUTTON_EDIT));
            }
        }
    }
}
