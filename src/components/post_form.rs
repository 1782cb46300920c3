use maud::{html, Markup};

use crate::composer::post::PostComposer;
use crate::i18n::{Language, TranslationKey};

/// The compose box on the home page. Every control posts to `/composer/*` and gets
/// this form back.
pub fn render(composer: &PostComposer, lang: Language) -> Markup {
    html! {
        form .post-form #post-form
            hx-post="/posts"
            hx-swap="outerHTML" {
            textarea .post-form__textarea name="content" #content required
                placeholder=(lang.translate(TranslationKey::POST_PLACEHOLDER))
                hx-post="/composer/content"
                hx-trigger="keyup changed delay:300ms"
                hx-swap="none" { ( composer.content() ) }
            .post-form__hashtags {
                span .post-form__hashtags-outputs {
                    @for tag in composer.hashtags().tags().as_slice() {
                        span .post-form__hashtags-tag
                            hx-delete="/composer/hashtag"
                            hx-vals=(serde_json::json!({ "tag": tag }).to_string())
                            hx-target="#post-form"
                            hx-swap="outerHTML" { "#" ( tag ) }
                    }
                }
                input .post-form__input name="hashtag" #hashtag
                    placeholder=(lang.translate(TranslationKey::POST_HASHTAG))
                    value=(composer.hashtags().buffer())
                    hx-post="/composer/hashtag"
                    hx-trigger="keyup[key==' ']"
                    hx-vals="{\"key\": \" \"}"
                    hx-target="#post-form"
                    hx-swap="outerHTML";
            }
            .post-form__submit-area {
                .post-form__image-area {
                    label .post-form__file for="file-input" { "🖼" }
                    input .hidden type="file" #file-input name="file-input" accept="image/*"
                        hx-post="/composer/image"
                        hx-encoding="multipart/form-data"
                        hx-target="#post-form"
                        hx-swap="outerHTML";
                    @if let Some(image) = composer.image() {
                        .post-form__attachment {
                            img src=(image.to_string()) alt="attachment" width="100" height="100";
                            button .post-form__clear-btn type="button"
                                hx-delete="/composer/image"
                                hx-target="#post-form"
                                hx-swap="outerHTML" {
                                ( lang.translate(TranslationKey::BUTTON_DELETE) )
                            }
                        }
                    }
                }
                input .post-form__submit-btn type="submit"
                    value=(lang.translate(TranslationKey::BUTTON_TWEET))
                    disabled[composer.is_submitting()];
            }
        }
    }
}
