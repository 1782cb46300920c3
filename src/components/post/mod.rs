pub mod list;

use maud::{html, Markup};

use crate::i18n::{Language, TranslationKey};
use crate::models::post::{Comment, Post};
use crate::models::user::User;

impl maud::Render for Comment {
    fn render(&self) -> Markup {
        html! {
            .comment {
                .comment__borderbox {
                    .comment__img-box {
                        .comment__flex-box {
                            .comment__email { ( self.email ) }
                            .comment__createdAt { ( self.created_at ) }
                        }
                    }
                    .comment__content { ( self.comment ) }
                }
            }
        }
    }
}

/// One entry of a post list.
pub struct PostBox<'a> {
    pub post: &'a Post,
    pub viewer: Option<&'a User>,
    pub lang: Language,
}

impl maud::Render for PostBox<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let is_author = self.viewer.is_some_and(|u| u.uid == post.uid);
        html! {
            .post__box id={ "post-" (post.id) } {
                a href={ "/" (post.path()) } {
                    .post__box-profile {
                        .post__flex {
                            .post__email { ( post.email ) }
                            .post__createdAt { ( post.created_at ) }
                        }
                    }
                    .post__box-content { ( post.content ) }
                    @if let Some(url) = post.image() {
                        .post__image-div {
                            img .post__image src=(url) alt="post img" width="100" height="100";
                        }
                    }
                    .post-form__hashtags-outputs {
                        @for tag in post.hashtags() {
                            span .post-form__hashtags-tag { "#" ( tag ) }
                        }
                    }
                }
                .post__box-footer {
                    @if is_author {
                        a .post__edit href={ "/" (post.path()) "/edit" } {
                            ( self.lang.translate(TranslationKey::BUTTON_EDIT) )
                        }
                    }
                    span .post__comments { "💬 " ( post.comments().len() ) }
                    span .post__likes { "♥ " ( post.like_count.unwrap_or(0) ) }
                }
            }
        }
    }
}

/// A post with its comments, as shown on `posts/{id}`.
pub fn detail(post: &Post, viewer: Option<&User>, lang: Language) -> Markup {
    html! {
        .post {
            ( PostBox { post, viewer, lang } )
            @if viewer.is_some() {
                ( super::comment_form::render(&post.id, "", lang) )
            }
            .comments {
                @for comment in post.comments() {
                    ( comment )
                }
            }
        }
    }
}
