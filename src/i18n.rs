use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    MENU_HOME,
    TAB_ALL,
    TAB_FOLLOWING,
    NO_POSTS,
    POST_PLACEHOLDER,
    POST_HASHTAG,
    COMMENT_PLACEHOLDER,
    BUTTON_DELETE,
    BUTTON_TWEET,
    BUTTON_EDIT,
    BUTTON_COMMENT,
    BUTTON_FOLLOW,
    BUTTON_UNFOLLOW,
    TOAST_POST_CREATED,
    TOAST_POST_UPDATED,
    TOAST_COMMENT_CREATED,
    TOAST_HASHTAG_EXISTS,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    pub fn translate(self, key: TranslationKey) -> &'static str {
        use TranslationKey::*;

        match (self, key) {
            (Language::Ko, MENU_HOME) => "홈",
            (Language::En, MENU_HOME) => "Home",
            (Language::Ko, TAB_ALL) => "전체",
            (Language::En, TAB_ALL) => "All",
            (Language::Ko, TAB_FOLLOWING) => "팔로잉",
            (Language::En, TAB_FOLLOWING) => "Following",
            (Language::Ko, NO_POSTS) => "게시글이 없습니다",
            (Language::En, NO_POSTS) => "No posts",
            (Language::Ko, POST_PLACEHOLDER) => "무슨 일이 일어나고 있나요?",
            (Language::En, POST_PLACEHOLDER) => "What is happening?",
            (Language::Ko, POST_HASHTAG) => "해시태그 + 스페이스바 입력",
            (Language::En, POST_HASHTAG) => "Hashtag + spacebar",
            (Language::Ko, COMMENT_PLACEHOLDER) => "댓글을 입력해주세요",
            (Language::En, COMMENT_PLACEHOLDER) => "Post your reply",
            (Language::Ko, BUTTON_DELETE) => "삭제",
            (Language::En, BUTTON_DELETE) => "Delete",
            (Language::Ko, BUTTON_TWEET) => "트윗",
            (Language::En, BUTTON_TWEET) => "Tweet",
            (Language::Ko, BUTTON_EDIT) => "수정",
            (Language::En, BUTTON_EDIT) => "Edit",
            (Language::Ko, BUTTON_COMMENT) => "댓글",
            (Language::En, BUTTON_COMMENT) => "Comment",
            (Language::Ko, BUTTON_FOLLOW) => "팔로우",
            (Language::En, BUTTON_FOLLOW) => "Follow",
            (Language::Ko, BUTTON_UNFOLLOW) => "팔로잉 취소",
            (Language::En, BUTTON_UNFOLLOW) => "Unfollow",
            (Language::Ko, TOAST_POST_CREATED) => "게시글을 생성했습니다.",
            (Language::En, TOAST_POST_CREATED) => "Post created.",
            (Language::Ko, TOAST_POST_UPDATED) => "게시글을 수정했습니다.",
            (Language::En, TOAST_POST_UPDATED) => "Post updated.",
            (Language::Ko, TOAST_COMMENT_CREATED) => "댓글이 생성되었습니다.",
            (Language::En, TOAST_COMMENT_CREATED) => "Comment created.",
            (Language::Ko, TOAST_HASHTAG_EXISTS) => "이미 입력한 태그가 있습니다.",
            (Language::En, TOAST_HASHTAG_EXISTS) => "That tag is already added.",
        }
    }
}

/// What the user sees after an action: a toast with a translated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub key: TranslationKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl Notice {
    pub fn success(key: TranslationKey) -> Self {
        Self {
            level: NoticeLevel::Success,
            key,
        }
    }

    pub fn error(key: TranslationKey) -> Self {
        Self {
            level: NoticeLevel::Error,
            key,
        }
    }

    pub fn message(&self, lang: Language) -> &'static str {
        lang.translate(self.key)
    }
}
