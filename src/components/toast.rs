use maud::{html, Markup};

use crate::i18n::{Language, Notice, NoticeLevel};

fn class(notice: &Notice) -> &'static str {
    match notice.level {
        NoticeLevel::Success => "toast toast--success",
        NoticeLevel::Error => "toast toast--error",
    }
}

/// Out-of-band swap into the page's `#toast` container.
pub fn render(notice: Option<Notice>, lang: Language) -> Markup {
    html! {
        div #toast hx-swap-oob="true" {
            @if let Some(notice) = notice {
                div class=(class(&notice)) role="status" { ( notice.message(lang) ) }
            }
        }
    }
}
