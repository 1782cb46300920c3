use maud::{html, Markup, DOCTYPE};

use crate::i18n::Language;

pub fn page(lang: Language, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                title { ( title ) }
                link rel="stylesheet" href="/styles.css";
                script src="https://unpkg.com/htmx.org@1.9.12" {}
                script src="https://unpkg.com/htmx.org@1.9.12/dist/ext/ws.js" {}
            }
            body {
                div #toast {}
                ( body )
            }
        }
    }
}
