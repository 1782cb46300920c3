pub mod tracing;

use figment::{providers::Format, Figment};
use serde::Deserialize;

use crate::i18n::Language;

#[derive(Deserialize, Debug, Clone)]
pub struct AppCfg {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub language: Language,
    /// Prefix of the download URLs handed out for uploaded images.
    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,
    #[serde(default = "default_cors_origin_suffixes")]
    pub cors_origin_suffixes: Vec<String>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_media_base_url() -> String {
    "/media".into()
}

fn default_cors_origin_suffixes() -> Vec<String> {
    vec!["://localhost:3000".into()]
}

fn default_static_dir() -> String {
    "./dist/".into()
}

impl AppCfg {
    /// `appsettings.json` (optional) overridden by `APP_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(figment::providers::Json::file("appsettings.json"))
                .merge(figment::providers::Env::prefixed("APP_")),
        )
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        Ok(figment.extract()?)
    }
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            language: Language::default(),
            media_base_url: default_media_base_url(),
            cors_origin_suffixes: default_cors_origin_suffixes(),
            static_dir: default_static_dir(),
        }
    }
}
