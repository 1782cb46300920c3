pub mod composer;
pub mod home;
pub mod media;
pub mod posts;
pub mod users;

use axum::http::header;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AppCfg;
use crate::middleware::cors::CorsExt;
use crate::middleware::logging::HttpLoggingExt;
use crate::state::AppState;

pub fn app(state: AppState, cfg: &AppCfg) -> Router {
    Router::new()
        .merge(home::router())
        .merge(composer::router())
        .merge(posts::router())
        .merge(users::router())
        .merge(media::router())
        .fallback_service(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    header::HeaderValue::from_static("max-age=13420"),
                ))
                .layer(CompressionLayer::new())
                .service(tower_http::services::ServeDir::new(&cfg.static_dir)),
        )
        .with_state(state)
        .with_cors(&cfg.cors_origin_suffixes)
        .with_http_logging()
}
