use std::sync::Arc;

use tracing::*;

use chirp::clock::SystemClock;
use chirp::config::{self, AppCfg};
use chirp::routes;
use chirp::services::memory::MemoryBackend;
use chirp::services::Backend;
use chirp::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::tracing::init();

    let cfg = AppCfg::load()?;
    debug!(?cfg, "configuration loaded");

    info!("Starting in-process backend");
    let store = Arc::new(MemoryBackend::new(cfg.media_base_url.clone()));
    let backend = Backend::in_memory(store, Arc::new(SystemClock));

    let app = routes::app(AppState::new(backend, cfg.language), &cfg);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!("starting listening at {}", cfg.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
