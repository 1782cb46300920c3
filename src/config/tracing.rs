use tracing_subscriber::{filter, prelude::*};

pub trait AppTracingExt: tracing::Subscriber {
    /// Our own crate at DEBUG, request logs at INFO, everything else at WARN.
    fn with_app_tracing(self) -> tracing_subscriber::layer::Layered<filter::Targets, Self>
    where
        Self: Sized,
    {
        self.with(
            filter::Targets::new()
                .with_target("chirp", tracing::Level::DEBUG)
                .with_target("tower_http", tracing::Level::INFO)
                .with_default(tracing::Level::WARN),
        )
    }
}

impl<S: tracing::Subscriber> AppTracingExt for S {}

/// Installs the global subscriber. `RUST_LOG`, when set, replaces the default targets.
pub fn init() {
    use tracing_forest::ForestLayer;
    use tracing_subscriber::EnvFilter;

    let registry = tracing_subscriber::registry();
    match EnvFilter::try_from_default_env() {
        Ok(env) => registry.with(env).with(ForestLayer::default()).init(),
        Err(_) => registry
            .with_app_tracing()
            .with(ForestLayer::default())
            .init(),
    }
}
