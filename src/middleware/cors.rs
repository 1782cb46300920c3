use axum::Router;
use tower_http::cors::{self, CorsLayer};

pub trait CorsExt<S> {
    fn with_cors(self, origin_suffixes: &[String]) -> Router<S>;
}

impl<S> CorsExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Add CORS to Router, allowing origins that end with one of `origin_suffixes`.
    fn with_cors(self, origin_suffixes: &[String]) -> Router<S> {
        let suffixes = origin_suffixes.to_vec();
        let cors_layer = CorsLayer::new()
            .allow_origin(cors::AllowOrigin::predicate(move |origin, _| {
                suffixes
                    .iter()
                    .any(|suffix| origin.as_bytes().ends_with(suffix.as_bytes()))
            }))
            .allow_methods(cors::Any)
            .allow_headers(cors::Any);

        self.layer(cors_layer)
    }
}
