use std::sync::Arc;

use ams_core::server::{RequestContext, ServerConfig, not_found, path_segments};
use axum::Router;
use axum::extract::{Request, State};
use axum::response::Response;
use tower_http::limit::RequestBodyLimitLayer;

use crate::server::{RootServer, dispatch_root};

#[derive(Clone)]
struct RouterState {
    root: Arc<dyn RootServer>,
    prefix: Arc<str>,
}

/// Builds the router serving `root` under the configured prefix.
///
/// Every path is handled by the dispatch tree, paths outside the prefix get
/// a 404 in the API error format.
pub fn router(root: Arc<dyn RootServer>, config: &ServerConfig) -> Router {
    let state = RouterState {
        root,
        prefix: Arc::from(config.prefix.trim_end_matches('/')),
    };
    Router::new()
        .fallback(handle)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.body_limit))
}

async fn handle(State(state): State<RouterState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let ctx = RequestContext::from_parts(parts);
    tracing::trace!(method = %ctx.method(), path = ctx.path(), "Dispatching request");
    match path_segments(ctx.path(), &state.prefix) {
        Some(segments) => dispatch_root(&ctx, body, state.root.as_ref(), &segments).await,
        None => not_found(&ctx),
    }
}
