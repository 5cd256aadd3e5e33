use std::sync::Arc;

use accounts_mgmt_sdk::FeatureToggle;
use ams_core::server::{
    GetServerRequest, GetServerResponse, RequestContext, adapt, method_not_allowed, not_found,
};
use async_trait::async_trait;
use axum::response::Response;
use http::Method;

/// `/feature_toggles`
///
/// Only individual toggles are addressable, the collection has no verbs.
pub trait FeatureTogglesServer: Send + Sync {
    fn toggle(&self, id: &str) -> Option<Arc<dyn FeatureToggleServer>>;
}

/// `/feature_toggles/{id}`
#[async_trait]
pub trait FeatureToggleServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<FeatureToggle>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_feature_toggles(
    ctx: &RequestContext,
    server: &dyn FeatureTogglesServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.toggle(id) {
            Some(target) => dispatch_feature_toggle(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    method_not_allowed(ctx)
}

pub async fn dispatch_feature_toggle(
    ctx: &RequestContext,
    server: &dyn FeatureToggleServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::GET {
        return method_not_allowed(ctx);
    }
    adapt(
        ctx,
        Ok(GetServerRequest),
        GetServerResponse::<FeatureToggle>::new(),
        |request, mut response| async move {
            server
                .get(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
