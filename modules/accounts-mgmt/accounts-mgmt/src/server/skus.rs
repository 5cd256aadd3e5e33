use std::sync::Arc;

use accounts_mgmt_sdk::Sku;
use ams_core::server::{
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
    adapt, method_not_allowed, not_found, read_list_request,
};
use async_trait::async_trait;
use axum::response::Response;
use http::Method;

/// `/skus`
#[async_trait]
pub trait SkusServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Sku>,
    ) -> anyhow::Result<()>;

    fn sku(&self, id: &str) -> Option<Arc<dyn SkuServer>>;
}

/// `/skus/{id}`
#[async_trait]
pub trait SkuServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Sku>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_skus(
    ctx: &RequestContext,
    server: &dyn SkusServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.sku(id) {
            Some(target) => dispatch_sku(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    if *ctx.method() != Method::GET {
        return method_not_allowed(ctx);
    }
    adapt(
        ctx,
        read_list_request(ctx),
        ListServerResponse::<Sku>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_sku(
    ctx: &RequestContext,
    server: &dyn SkuServer,
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
        GetServerResponse::<Sku>::new(),
        |request, mut response| async move {
            server
                .get(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
