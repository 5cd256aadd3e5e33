use accounts_mgmt_sdk::{
    ClusterAuthorizationRequest, ClusterAuthorizationResponse, ClusterRegistrationRequest,
    ClusterRegistrationResponse,
};
use ams_core::server::{
    PostServerRequest, PostServerResponse, RequestContext, adapt, method_not_allowed, not_found,
    read_body,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::Method;

/// `/cluster_authorizations`
///
/// Decides whether a cluster may be created and reserves its resources.
#[async_trait]
pub trait ClusterAuthorizationsServer: Send + Sync {
    async fn post(
        &self,
        ctx: &RequestContext,
        request: PostServerRequest<ClusterAuthorizationRequest>,
        response: &mut PostServerResponse<ClusterAuthorizationResponse>,
    ) -> anyhow::Result<()>;
}

/// `/cluster_registrations`
///
/// Registers a cluster with an authorization token.
#[async_trait]
pub trait ClusterRegistrationsServer: Send + Sync {
    async fn post(
        &self,
        ctx: &RequestContext,
        request: PostServerRequest<ClusterRegistrationRequest>,
        response: &mut PostServerResponse<ClusterRegistrationResponse>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_cluster_authorizations(
    ctx: &RequestContext,
    body: Body,
    server: &dyn ClusterAuthorizationsServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::POST {
        return method_not_allowed(ctx);
    }
    let request = read_body::<ClusterAuthorizationRequest>(body)
        .await
        .map(PostServerRequest::new);
    adapt(
        ctx,
        request,
        PostServerResponse::<ClusterAuthorizationResponse>::new(),
        |request, mut response| async move {
            server
                .post(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_cluster_registrations(
    ctx: &RequestContext,
    body: Body,
    server: &dyn ClusterRegistrationsServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::POST {
        return method_not_allowed(ctx);
    }
    let request = read_body::<ClusterRegistrationRequest>(body)
        .await
        .map(PostServerRequest::new);
    adapt(
        ctx,
        request,
        PostServerResponse::<ClusterRegistrationResponse>::new(),
        |request, mut response| async move {
            server
                .post(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
