use accounts_mgmt_sdk::{SupportCaseRequest, SupportCaseResponse};
use ams_core::server::{
    PostServerRequest, PostServerResponse, RequestContext, adapt, method_not_allowed, not_found,
    read_body,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::Method;

/// `/support_cases`
#[async_trait]
pub trait SupportCasesServer: Send + Sync {
    async fn post(
        &self,
        ctx: &RequestContext,
        request: PostServerRequest<SupportCaseRequest>,
        response: &mut PostServerResponse<SupportCaseResponse>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_support_cases(
    ctx: &RequestContext,
    body: Body,
    server: &dyn SupportCasesServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::POST {
        return method_not_allowed(ctx);
    }
    let request = read_body::<SupportCaseRequest>(body)
        .await
        .map(PostServerRequest::new);
    adapt(
        ctx,
        request,
        PostServerResponse::<SupportCaseResponse>::new(),
        |request, mut response| async move {
            server
                .post(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
