use std::sync::Arc;

use accounts_mgmt_sdk::Account;
use ams_core::server::{
    AddServerRequest, AddServerResponse, GetServerRequest, GetServerResponse, ListServerRequest,
    ListServerResponse, RequestContext, UpdateServerRequest, UpdateServerResponse, adapt,
    method_not_allowed, not_found, read_body, read_list_request,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::Method;

/// `/accounts`
#[async_trait]
pub trait AccountsServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<Account>,
        response: &mut AddServerResponse<Account>,
    ) -> anyhow::Result<()>;

    /// Accounts matching `search`, one page at a time.
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Account>,
    ) -> anyhow::Result<()>;

    fn account(&self, id: &str) -> Option<Arc<dyn AccountServer>>;
}

/// `/accounts/{id}`
#[async_trait]
pub trait AccountServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Account>,
    ) -> anyhow::Result<()>;

    /// Applies the attributes present in the request body.
    async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateServerRequest<Account>,
        response: &mut UpdateServerResponse<Account>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_accounts(
    ctx: &RequestContext,
    body: Body,
    server: &dyn AccountsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.account(id) {
            Some(target) => dispatch_account(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<Account>(body).await.map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<Account>::new(),
                |request, mut response| async move {
                    server
                        .add(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        Method::GET => {
            adapt(
                ctx,
                read_list_request(ctx),
                ListServerResponse::<Account>::new(),
                |request, mut response| async move {
                    server
                        .list(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        _ => method_not_allowed(ctx),
    }
}

pub async fn dispatch_account(
    ctx: &RequestContext,
    body: Body,
    server: &dyn AccountServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    match *ctx.method() {
        Method::GET => {
            adapt(
                ctx,
                Ok(GetServerRequest),
                GetServerResponse::<Account>::new(),
                |request, mut response| async move {
                    server
                        .get(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        Method::PATCH => {
            let request = read_body::<Account>(body)
                .await
                .map(UpdateServerRequest::new);
            adapt(
                ctx,
                request,
                UpdateServerResponse::<Account>::new(),
                |request, mut response| async move {
                    server
                        .update(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        _ => method_not_allowed(ctx),
    }
}
