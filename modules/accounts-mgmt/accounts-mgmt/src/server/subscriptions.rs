use std::sync::Arc;

use accounts_mgmt_sdk::{ReservedResource, Subscription, SubscriptionNotify};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
    adapt, method_not_allowed, not_found, read_body, read_list_request,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::Method;

/// `/subscriptions`
#[async_trait]
pub trait SubscriptionsServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Subscription>,
    ) -> anyhow::Result<()>;

    fn subscription(&self, id: &str) -> Option<Arc<dyn SubscriptionServer>>;
}

/// `/subscriptions/{id}`
#[async_trait]
pub trait SubscriptionServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Subscription>,
    ) -> anyhow::Result<()>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()>;

    fn notify(&self) -> Option<Arc<dyn SubscriptionNotifyServer>>;

    fn reserved_resources(&self) -> Option<Arc<dyn SubscriptionReservedResourcesServer>>;
}

/// `/subscriptions/{id}/notify`
///
/// Sends an e-mail built from a template to the subscription owners.
#[async_trait]
pub trait SubscriptionNotifyServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<SubscriptionNotify>,
        response: &mut AddServerResponse<SubscriptionNotify>,
    ) -> anyhow::Result<()>;
}

/// `/subscriptions/{id}/reserved_resources`
#[async_trait]
pub trait SubscriptionReservedResourcesServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<ReservedResource>,
    ) -> anyhow::Result<()>;

    fn reserved_resource(&self, id: &str) -> Option<Arc<dyn SubscriptionReservedResourceServer>>;
}

/// `/subscriptions/{id}/reserved_resources/{id}`
#[async_trait]
pub trait SubscriptionReservedResourceServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<ReservedResource>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_subscriptions(
    ctx: &RequestContext,
    body: Body,
    server: &dyn SubscriptionsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.subscription(id) {
            Some(target) => dispatch_subscription(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    if *ctx.method() != Method::GET {
        return method_not_allowed(ctx);
    }
    adapt(
        ctx,
        read_list_request(ctx),
        ListServerResponse::<Subscription>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_subscription(
    ctx: &RequestContext,
    body: Body,
    server: &dyn SubscriptionServer,
    segments: &[&str],
) -> Response {
    if let Some((segment, rest)) = segments.split_first() {
        return match *segment {
            "notify" => match server.notify() {
                Some(target) => {
                    dispatch_subscription_notify(ctx, body, target.as_ref(), rest).await
                }
                None => not_found(ctx),
            },
            "reserved_resources" => match server.reserved_resources() {
                Some(target) => {
                    dispatch_subscription_reserved_resources(ctx, target.as_ref(), rest).await
                }
                None => not_found(ctx),
            },
            _ => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::GET => {
            adapt(
                ctx,
                Ok(GetServerRequest),
                GetServerResponse::<Subscription>::new(),
                |request, mut response| async move {
                    server
                        .get(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        Method::DELETE => {
            adapt(
                ctx,
                Ok(DeleteServerRequest),
                DeleteServerResponse::new(),
                |request, mut response| async move {
                    server
                        .delete(ctx, request, &mut response)
                        .await
                        .map(|()| response)
                },
            )
            .await
        }
        _ => method_not_allowed(ctx),
    }
}

pub async fn dispatch_subscription_notify(
    ctx: &RequestContext,
    body: Body,
    server: &dyn SubscriptionNotifyServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::POST {
        return method_not_allowed(ctx);
    }
    let request = read_body::<SubscriptionNotify>(body)
        .await
        .map(AddServerRequest::new);
    adapt(
        ctx,
        request,
        AddServerResponse::<SubscriptionNotify>::new(),
        |request, mut response| async move {
            server
                .add(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_subscription_reserved_resources(
    ctx: &RequestContext,
    server: &dyn SubscriptionReservedResourcesServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.reserved_resource(id) {
            Some(target) => {
                dispatch_subscription_reserved_resource(ctx, target.as_ref(), rest).await
            }
            None => not_found(ctx),
        };
    }
    if *ctx.method() != Method::GET {
        return method_not_allowed(ctx);
    }
    adapt(
        ctx,
        read_list_request(ctx),
        ListServerResponse::<ReservedResource>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_subscription_reserved_resource(
    ctx: &RequestContext,
    server: &dyn SubscriptionReservedResourceServer,
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
        GetServerResponse::<ReservedResource>::new(),
        |request, mut response| async move {
            server
                .get(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
