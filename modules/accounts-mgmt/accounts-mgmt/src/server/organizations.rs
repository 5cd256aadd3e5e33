use std::sync::Arc;

use accounts_mgmt_sdk::{Organization, QuotaSummary, ResourceQuota};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
    UpdateServerRequest, UpdateServerResponse, adapt, method_not_allowed, not_found, read_body,
    read_list_request,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::Method;

/// `/organizations`
#[async_trait]
pub trait OrganizationsServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<Organization>,
        response: &mut AddServerResponse<Organization>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Organization>,
    ) -> anyhow::Result<()>;

    fn organization(&self, id: &str) -> Option<Arc<dyn OrganizationServer>>;
}

/// `/organizations/{id}`
#[async_trait]
pub trait OrganizationServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Organization>,
    ) -> anyhow::Result<()>;

    async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateServerRequest<Organization>,
        response: &mut UpdateServerResponse<Organization>,
    ) -> anyhow::Result<()>;

    fn quota_summary(&self) -> Option<Arc<dyn QuotaSummaryServer>>;

    fn resource_quota(&self) -> Option<Arc<dyn ResourceQuotasServer>>;
}

/// `/organizations/{id}/quota_summary`
///
/// Allowed and reserved amounts per resource of the organization.
#[async_trait]
pub trait QuotaSummaryServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<QuotaSummary>,
    ) -> anyhow::Result<()>;
}

/// `/organizations/{id}/resource_quota`
#[async_trait]
pub trait ResourceQuotasServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<ResourceQuota>,
        response: &mut AddServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()>;

    fn resource_quota(&self, id: &str) -> Option<Arc<dyn ResourceQuotaServer>>;
}

/// `/organizations/{id}/resource_quota/{id}`
#[async_trait]
pub trait ResourceQuotaServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()>;

    async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateServerRequest<ResourceQuota>,
        response: &mut UpdateServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_organizations(
    ctx: &RequestContext,
    body: Body,
    server: &dyn OrganizationsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.organization(id) {
            Some(target) => dispatch_organization(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<Organization>(body)
                .await
                .map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<Organization>::new(),
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
                ListServerResponse::<Organization>::new(),
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

pub async fn dispatch_organization(
    ctx: &RequestContext,
    body: Body,
    server: &dyn OrganizationServer,
    segments: &[&str],
) -> Response {
    if let Some((segment, rest)) = segments.split_first() {
        return match *segment {
            "quota_summary" => match server.quota_summary() {
                Some(target) => dispatch_quota_summary(ctx, target.as_ref(), rest).await,
                None => not_found(ctx),
            },
            "resource_quota" => match server.resource_quota() {
                Some(target) => dispatch_resource_quotas(ctx, body, target.as_ref(), rest).await,
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
                GetServerResponse::<Organization>::new(),
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
            let request = read_body::<Organization>(body)
                .await
                .map(UpdateServerRequest::new);
            adapt(
                ctx,
                request,
                UpdateServerResponse::<Organization>::new(),
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

pub async fn dispatch_quota_summary(
    ctx: &RequestContext,
    server: &dyn QuotaSummaryServer,
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
        read_list_request(ctx),
        ListServerResponse::<QuotaSummary>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_resource_quotas(
    ctx: &RequestContext,
    body: Body,
    server: &dyn ResourceQuotasServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.resource_quota(id) {
            Some(target) => dispatch_resource_quota(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<ResourceQuota>(body)
                .await
                .map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<ResourceQuota>::new(),
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
                ListServerResponse::<ResourceQuota>::new(),
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

pub async fn dispatch_resource_quota(
    ctx: &RequestContext,
    body: Body,
    server: &dyn ResourceQuotaServer,
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
                GetServerResponse::<ResourceQuota>::new(),
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
            let request = read_body::<ResourceQuota>(body)
                .await
                .map(UpdateServerRequest::new);
            adapt(
                ctx,
                request,
                UpdateServerResponse::<ResourceQuota>::new(),
                |request, mut response| async move {
                    server
                        .update(ctx, request, &mut response)
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
