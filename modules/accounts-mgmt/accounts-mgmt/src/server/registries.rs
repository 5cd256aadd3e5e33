use std::sync::Arc;

use accounts_mgmt_sdk::{AccessToken, Registry, RegistryCredential};
use ams_core::server::{
    AddServerRequest, AddServerResponse, GetServerRequest, GetServerResponse, ListServerRequest,
    ListServerResponse, PostServerRequest, PostServerResponse, RequestContext, adapt,
    method_not_allowed, not_found, read_body, read_list_request,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::{Method, StatusCode};

/// `/access_token`
#[async_trait]
pub trait AccessTokenServer: Send + Sync {
    /// Issues the pull secret of the caller. The request carries no body.
    async fn post(
        &self,
        ctx: &RequestContext,
        request: PostServerRequest<()>,
        response: &mut PostServerResponse<AccessToken>,
    ) -> anyhow::Result<()>;
}

/// `/registries`
#[async_trait]
pub trait RegistriesServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Registry>,
    ) -> anyhow::Result<()>;

    fn registry(&self, id: &str) -> Option<Arc<dyn RegistryServer>>;
}

/// `/registries/{id}`
#[async_trait]
pub trait RegistryServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Registry>,
    ) -> anyhow::Result<()>;
}

/// `/registry_credentials`
#[async_trait]
pub trait RegistryCredentialsServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<RegistryCredential>,
        response: &mut AddServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()>;

    fn registry_credential(&self, id: &str) -> Option<Arc<dyn RegistryCredentialServer>>;
}

/// `/registry_credentials/{id}`
#[async_trait]
pub trait RegistryCredentialServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_access_token(
    ctx: &RequestContext,
    server: &dyn AccessTokenServer,
    segments: &[&str],
) -> Response {
    if !segments.is_empty() {
        return not_found(ctx);
    }
    if *ctx.method() != Method::POST {
        return method_not_allowed(ctx);
    }
    let mut response = PostServerResponse::<AccessToken>::new();
    response.status(StatusCode::OK);
    adapt(
        ctx,
        Ok(PostServerRequest::new(())),
        response,
        |request, mut response| async move {
            server
                .post(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_registries(
    ctx: &RequestContext,
    server: &dyn RegistriesServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.registry(id) {
            Some(target) => dispatch_registry(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    if *ctx.method() != Method::GET {
        return method_not_allowed(ctx);
    }
    adapt(
        ctx,
        read_list_request(ctx),
        ListServerResponse::<Registry>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_registry(
    ctx: &RequestContext,
    server: &dyn RegistryServer,
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
        GetServerResponse::<Registry>::new(),
        |request, mut response| async move {
            server
                .get(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_registry_credentials(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RegistryCredentialsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.registry_credential(id) {
            Some(target) => dispatch_registry_credential(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<RegistryCredential>(body)
                .await
                .map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<RegistryCredential>::new(),
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
                ListServerResponse::<RegistryCredential>::new(),
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

pub async fn dispatch_registry_credential(
    ctx: &RequestContext,
    server: &dyn RegistryCredentialServer,
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
        GetServerResponse::<RegistryCredential>::new(),
        |request, mut response| async move {
            server
                .get(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}
