use std::sync::Arc;

use accounts_mgmt_sdk::{Account, Permission, Role, RoleBinding};
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

/// `/current_access`
///
/// Roles granted to the caller.
#[async_trait]
pub trait CurrentAccessServer: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Role>,
    ) -> anyhow::Result<()>;
}

/// `/current_account`
///
/// Account of the caller, as identified by the request credentials.
#[async_trait]
pub trait CurrentAccountServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Account>,
    ) -> anyhow::Result<()>;
}

/// `/permissions`
#[async_trait]
pub trait PermissionsServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<Permission>,
        response: &mut AddServerResponse<Permission>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Permission>,
    ) -> anyhow::Result<()>;

    fn permission(&self, id: &str) -> Option<Arc<dyn PermissionServer>>;
}

/// `/permissions/{id}`
#[async_trait]
pub trait PermissionServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Permission>,
    ) -> anyhow::Result<()>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()>;
}

/// `/roles`
#[async_trait]
pub trait RolesServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<Role>,
        response: &mut AddServerResponse<Role>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Role>,
    ) -> anyhow::Result<()>;

    fn role(&self, id: &str) -> Option<Arc<dyn RoleServer>>;
}

/// `/roles/{id}`
#[async_trait]
pub trait RoleServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<Role>,
    ) -> anyhow::Result<()>;

    async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateServerRequest<Role>,
        response: &mut UpdateServerResponse<Role>,
    ) -> anyhow::Result<()>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()>;
}

/// `/role_bindings`
#[async_trait]
pub trait RoleBindingsServer: Send + Sync {
    async fn add(
        &self,
        ctx: &RequestContext,
        request: AddServerRequest<RoleBinding>,
        response: &mut AddServerResponse<RoleBinding>,
    ) -> anyhow::Result<()>;

    async fn list(
        &self,
        ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<RoleBinding>,
    ) -> anyhow::Result<()>;

    fn role_binding(&self, id: &str) -> Option<Arc<dyn RoleBindingServer>>;
}

/// `/role_bindings/{id}`
#[async_trait]
pub trait RoleBindingServer: Send + Sync {
    async fn get(
        &self,
        ctx: &RequestContext,
        request: GetServerRequest,
        response: &mut GetServerResponse<RoleBinding>,
    ) -> anyhow::Result<()>;

    async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateServerRequest<RoleBinding>,
        response: &mut UpdateServerResponse<RoleBinding>,
    ) -> anyhow::Result<()>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()>;
}

pub async fn dispatch_current_access(
    ctx: &RequestContext,
    server: &dyn CurrentAccessServer,
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
        ListServerResponse::<Role>::new(),
        |request, mut response| async move {
            server
                .list(ctx, request, &mut response)
                .await
                .map(|()| response)
        },
    )
    .await
}

pub async fn dispatch_current_account(
    ctx: &RequestContext,
    server: &dyn CurrentAccountServer,
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

pub async fn dispatch_permissions(
    ctx: &RequestContext,
    body: Body,
    server: &dyn PermissionsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.permission(id) {
            Some(target) => dispatch_permission(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<Permission>(body)
                .await
                .map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<Permission>::new(),
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
                ListServerResponse::<Permission>::new(),
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

pub async fn dispatch_permission(
    ctx: &RequestContext,
    server: &dyn PermissionServer,
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
                GetServerResponse::<Permission>::new(),
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

pub async fn dispatch_roles(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RolesServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.role(id) {
            Some(target) => dispatch_role(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<Role>(body).await.map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<Role>::new(),
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
                ListServerResponse::<Role>::new(),
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

pub async fn dispatch_role(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RoleServer,
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
                GetServerResponse::<Role>::new(),
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
            let request = read_body::<Role>(body).await.map(UpdateServerRequest::new);
            adapt(
                ctx,
                request,
                UpdateServerResponse::<Role>::new(),
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

pub async fn dispatch_role_bindings(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RoleBindingsServer,
    segments: &[&str],
) -> Response {
    if let Some((id, rest)) = segments.split_first() {
        return match server.role_binding(id) {
            Some(target) => dispatch_role_binding(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        };
    }
    match *ctx.method() {
        Method::POST => {
            let request = read_body::<RoleBinding>(body)
                .await
                .map(AddServerRequest::new);
            adapt(
                ctx,
                request,
                AddServerResponse::<RoleBinding>::new(),
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
                ListServerResponse::<RoleBinding>::new(),
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

pub async fn dispatch_role_binding(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RoleBindingServer,
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
                GetServerResponse::<RoleBinding>::new(),
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
            let request = read_body::<RoleBinding>(body)
                .await
                .map(UpdateServerRequest::new);
            adapt(
                ctx,
                request,
                UpdateServerResponse::<RoleBinding>::new(),
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
