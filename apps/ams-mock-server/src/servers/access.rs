//! Caller identity, roles and the bindings granting them.

use std::collections::HashSet;
use std::sync::Arc;

use accounts_mgmt::{
    CurrentAccessServer, CurrentAccountServer, PermissionServer, PermissionsServer,
    RoleBindingServer, RoleBindingsServer, RoleServer, RolesServer,
};
use accounts_mgmt_sdk::{Account, Permission, Role, RoleBinding};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
    UpdateServerRequest, UpdateServerResponse,
};
use async_trait::async_trait;
use axum::http::StatusCode;

use super::{caller, delete_from, get_into, list_into, update_into};
use crate::store::{Page, Store};

pub struct CurrentAccount {
    store: Arc<Store>,
    username: Option<Arc<str>>,
}

impl CurrentAccount {
    pub fn new(store: Arc<Store>, username: Option<Arc<str>>) -> Self {
        Self { store, username }
    }
}

#[async_trait]
impl CurrentAccountServer for CurrentAccount {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Account>,
    ) -> anyhow::Result<()> {
        match caller(&self.store, self.username.as_deref())? {
            Some(account) => response.body(account),
            None => response.status(StatusCode::NOT_FOUND),
        };
        Ok(())
    }
}

/// Roles bound to the caller.
pub struct CurrentAccess {
    store: Arc<Store>,
    username: Option<Arc<str>>,
}

impl CurrentAccess {
    pub fn new(store: Arc<Store>, username: Option<Arc<str>>) -> Self {
        Self { store, username }
    }
}

#[async_trait]
impl CurrentAccessServer for CurrentAccess {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Role>,
    ) -> anyhow::Result<()> {
        let roles = match caller(&self.store, self.username.as_deref())? {
            Some(account) => {
                let bindings = self.store.role_bindings.all(None)?;
                let bound: HashSet<&str> = bindings
                    .iter()
                    .filter(|b| binds(b, account.id()))
                    .filter_map(|b| b.get_role_id().or_else(|| b.role().map(Role::id)))
                    .collect();
                self.store
                    .roles
                    .all(None)?
                    .into_iter()
                    .filter(|r| bound.contains(r.id()))
                    .collect()
            }
            None => Vec::new(),
        };
        Page::of(roles, &request)?.fill(response)
    }
}

fn binds(binding: &RoleBinding, account_id: &str) -> bool {
    binding.account_id() == account_id || binding.account().is_some_and(|a| a.id() == account_id)
}

pub struct Permissions {
    store: Arc<Store>,
}

impl Permissions {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PermissionsServer for Permissions {
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<Permission>,
        response: &mut AddServerResponse<Permission>,
    ) -> anyhow::Result<()> {
        let stored =
            self.store
                .permissions
                .add(None, &self.store.path("permissions"), request.body())?;
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Permission>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.permissions, None, &request, response)
    }

    fn permission(&self, id: &str) -> Option<Arc<dyn PermissionServer>> {
        self.store.permissions.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn PermissionServer>
        })
    }
}

pub struct Roles {
    store: Arc<Store>,
}

impl Roles {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RolesServer for Roles {
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<Role>,
        response: &mut AddServerResponse<Role>,
    ) -> anyhow::Result<()> {
        let stored = self
            .store
            .roles
            .add(None, &self.store.path("roles"), request.body())?;
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Role>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.roles, None, &request, response)
    }

    fn role(&self, id: &str) -> Option<Arc<dyn RoleServer>> {
        self.store.roles.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn RoleServer>
        })
    }
}

pub struct RoleBindings {
    store: Arc<Store>,
}

impl RoleBindings {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoleBindingsServer for RoleBindings {
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<RoleBinding>,
        response: &mut AddServerResponse<RoleBinding>,
    ) -> anyhow::Result<()> {
        let binding = request.body();
        if !binding.role_id().is_empty() && !self.store.roles.contains(None, binding.role_id()) {
            tracing::debug!(role_id = binding.role_id(), "binding to an unknown role");
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let stored =
            self.store
                .role_bindings
                .add(None, &self.store.path("role_bindings"), binding)?;
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<RoleBinding>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.role_bindings, None, &request, response)
    }

    fn role_binding(&self, id: &str) -> Option<Arc<dyn RoleBindingServer>> {
        self.store.role_bindings.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn RoleBindingServer>
        })
    }
}

/// A stored permission, role or role binding.
struct Item {
    store: Arc<Store>,
    id: String,
}

#[async_trait]
impl PermissionServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Permission>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.permissions, None, &self.id, response)
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        delete_from(&self.store.permissions, None, &self.id, response);
        Ok(())
    }
}

#[async_trait]
impl RoleServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Role>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.roles, None, &self.id, response)
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<Role>,
        response: &mut UpdateServerResponse<Role>,
    ) -> anyhow::Result<()> {
        update_into(&self.store.roles, None, &self.id, &request, response)
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        delete_from(&self.store.roles, None, &self.id, response);
        Ok(())
    }
}

#[async_trait]
impl RoleBindingServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<RoleBinding>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.role_bindings, None, &self.id, response)
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<RoleBinding>,
        response: &mut UpdateServerResponse<RoleBinding>,
    ) -> anyhow::Result<()> {
        update_into(
            &self.store.role_bindings,
            None,
            &self.id,
            &request,
            response,
        )
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        delete_from(&self.store.role_bindings, None, &self.id, response);
        Ok(())
    }
}
