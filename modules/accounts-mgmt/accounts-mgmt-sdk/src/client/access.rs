use ams_core::client::{
    AddRequest, Connection, DeleteRequest, GetRequest, ListRequest, UpdateRequest,
};

use super::child;
use crate::models::{Account, Permission, Role, RoleBinding};

/// `/current_account`
#[derive(Debug, Clone)]
pub struct CurrentAccountClient {
    connection: Connection,
    path: String,
}

impl CurrentAccountClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Account of the caller, as identified by the bearer token.
    pub fn get(&self) -> GetRequest<Account> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/current_access`
#[derive(Debug, Clone)]
pub struct CurrentAccessClient {
    connection: Connection,
    path: String,
}

impl CurrentAccessClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Roles granted to the caller.
    pub fn list(&self) -> ListRequest<Role> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/permissions`
#[derive(Debug, Clone)]
pub struct PermissionsClient {
    connection: Connection,
    path: String,
}

impl PermissionsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<Permission> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<Permission> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn permission(&self, id: &str) -> PermissionClient {
        PermissionClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/permissions/{id}`
#[derive(Debug, Clone)]
pub struct PermissionClient {
    connection: Connection,
    path: String,
}

impl PermissionClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Permission> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/roles`
#[derive(Debug, Clone)]
pub struct RolesClient {
    connection: Connection,
    path: String,
}

impl RolesClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<Role> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<Role> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn role(&self, id: &str) -> RoleClient {
        RoleClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/roles/{id}`
#[derive(Debug, Clone)]
pub struct RoleClient {
    connection: Connection,
    path: String,
}

impl RoleClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Role> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn update(&self) -> UpdateRequest<Role> {
        UpdateRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/role_bindings`
#[derive(Debug, Clone)]
pub struct RoleBindingsClient {
    connection: Connection,
    path: String,
}

impl RoleBindingsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<RoleBinding> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<RoleBinding> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn role_binding(&self, id: &str) -> RoleBindingClient {
        RoleBindingClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/role_bindings/{id}`
#[derive(Debug, Clone)]
pub struct RoleBindingClient {
    connection: Connection,
    path: String,
}

impl RoleBindingClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<RoleBinding> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn update(&self) -> UpdateRequest<RoleBinding> {
        UpdateRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.connection.clone(), self.path.clone())
    }
}
