use ams_core::client::{ActionRequest, AddRequest, Connection, GetRequest, ListRequest};

use super::child;
use crate::models::{AccessToken, Registry, RegistryCredential};

/// `/access_token`
#[derive(Debug, Clone)]
pub struct AccessTokenClient {
    connection: Connection,
    path: String,
}

impl AccessTokenClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Requests the pull secret of the authenticated account.
    pub fn post(&self) -> ActionRequest<AccessToken> {
        ActionRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/registries`
#[derive(Debug, Clone)]
pub struct RegistriesClient {
    connection: Connection,
    path: String,
}

impl RegistriesClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn list(&self) -> ListRequest<Registry> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn registry(&self, id: &str) -> RegistryClient {
        RegistryClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/registries/{id}`
#[derive(Debug, Clone)]
pub struct RegistryClient {
    connection: Connection,
    path: String,
}

impl RegistryClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Registry> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/registry_credentials`
#[derive(Debug, Clone)]
pub struct RegistryCredentialsClient {
    connection: Connection,
    path: String,
}

impl RegistryCredentialsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<RegistryCredential> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<RegistryCredential> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn registry_credential(&self, id: &str) -> RegistryCredentialClient {
        RegistryCredentialClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/registry_credentials/{id}`
#[derive(Debug, Clone)]
pub struct RegistryCredentialClient {
    connection: Connection,
    path: String,
}

impl RegistryCredentialClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<RegistryCredential> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}
