use ams_core::client::{AddRequest, Connection, GetRequest, ListRequest, UpdateRequest};

use super::child;
use crate::models::Account;

/// `/accounts`
#[derive(Debug, Clone)]
pub struct AccountsClient {
    connection: Connection,
    path: String,
}

impl AccountsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<Account> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<Account> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn account(&self, id: &str) -> AccountClient {
        AccountClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/accounts/{id}`
#[derive(Debug, Clone)]
pub struct AccountClient {
    connection: Connection,
    path: String,
}

impl AccountClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Account> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn update(&self) -> UpdateRequest<Account> {
        UpdateRequest::new(self.connection.clone(), self.path.clone())
    }
}
