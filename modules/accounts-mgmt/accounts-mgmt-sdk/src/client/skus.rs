use ams_core::client::{Connection, GetRequest, ListRequest};

use super::child;
use crate::models::Sku;

/// `/skus`
#[derive(Debug, Clone)]
pub struct SkusClient {
    connection: Connection,
    path: String,
}

impl SkusClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn list(&self) -> ListRequest<Sku> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn sku(&self, id: &str) -> SkuClient {
        SkuClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/skus/{id}`
#[derive(Debug, Clone)]
pub struct SkuClient {
    connection: Connection,
    path: String,
}

impl SkuClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Sku> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}
