use ams_core::client::{
    AddRequest, Connection, DeleteRequest, GetRequest, ListRequest, UpdateRequest,
};

use super::child;
use crate::models::{Organization, QuotaSummary, ResourceQuota};

/// `/organizations`
#[derive(Debug, Clone)]
pub struct OrganizationsClient {
    connection: Connection,
    path: String,
}

impl OrganizationsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<Organization> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<Organization> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn organization(&self, id: &str) -> OrganizationClient {
        OrganizationClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/organizations/{id}`
#[derive(Debug, Clone)]
pub struct OrganizationClient {
    connection: Connection,
    path: String,
}

impl OrganizationClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Organization> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn update(&self) -> UpdateRequest<Organization> {
        UpdateRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn quota_summary(&self) -> QuotaSummaryClient {
        QuotaSummaryClient {
            connection: self.connection.clone(),
            path: child(&self.path, "quota_summary"),
        }
    }

    #[must_use]
    pub fn resource_quota(&self) -> ResourceQuotasClient {
        ResourceQuotasClient {
            connection: self.connection.clone(),
            path: child(&self.path, "resource_quota"),
        }
    }
}

/// `/organizations/{id}/quota_summary`
#[derive(Debug, Clone)]
pub struct QuotaSummaryClient {
    connection: Connection,
    path: String,
}

impl QuotaSummaryClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn list(&self) -> ListRequest<QuotaSummary> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/organizations/{id}/resource_quota`
#[derive(Debug, Clone)]
pub struct ResourceQuotasClient {
    connection: Connection,
    path: String,
}

impl ResourceQuotasClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&self) -> AddRequest<ResourceQuota> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn list(&self) -> ListRequest<ResourceQuota> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn resource_quota(&self, id: &str) -> ResourceQuotaClient {
        ResourceQuotaClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/organizations/{id}/resource_quota/{id}`
#[derive(Debug, Clone)]
pub struct ResourceQuotaClient {
    connection: Connection,
    path: String,
}

impl ResourceQuotaClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<ResourceQuota> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn update(&self) -> UpdateRequest<ResourceQuota> {
        UpdateRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.connection.clone(), self.path.clone())
    }
}
