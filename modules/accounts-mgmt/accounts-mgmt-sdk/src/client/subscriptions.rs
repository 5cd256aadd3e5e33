use ams_core::client::{AddRequest, Connection, DeleteRequest, GetRequest, ListRequest};

use super::child;
use crate::models::{ReservedResource, Subscription, SubscriptionNotify};

/// `/subscriptions`
#[derive(Debug, Clone)]
pub struct SubscriptionsClient {
    connection: Connection,
    path: String,
}

impl SubscriptionsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn list(&self) -> ListRequest<Subscription> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn subscription(&self, id: &str) -> SubscriptionClient {
        SubscriptionClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/subscriptions/{id}`
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    connection: Connection,
    path: String,
}

impl SubscriptionClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<Subscription> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn notify(&self) -> SubscriptionNotifyClient {
        SubscriptionNotifyClient {
            connection: self.connection.clone(),
            path: child(&self.path, "notify"),
        }
    }

    #[must_use]
    pub fn reserved_resources(&self) -> SubscriptionReservedResourcesClient {
        SubscriptionReservedResourcesClient {
            connection: self.connection.clone(),
            path: child(&self.path, "reserved_resources"),
        }
    }
}

/// `/subscriptions/{id}/notify`
#[derive(Debug, Clone)]
pub struct SubscriptionNotifyClient {
    connection: Connection,
    path: String,
}

impl SubscriptionNotifyClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sends a notification e-mail to the subscription owners.
    pub fn add(&self) -> AddRequest<SubscriptionNotify> {
        AddRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/subscriptions/{id}/reserved_resources`
#[derive(Debug, Clone)]
pub struct SubscriptionReservedResourcesClient {
    connection: Connection,
    path: String,
}

impl SubscriptionReservedResourcesClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn list(&self) -> ListRequest<ReservedResource> {
        ListRequest::new(self.connection.clone(), self.path.clone())
    }

    #[must_use]
    pub fn reserved_resource(&self, id: &str) -> SubscriptionReservedResourceClient {
        SubscriptionReservedResourceClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/subscriptions/{id}/reserved_resources/{id}`
#[derive(Debug, Clone)]
pub struct SubscriptionReservedResourceClient {
    connection: Connection,
    path: String,
}

impl SubscriptionReservedResourceClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<ReservedResource> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}
