use ams_core::client::{Connection, PostRequest};

use crate::models::{
    ClusterAuthorizationRequest, ClusterAuthorizationResponse, ClusterRegistrationRequest,
    ClusterRegistrationResponse,
};

/// `/cluster_authorizations`
#[derive(Debug, Clone)]
pub struct ClusterAuthorizationsClient {
    connection: Connection,
    path: String,
}

impl ClusterAuthorizationsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Authorizes a cluster, optionally reserving its resources.
    pub fn post(&self) -> PostRequest<ClusterAuthorizationRequest, ClusterAuthorizationResponse> {
        PostRequest::new(self.connection.clone(), self.path.clone())
    }
}

/// `/cluster_registrations`
#[derive(Debug, Clone)]
pub struct ClusterRegistrationsClient {
    connection: Connection,
    path: String,
}

impl ClusterRegistrationsClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn post(&self) -> PostRequest<ClusterRegistrationRequest, ClusterRegistrationResponse> {
        PostRequest::new(self.connection.clone(), self.path.clone())
    }
}
