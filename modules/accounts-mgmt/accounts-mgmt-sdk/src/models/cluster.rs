use ams_core::Object;
use time::OffsetDateTime;

use super::subscription::Subscription;

/// Amount of a resource reserved by a cluster.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct ReservedResource {
    byoc: Option<String>,
    availability_zone_type: Option<String>,
    count: Option<i64>,
    created_at: Option<OffsetDateTime>,
    resource_name: Option<String>,
    resource_type: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

/// Asks whether an account may create (and reserve resources for) a cluster.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct ClusterAuthorizationRequest {
    byoc: Option<bool>,
    account_username: Option<String>,
    availability_zone: Option<String>,
    cluster_id: Option<String>,
    disconnected: Option<bool>,
    display_name: Option<String>,
    external_cluster_id: Option<String>,
    managed: Option<bool>,
    reserve: Option<bool>,
    resources: Option<Vec<ReservedResource>>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct ClusterAuthorizationResponse {
    allowed: Option<bool>,
    excess_resources: Option<Vec<ReservedResource>>,
    subscription: Option<Subscription>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct ClusterRegistrationRequest {
    authorization_token: Option<String>,
    cluster_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct ClusterRegistrationResponse {
    account_id: Option<String>,
    authorization_token: Option<String>,
    cluster_id: Option<String>,
    expires_at: Option<String>,
}
