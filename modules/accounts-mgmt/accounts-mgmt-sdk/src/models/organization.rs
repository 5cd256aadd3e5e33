use ams_core::Object;
use time::OffsetDateTime;

use super::account::Label;

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Organization")]
pub struct Organization {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    created_at: Option<OffsetDateTime>,
    ebs_account_id: Option<String>,
    external_id: Option<String>,
    labels: Option<Vec<Label>>,
    name: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

/// Amount of a resource an organization is allowed to consume.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "ResourceQuota")]
pub struct ResourceQuota {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    byoc: Option<String>,
    sku: Option<String>,
    allowed: Option<i64>,
    availability_zone_type: Option<String>,
    created_at: Option<OffsetDateTime>,
    organization_id: Option<String>,
    resource_name: Option<String>,
    resource_type: Option<String>,
    sku_count: Option<i64>,
    #[object(rename = "type")]
    type_: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

/// Allowed and reserved amounts of one resource for an organization.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct QuotaSummary {
    byoc: Option<String>,
    allowed: Option<i64>,
    availability_zone_type: Option<String>,
    organization_id: Option<String>,
    reserved: Option<i64>,
    resource_name: Option<String>,
    resource_type: Option<String>,
}
