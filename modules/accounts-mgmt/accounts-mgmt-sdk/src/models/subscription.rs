use ams_core::Object;
use time::OffsetDateTime;

use super::account::Account;
use super::registry::RegistryCredential;

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Plan")]
pub struct Plan {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    name: Option<String>,
    #[object(rename = "type")]
    type_: Option<String>,
}

/// Subscription of an organization for one cluster.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Subscription")]
pub struct Subscription {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    cluster_id: Option<String>,
    created_at: Option<OffsetDateTime>,
    creator: Option<Account>,
    display_name: Option<String>,
    external_cluster_id: Option<String>,
    last_telemetry_date: Option<OffsetDateTime>,
    organization_id: Option<String>,
    plan: Option<Plan>,
    registry_credential: Option<RegistryCredential>,
    updated_at: Option<OffsetDateTime>,
}

/// E-mail notification about a subscription, rendered from a template.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct SubscriptionNotify {
    bcc_address: Option<String>,
    cluster_id: Option<String>,
    cluster_uuid: Option<String>,
    subject: Option<String>,
    subscription_id: Option<String>,
    template_name: Option<String>,
    template_parameters: Option<Vec<TemplateParameter>>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct TemplateParameter {
    content: Option<String>,
    name: Option<String>,
}

/// Subscription fields reported by a cluster when it registers.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct SubscriptionRegistration {
    cluster_uuid: Option<String>,
    console_url: Option<String>,
    display_name: Option<String>,
    plan_id: Option<String>,
    status: Option<String>,
}
