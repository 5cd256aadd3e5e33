use ams_core::Object;
use time::OffsetDateTime;

use super::account::Account;
use super::organization::Organization;
use super::subscription::Subscription;

/// Permission to perform `action` on `resource`.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Permission")]
pub struct Permission {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    action: Option<String>,
    resource: Option<String>,
    role_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Role")]
pub struct Role {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    name: Option<String>,
    permissions: Option<Vec<Permission>>,
}

/// Grants a role to an account, scoped by `type` to the whole application, an
/// organization or a subscription.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "RoleBinding")]
pub struct RoleBinding {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    account: Option<Account>,
    account_id: Option<String>,
    config_managed: Option<bool>,
    created_at: Option<OffsetDateTime>,
    organization: Option<Organization>,
    organization_id: Option<String>,
    role: Option<Role>,
    role_id: Option<String>,
    subscription: Option<Subscription>,
    subscription_id: Option<String>,
    #[object(rename = "type")]
    type_: Option<String>,
    updated_at: Option<OffsetDateTime>,
}
