use std::collections::BTreeMap;

use ams_core::Object;
use time::OffsetDateTime;

use super::account::Account;

/// Container image registry.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Registry")]
pub struct Registry {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    url: Option<String>,
    cloud_alias: Option<bool>,
    created_at: Option<OffsetDateTime>,
    name: Option<String>,
    org_name: Option<String>,
    team_name: Option<String>,
    #[object(rename = "type")]
    type_: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

/// Pull credentials of an account for a registry.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "RegistryCredential")]
pub struct RegistryCredential {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    account: Option<Account>,
    created_at: Option<OffsetDateTime>,
    external_resource_id: Option<String>,
    registry: Option<Registry>,
    token: Option<String>,
    updated_at: Option<OffsetDateTime>,
    username: Option<String>,
}

/// Pull secret of the current account, keyed by registry host.
#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct AccessToken {
    auths: Option<BTreeMap<String, AccessTokenAuth>>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
pub struct AccessTokenAuth {
    auth: Option<String>,
    email: Option<String>,
}
