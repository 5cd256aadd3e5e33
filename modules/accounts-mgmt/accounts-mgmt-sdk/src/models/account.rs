use ams_core::Object;
use time::OffsetDateTime;

use super::organization::Organization;

/// A user account, member of exactly one organization.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Account")]
pub struct Account {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    ban_code: Option<String>,
    ban_description: Option<String>,
    banned: Option<bool>,
    created_at: Option<OffsetDateTime>,
    email: Option<String>,
    first_name: Option<String>,
    labels: Option<Vec<Label>>,
    last_name: Option<String>,
    name: Option<String>,
    organization: Option<Organization>,
    service_account: Option<bool>,
    updated_at: Option<OffsetDateTime>,
    username: Option<String>,
}

/// Key/value pair attached to accounts, organizations and subscriptions.
///
/// Internal labels are only visible to service administrators.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Label")]
pub struct Label {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    created_at: Option<OffsetDateTime>,
    internal: Option<bool>,
    key: Option<String>,
    updated_at: Option<OffsetDateTime>,
    value: Option<String>,
}
