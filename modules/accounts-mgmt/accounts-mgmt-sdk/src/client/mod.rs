//! Typed client tree of the accounts management API.
//!
//! Every client only knows its path: creating one is free and does not talk
//! to the server. Verb methods return the generic requests of
//! [`ams_core::client`], which are sent with `.send().await`.
//!
//! ```no_run
//! # async fn run() -> Result<(), ams_core::client::ClientError> {
//! use accounts_mgmt_sdk::Client;
//! use ams_core::client::Connection;
//!
//! let connection = Connection::builder()
//!     .url("https://api.example.com")
//!     .token("secret")
//!     .build();
//! let client = Client::new(connection);
//! let accounts = client.accounts().list().size(10).send().await?;
//! for account in accounts.into_items() {
//!     println!("{} {}", account.id(), account.username());
//! }
//! # Ok(())
//! # }
//! ```

mod access;
mod accounts;
mod clusters;
mod feature_toggles;
mod organizations;
mod registries;
mod skus;
mod subscriptions;
mod support_cases;

pub use access::{
    CurrentAccessClient, CurrentAccountClient, PermissionClient, PermissionsClient,
    RoleBindingClient, RoleBindingsClient, RoleClient, RolesClient,
};
pub use accounts::{AccountClient, AccountsClient};
pub use clusters::{ClusterAuthorizationsClient, ClusterRegistrationsClient};
pub use feature_toggles::{FeatureToggleClient, FeatureTogglesClient};
pub use organizations::{
    OrganizationClient, OrganizationsClient, QuotaSummaryClient, ResourceQuotaClient,
    ResourceQuotasClient,
};
pub use registries::{
    AccessTokenClient, RegistriesClient, RegistryClient, RegistryCredentialClient,
    RegistryCredentialsClient,
};
pub use skus::{SkuClient, SkusClient};
pub use subscriptions::{
    SubscriptionClient, SubscriptionNotifyClient, SubscriptionReservedResourceClient,
    SubscriptionReservedResourcesClient, SubscriptionsClient,
};
pub use support_cases::SupportCasesClient;

use ams_core::client::Connection;

use crate::API_PREFIX;

/// Path of the child `segment` below `path`.
fn child(path: &str, segment: &str) -> String {
    format!("{path}/{segment}")
}

/// Root of the accounts management API, version 1.
#[derive(Debug, Clone)]
pub struct Client {
    connection: Connection,
    path: String,
}

impl Client {
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        Self::with_prefix(connection, API_PREFIX)
    }

    /// Client for a server mounted under a different prefix.
    #[must_use]
    pub fn with_prefix(connection: Connection, prefix: &str) -> Self {
        Self {
            connection,
            path: prefix.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn access_token(&self) -> AccessTokenClient {
        AccessTokenClient::new(self.connection.clone(), child(&self.path, "access_token"))
    }

    #[must_use]
    pub fn accounts(&self) -> AccountsClient {
        AccountsClient::new(self.connection.clone(), child(&self.path, "accounts"))
    }

    #[must_use]
    pub fn cluster_authorizations(&self) -> ClusterAuthorizationsClient {
        ClusterAuthorizationsClient::new(
            self.connection.clone(),
            child(&self.path, "cluster_authorizations"),
        )
    }

    #[must_use]
    pub fn cluster_registrations(&self) -> ClusterRegistrationsClient {
        ClusterRegistrationsClient::new(
            self.connection.clone(),
            child(&self.path, "cluster_registrations"),
        )
    }

    #[must_use]
    pub fn current_access(&self) -> CurrentAccessClient {
        CurrentAccessClient::new(self.connection.clone(), child(&self.path, "current_access"))
    }

    #[must_use]
    pub fn current_account(&self) -> CurrentAccountClient {
        CurrentAccountClient::new(
            self.connection.clone(),
            child(&self.path, "current_account"),
        )
    }

    #[must_use]
    pub fn feature_toggles(&self) -> FeatureTogglesClient {
        FeatureTogglesClient::new(
            self.connection.clone(),
            child(&self.path, "feature_toggles"),
        )
    }

    #[must_use]
    pub fn organizations(&self) -> OrganizationsClient {
        OrganizationsClient::new(self.connection.clone(), child(&self.path, "organizations"))
    }

    #[must_use]
    pub fn permissions(&self) -> PermissionsClient {
        PermissionsClient::new(self.connection.clone(), child(&self.path, "permissions"))
    }

    #[must_use]
    pub fn registries(&self) -> RegistriesClient {
        RegistriesClient::new(self.connection.clone(), child(&self.path, "registries"))
    }

    #[must_use]
    pub fn registry_credentials(&self) -> RegistryCredentialsClient {
        RegistryCredentialsClient::new(
            self.connection.clone(),
            child(&self.path, "registry_credentials"),
        )
    }

    #[must_use]
    pub fn role_bindings(&self) -> RoleBindingsClient {
        RoleBindingsClient::new(self.connection.clone(), child(&self.path, "role_bindings"))
    }

    #[must_use]
    pub fn roles(&self) -> RolesClient {
        RolesClient::new(self.connection.clone(), child(&self.path, "roles"))
    }

    #[must_use]
    pub fn skus(&self) -> SkusClient {
        SkusClient::new(self.connection.clone(), child(&self.path, "skus"))
    }

    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionsClient {
        SubscriptionsClient::new(self.connection.clone(), child(&self.path, "subscriptions"))
    }

    #[must_use]
    pub fn support_cases(&self) -> SupportCasesClient {
        SupportCasesClient::new(self.connection.clone(), child(&self.path, "support_cases"))
    }
}
