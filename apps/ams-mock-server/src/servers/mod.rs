//! Implementations of the server traits over the in-memory [`Store`].
//!
//! Item accessors answer `None` for unknown ids, which the dispatchers turn
//! into 404. An item removed between the accessor and the handler is
//! reported the same way through the response status.

mod access;
mod accounts;
mod catalog;
mod clusters;
mod organizations;
mod subscriptions;
mod support_cases;

use std::sync::Arc;

use accounts_mgmt::{
    AccessTokenServer, AccountsServer, ClusterAuthorizationsServer, ClusterRegistrationsServer,
    CurrentAccessServer, CurrentAccountServer, FeatureTogglesServer, OrganizationsServer,
    PermissionsServer, RegistriesServer, RegistryCredentialsServer, RoleBindingsServer,
    RolesServer, RootServer, SkusServer, SubscriptionsServer, SupportCasesServer,
};
use ams_core::Object;
use ams_core::server::{
    DeleteServerResponse, GetServerResponse, ListServerRequest, ListServerResponse,
    UpdateServerRequest, UpdateServerResponse,
};
use anyhow::Result;
use axum::http::StatusCode;

use crate::store::{Collection, Conflict, Store};

/// Root of the served tree.
pub struct Mock {
    store: Arc<Store>,
    current_username: Option<Arc<str>>,
}

impl Mock {
    /// `current_username` selects the account reported as the caller, the
    /// first stored account when `None`.
    #[must_use]
    pub fn new(store: Arc<Store>, current_username: Option<&str>) -> Self {
        Self {
            store,
            current_username: current_username.map(Arc::from),
        }
    }
}

impl RootServer for Mock {
    fn access_token(&self) -> Option<Arc<dyn AccessTokenServer>> {
        Some(Arc::new(catalog::AccessTokens::new(
            self.store.clone(),
            self.current_username.clone(),
        )))
    }

    fn accounts(&self) -> Option<Arc<dyn AccountsServer>> {
        Some(Arc::new(accounts::Accounts::new(self.store.clone())))
    }

    fn cluster_authorizations(&self) -> Option<Arc<dyn ClusterAuthorizationsServer>> {
        Some(Arc::new(clusters::Authorizations::new(self.store.clone())))
    }

    fn cluster_registrations(&self) -> Option<Arc<dyn ClusterRegistrationsServer>> {
        Some(Arc::new(clusters::Registrations::new(
            self.store.clone(),
            self.current_username.clone(),
        )))
    }

    fn current_access(&self) -> Option<Arc<dyn CurrentAccessServer>> {
        Some(Arc::new(access::CurrentAccess::new(
            self.store.clone(),
            self.current_username.clone(),
        )))
    }

    fn current_account(&self) -> Option<Arc<dyn CurrentAccountServer>> {
        Some(Arc::new(access::CurrentAccount::new(
            self.store.clone(),
            self.current_username.clone(),
        )))
    }

    fn feature_toggles(&self) -> Option<Arc<dyn FeatureTogglesServer>> {
        Some(Arc::new(catalog::FeatureToggles::new(self.store.clone())))
    }

    fn organizations(&self) -> Option<Arc<dyn OrganizationsServer>> {
        Some(Arc::new(organizations::Organizations::new(
            self.store.clone(),
        )))
    }

    fn permissions(&self) -> Option<Arc<dyn PermissionsServer>> {
        Some(Arc::new(access::Permissions::new(self.store.clone())))
    }

    fn registries(&self) -> Option<Arc<dyn RegistriesServer>> {
        Some(Arc::new(catalog::Registries::new(self.store.clone())))
    }

    fn registry_credentials(&self) -> Option<Arc<dyn RegistryCredentialsServer>> {
        Some(Arc::new(catalog::RegistryCredentials::new(
            self.store.clone(),
        )))
    }

    fn role_bindings(&self) -> Option<Arc<dyn RoleBindingsServer>> {
        Some(Arc::new(access::RoleBindings::new(self.store.clone())))
    }

    fn roles(&self) -> Option<Arc<dyn RolesServer>> {
        Some(Arc::new(access::Roles::new(self.store.clone())))
    }

    fn skus(&self) -> Option<Arc<dyn SkusServer>> {
        Some(Arc::new(catalog::Skus::new(self.store.clone())))
    }

    fn subscriptions(&self) -> Option<Arc<dyn SubscriptionsServer>> {
        Some(Arc::new(subscriptions::Subscriptions::new(
            self.store.clone(),
        )))
    }

    fn support_cases(&self) -> Option<Arc<dyn SupportCasesServer>> {
        Some(Arc::new(support_cases::SupportCases::new(
            self.store.clone(),
        )))
    }
}

/// Account acting as the caller.
fn caller(store: &Store, username: Option<&str>) -> Result<Option<accounts_mgmt_sdk::Account>> {
    let accounts = store.accounts.all(None)?;
    Ok(match username {
        Some(username) => accounts.into_iter().find(|a| a.username() == username),
        None => accounts.into_iter().next(),
    })
}

fn list_into<T: Object>(
    collection: &Collection<T>,
    parent: Option<&str>,
    request: &ListServerRequest,
    response: &mut ListServerResponse<T>,
) -> Result<()> {
    collection.list(parent, request)?.fill(response)
}

fn get_into<T: Object>(
    collection: &Collection<T>,
    parent: Option<&str>,
    id: &str,
    response: &mut GetServerResponse<T>,
) -> Result<()> {
    match collection.get(parent, id)? {
        Some(object) => response.body(object),
        None => response.status(StatusCode::NOT_FOUND),
    };
    Ok(())
}

/// Merges the request body and answers 200 with the stored result, 409 when
/// the change repeats a unique value.
fn update_into<T: Object>(
    collection: &Collection<T>,
    parent: Option<&str>,
    id: &str,
    request: &UpdateServerRequest<T>,
    response: &mut UpdateServerResponse<T>,
) -> Result<()> {
    match collection.update(parent, id, request.body()) {
        Ok(Some(object)) => response.status(StatusCode::OK).body(object),
        Ok(None) => response.status(StatusCode::NOT_FOUND),
        Err(e) if e.is::<Conflict>() => {
            tracing::debug!(id, error = %e, "update rejected");
            response.status(StatusCode::CONFLICT)
        }
        Err(e) => return Err(e),
    };
    Ok(())
}

fn delete_from<T: Object>(
    collection: &Collection<T>,
    parent: Option<&str>,
    id: &str,
    response: &mut DeleteServerResponse,
) {
    if !collection.remove(parent, id) {
        response.status(StatusCode::NOT_FOUND);
    }
}
