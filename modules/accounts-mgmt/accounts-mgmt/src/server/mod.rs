//! Server traits of every resource and the dispatchers that route to them.
//!
//! Handlers receive the request context, the typed request and the response
//! to fill. Returning an error makes the dispatcher log it and answer a
//! generic 500; the detail never reaches the caller.

mod access;
mod accounts;
mod clusters;
mod feature_toggles;
mod organizations;
mod registries;
mod skus;
mod subscriptions;
mod support_cases;

use std::sync::Arc;

use ams_core::server::{RequestContext, method_not_allowed, not_found};
use axum::body::Body;
use axum::response::Response;

pub use access::{
    CurrentAccessServer, CurrentAccountServer, PermissionServer, PermissionsServer,
    RoleBindingServer, RoleBindingsServer, RoleServer, RolesServer, dispatch_current_access,
    dispatch_current_account, dispatch_permission, dispatch_permissions, dispatch_role,
    dispatch_role_binding, dispatch_role_bindings, dispatch_roles,
};
pub use accounts::{AccountServer, AccountsServer, dispatch_account, dispatch_accounts};
pub use clusters::{
    ClusterAuthorizationsServer, ClusterRegistrationsServer, dispatch_cluster_authorizations,
    dispatch_cluster_registrations,
};
pub use feature_toggles::{
    FeatureToggleServer, FeatureTogglesServer, dispatch_feature_toggle, dispatch_feature_toggles,
};
pub use organizations::{
    OrganizationServer, OrganizationsServer, QuotaSummaryServer, ResourceQuotaServer,
    ResourceQuotasServer, dispatch_organization, dispatch_organizations, dispatch_quota_summary,
    dispatch_resource_quota, dispatch_resource_quotas,
};
pub use registries::{
    AccessTokenServer, RegistriesServer, RegistryCredentialServer, RegistryCredentialsServer,
    RegistryServer, dispatch_access_token, dispatch_registries, dispatch_registry,
    dispatch_registry_credential, dispatch_registry_credentials,
};
pub use skus::{SkuServer, SkusServer, dispatch_sku, dispatch_skus};
pub use subscriptions::{
    SubscriptionNotifyServer, SubscriptionReservedResourceServer,
    SubscriptionReservedResourcesServer, SubscriptionServer, SubscriptionsServer,
    dispatch_subscription, dispatch_subscription_notify, dispatch_subscription_reserved_resource,
    dispatch_subscription_reserved_resources, dispatch_subscriptions,
};
pub use support_cases::{SupportCasesServer, dispatch_support_cases};

/// Entry point of the resource tree.
///
/// Each accessor returns the server of a top level collection, `None` when
/// the implementation doesn't serve it.
pub trait RootServer: Send + Sync {
    fn access_token(&self) -> Option<Arc<dyn AccessTokenServer>>;
    fn accounts(&self) -> Option<Arc<dyn AccountsServer>>;
    fn cluster_authorizations(&self) -> Option<Arc<dyn ClusterAuthorizationsServer>>;
    fn cluster_registrations(&self) -> Option<Arc<dyn ClusterRegistrationsServer>>;
    fn current_access(&self) -> Option<Arc<dyn CurrentAccessServer>>;
    fn current_account(&self) -> Option<Arc<dyn CurrentAccountServer>>;
    fn feature_toggles(&self) -> Option<Arc<dyn FeatureTogglesServer>>;
    fn organizations(&self) -> Option<Arc<dyn OrganizationsServer>>;
    fn permissions(&self) -> Option<Arc<dyn PermissionsServer>>;
    fn registries(&self) -> Option<Arc<dyn RegistriesServer>>;
    fn registry_credentials(&self) -> Option<Arc<dyn RegistryCredentialsServer>>;
    fn role_bindings(&self) -> Option<Arc<dyn RoleBindingsServer>>;
    fn roles(&self) -> Option<Arc<dyn RolesServer>>;
    fn skus(&self) -> Option<Arc<dyn SkusServer>>;
    fn subscriptions(&self) -> Option<Arc<dyn SubscriptionsServer>>;
    fn support_cases(&self) -> Option<Arc<dyn SupportCasesServer>>;
}

/// Routes the segments below the API prefix.
pub async fn dispatch_root(
    ctx: &RequestContext,
    body: Body,
    server: &dyn RootServer,
    segments: &[&str],
) -> Response {
    let Some((segment, rest)) = segments.split_first() else {
        return method_not_allowed(ctx);
    };
    match *segment {
        "access_token" => match server.access_token() {
            Some(target) => dispatch_access_token(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "accounts" => match server.accounts() {
            Some(target) => dispatch_accounts(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "cluster_authorizations" => match server.cluster_authorizations() {
            Some(target) => dispatch_cluster_authorizations(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "cluster_registrations" => match server.cluster_registrations() {
            Some(target) => dispatch_cluster_registrations(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "current_access" => match server.current_access() {
            Some(target) => dispatch_current_access(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "current_account" => match server.current_account() {
            Some(target) => dispatch_current_account(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "feature_toggles" => match server.feature_toggles() {
            Some(target) => dispatch_feature_toggles(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "organizations" => match server.organizations() {
            Some(target) => dispatch_organizations(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "permissions" => match server.permissions() {
            Some(target) => dispatch_permissions(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "registries" => match server.registries() {
            Some(target) => dispatch_registries(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "registry_credentials" => match server.registry_credentials() {
            Some(target) => dispatch_registry_credentials(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "role_bindings" => match server.role_bindings() {
            Some(target) => dispatch_role_bindings(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "roles" => match server.roles() {
            Some(target) => dispatch_roles(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "skus" => match server.skus() {
            Some(target) => dispatch_skus(ctx, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "subscriptions" => match server.subscriptions() {
            Some(target) => dispatch_subscriptions(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        "support_cases" => match server.support_cases() {
            Some(target) => dispatch_support_cases(ctx, body, target.as_ref(), rest).await,
            None => not_found(ctx),
        },
        _ => not_found(ctx),
    }
}
