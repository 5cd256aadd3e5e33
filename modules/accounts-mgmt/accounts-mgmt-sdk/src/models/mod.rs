//! Objects of the accounts management API.
//!
//! Every attribute is optional: `name()` returns the zero value when unset and
//! `get_name()` tells whether it was set. Objects are built with their
//! builders (`Account::builder()`) and are immutable afterwards.

mod account;
mod cluster;
mod feature_toggle;
mod organization;
mod registry;
mod role;
mod sku;
mod subscription;
mod support_case;

pub use account::{Account, AccountBuilder, AccountData, Label, LabelBuilder, LabelData};
pub use cluster::{
    ClusterAuthorizationRequest, ClusterAuthorizationRequestBuilder,
    ClusterAuthorizationRequestData, ClusterAuthorizationResponse,
    ClusterAuthorizationResponseBuilder, ClusterAuthorizationResponseData,
    ClusterRegistrationRequest, ClusterRegistrationRequestBuilder, ClusterRegistrationRequestData,
    ClusterRegistrationResponse, ClusterRegistrationResponseBuilder,
    ClusterRegistrationResponseData, ReservedResource, ReservedResourceBuilder,
    ReservedResourceData,
};
pub use feature_toggle::{FeatureToggle, FeatureToggleBuilder, FeatureToggleData};
pub use organization::{
    Organization, OrganizationBuilder, OrganizationData, QuotaSummary, QuotaSummaryBuilder,
    QuotaSummaryData, ResourceQuota, ResourceQuotaBuilder, ResourceQuotaData,
};
pub use registry::{
    AccessToken, AccessTokenAuth, AccessTokenAuthBuilder, AccessTokenAuthData, AccessTokenBuilder,
    AccessTokenData, Registry, RegistryBuilder, RegistryCredential, RegistryCredentialBuilder,
    RegistryCredentialData, RegistryData,
};
pub use role::{
    Permission, PermissionBuilder, PermissionData, Role, RoleBinding, RoleBindingBuilder,
    RoleBindingData, RoleBuilder, RoleData,
};
pub use sku::{
    Resource, ResourceBuilder, ResourceData, Sku, SkuBuilder, SkuData, SkuRule, SkuRuleBuilder,
    SkuRuleData,
};
pub use subscription::{
    Plan, PlanBuilder, PlanData, Subscription, SubscriptionBuilder, SubscriptionData,
    SubscriptionNotify, SubscriptionNotifyBuilder, SubscriptionNotifyData,
    SubscriptionRegistration, SubscriptionRegistrationBuilder, SubscriptionRegistrationData,
    TemplateParameter, TemplateParameterBuilder, TemplateParameterData,
};
pub use support_case::{
    SupportCaseRequest, SupportCaseRequestBuilder, SupportCaseRequestData, SupportCaseResponse,
    SupportCaseResponseBuilder, SupportCaseResponseData,
};

use ams_core::List;

pub type AccessTokenAuthList = List<AccessTokenAuth>;
pub type AccessTokenList = List<AccessToken>;
pub type AccountList = List<Account>;
pub type ClusterAuthorizationRequestList = List<ClusterAuthorizationRequest>;
pub type ClusterAuthorizationResponseList = List<ClusterAuthorizationResponse>;
pub type ClusterRegistrationRequestList = List<ClusterRegistrationRequest>;
pub type ClusterRegistrationResponseList = List<ClusterRegistrationResponse>;
pub type FeatureToggleList = List<FeatureToggle>;
pub type LabelList = List<Label>;
pub type OrganizationList = List<Organization>;
pub type PermissionList = List<Permission>;
pub type PlanList = List<Plan>;
pub type QuotaSummaryList = List<QuotaSummary>;
pub type RegistryCredentialList = List<RegistryCredential>;
pub type RegistryList = List<Registry>;
pub type ReservedResourceList = List<ReservedResource>;
pub type ResourceList = List<Resource>;
pub type ResourceQuotaList = List<ResourceQuota>;
pub type RoleBindingList = List<RoleBinding>;
pub type RoleList = List<Role>;
pub type SkuList = List<Sku>;
pub type SkuRuleList = List<SkuRule>;
pub type SubscriptionList = List<Subscription>;
pub type SubscriptionNotifyList = List<SubscriptionNotify>;
pub type SubscriptionRegistrationList = List<SubscriptionRegistration>;
pub type SupportCaseRequestList = List<SupportCaseRequest>;
pub type SupportCaseResponseList = List<SupportCaseResponse>;
pub type TemplateParameterList = List<TemplateParameter>;
