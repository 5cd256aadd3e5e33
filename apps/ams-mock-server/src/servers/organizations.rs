//! Organizations, their resource quotas and the summary of quota usage.

use std::collections::BTreeMap;
use std::sync::Arc;

use accounts_mgmt::{
    OrganizationServer, OrganizationsServer, QuotaSummaryServer, ResourceQuotaServer,
    ResourceQuotasServer,
};
use accounts_mgmt_sdk::{Organization, QuotaSummary, ReservedResource, ResourceQuota};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
    UpdateServerRequest, UpdateServerResponse,
};
use anyhow::Result;
use async_trait::async_trait;

use super::{delete_from, get_into, list_into, update_into};
use crate::store::{Page, Store};

/// Attributes identifying what a quota or a reservation is about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct ResourceKey {
    resource_name: String,
    resource_type: String,
    byoc: String,
    availability_zone_type: String,
}

impl ResourceKey {
    fn of_quota(quota: &ResourceQuota) -> Self {
        Self {
            resource_name: quota.resource_name().to_owned(),
            resource_type: quota.resource_type().to_owned(),
            byoc: quota.byoc().to_owned(),
            availability_zone_type: quota.availability_zone_type().to_owned(),
        }
    }

    pub(super) fn of_reserved(resource: &ReservedResource) -> Self {
        Self {
            resource_name: resource.resource_name().to_owned(),
            resource_type: resource.resource_type().to_owned(),
            byoc: resource.byoc().to_owned(),
            availability_zone_type: resource.availability_zone_type().to_owned(),
        }
    }

    /// Whether `self`, a requested resource, is covered by `quota`. Empty
    /// requested attributes match anything.
    pub(super) fn covered_by(&self, quota: &Self) -> bool {
        let matches = |wanted: &str, offered: &str| wanted.is_empty() || wanted == offered;
        matches(&self.resource_name, &quota.resource_name)
            && matches(&self.resource_type, &quota.resource_type)
            && matches(&self.byoc, &quota.byoc)
            && matches(&self.availability_zone_type, &quota.availability_zone_type)
    }
}

/// Allowed and reserved counts of one organization, per resource.
pub(super) fn usage(
    store: &Store,
    organization: &str,
) -> Result<BTreeMap<ResourceKey, (i64, i64)>> {
    let mut usage: BTreeMap<ResourceKey, (i64, i64)> = BTreeMap::new();
    for quota in store.resource_quotas.all(Some(organization))? {
        usage.entry(ResourceKey::of_quota(&quota)).or_default().0 += quota.allowed();
    }
    for subscription in store.subscriptions.all(None)? {
        if subscription.organization_id() != organization {
            continue;
        }
        for reserved in store.reserved_resources.all(Some(subscription.id()))? {
            let key = ResourceKey::of_reserved(&reserved);
            if let Some(entry) = usage.iter_mut().find(|(quota, _)| key.covered_by(quota)) {
                entry.1.1 += reserved.count();
            }
        }
    }
    Ok(usage)
}

fn summary(
    organization: &str,
    key: ResourceKey,
    allowed: i64,
    reserved: i64,
) -> Result<QuotaSummary> {
    Ok(QuotaSummary::builder()
        .organization_id(organization)
        .resource_name(key.resource_name)
        .resource_type(key.resource_type)
        .byoc(key.byoc)
        .availability_zone_type(key.availability_zone_type)
        .allowed(allowed)
        .reserved(reserved)
        .build()?)
}

pub struct Organizations {
    store: Arc<Store>,
}

impl Organizations {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrganizationsServer for Organizations {
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<Organization>,
        response: &mut AddServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        let stored = self.store.organizations.add(
            None,
            &self.store.path("organizations"),
            request.body(),
        )?;
        tracing::info!(
            id = stored.id(),
            name = stored.name(),
            "organization created"
        );
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.organizations, None, &request, response)
    }

    fn organization(&self, id: &str) -> Option<Arc<dyn OrganizationServer>> {
        self.store.organizations.contains(None, id).then(|| {
            Arc::new(OrganizationItem {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn OrganizationServer>
        })
    }
}

struct OrganizationItem {
    store: Arc<Store>,
    id: String,
}

impl OrganizationItem {
    fn scoped(&self) -> Scoped {
        Scoped {
            store: self.store.clone(),
            organization: self.id.clone(),
        }
    }
}

#[async_trait]
impl OrganizationServer for OrganizationItem {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.organizations, None, &self.id, response)
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<Organization>,
        response: &mut UpdateServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        update_into(
            &self.store.organizations,
            None,
            &self.id,
            &request,
            response,
        )
    }

    fn quota_summary(&self) -> Option<Arc<dyn QuotaSummaryServer>> {
        Some(Arc::new(self.scoped()))
    }

    fn resource_quota(&self) -> Option<Arc<dyn ResourceQuotasServer>> {
        Some(Arc::new(self.scoped()))
    }
}

/// Children of one organization.
struct Scoped {
    store: Arc<Store>,
    organization: String,
}

impl Scoped {
    fn base(&self) -> String {
        format!(
            "{}/{}/resource_quota",
            self.store.path("organizations"),
            self.organization
        )
    }
}

#[async_trait]
impl QuotaSummaryServer for Scoped {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<QuotaSummary>,
    ) -> anyhow::Result<()> {
        let summaries = usage(&self.store, &self.organization)?
            .into_iter()
            .map(|(key, (allowed, reserved))| summary(&self.organization, key, allowed, reserved))
            .collect::<Result<Vec<_>>>()?;
        Page::of(summaries, &request)?.fill(response)
    }
}

#[async_trait]
impl ResourceQuotasServer for Scoped {
    /// The quota always belongs to the organization of the path.
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<ResourceQuota>,
        response: &mut AddServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        let quota = ResourceQuota::builder()
            .copy(request.body())
            .organization_id(&self.organization)
            .build()?;
        let stored =
            self.store
                .resource_quotas
                .add(Some(&self.organization), &self.base(), &quota)?;
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        list_into(
            &self.store.resource_quotas,
            Some(&self.organization),
            &request,
            response,
        )
    }

    fn resource_quota(&self, id: &str) -> Option<Arc<dyn ResourceQuotaServer>> {
        self.store
            .resource_quotas
            .contains(Some(&self.organization), id)
            .then(|| {
                Arc::new(QuotaItem {
                    store: self.store.clone(),
                    organization: self.organization.clone(),
                    id: id.to_owned(),
                }) as Arc<dyn ResourceQuotaServer>
            })
    }
}

struct QuotaItem {
    store: Arc<Store>,
    organization: String,
    id: String,
}

#[async_trait]
impl ResourceQuotaServer for QuotaItem {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        get_into(
            &self.store.resource_quotas,
            Some(&self.organization),
            &self.id,
            response,
        )
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<ResourceQuota>,
        response: &mut UpdateServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        update_into(
            &self.store.resource_quotas,
            Some(&self.organization),
            &self.id,
            &request,
            response,
        )
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        delete_from(
            &self.store.resource_quotas,
            Some(&self.organization),
            &self.id,
            response,
        );
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::servers::testing::{app, call, seeded};

    #[tokio::test]
    async fn organization_get_and_update() {
        let app = app(seeded(), None);
        let (status, body) = call(&app, Method::GET, "/organizations/o1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["name"], "Example");

        let (status, body) = call(
            &app,
            Method::PATCH,
            "/organizations/o1",
            Some(json!({ "external_id": "ext-1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["external_id"], "ext-1");
        assert_eq!(body["name"], "Example");
    }

    #[tokio::test]
    async fn quotas_are_scoped_to_their_organization() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::POST,
            "/organizations/o1/resource_quota",
            Some(json!({ "resource_name": "gp.large", "allowed": 1, "organization_id": "o9" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["kind"], "ResourceQuota");
        assert_eq!(body["organization_id"], "o1");
        let id = body["id"].as_str().unwrap();
        assert_eq!(
            body["href"],
            format!("/api/accounts_mgmt/v1/organizations/o1/resource_quota/{id}")
        );

        let (_, body) = call(&app, Method::GET, "/organizations/o1/resource_quota", None).await;
        assert_eq!(body.unwrap()["total"], 2);

        let request = Some(json!({ "id": "o2" }));
        let (status, _) = call(&app, Method::POST, "/organizations", request).await;
        assert_eq!(status, StatusCode::CREATED);
        let path = "/organizations/o2/resource_quota/q1";
        let (status, _) = call(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn quota_update_and_delete() {
        let app = app(seeded(), None);
        let path = "/organizations/o1/resource_quota/q1";
        let (status, body) = call(&app, Method::PATCH, path, Some(json!({ "allowed": 10 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["allowed"], 10);

        let (status, _) = call(&app, Method::DELETE, path, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::DELETE, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn quota_summary_reports_allowed_and_reserved() {
        let app = app(seeded(), None);
        let (status, _) = call(
            &app,
            Method::POST,
            "/cluster_authorizations",
            Some(json!({
                "account_username": "jdoe",
                "cluster_id": "c1",
                "resources": [{
                    "resource_name": "gp.small",
                    "resource_type": "cluster",
                    "count": 3
                }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::GET, "/organizations/o1/quota_summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.unwrap()["items"],
            json!([{
                "organization_id": "o1",
                "resource_name": "gp.small",
                "resource_type": "cluster",
                "byoc": "rhinfra",
                "availability_zone_type": "single",
                "allowed": 4,
                "reserved": 3
            }])
        );
    }
}
