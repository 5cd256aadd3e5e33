//! Cluster authorizations and registrations.
//!
//! Authorizing a cluster checks the requested resources against the quota
//! of the account's organization and, when everything fits, creates the
//! subscription of the cluster with the resources reserved under it.

use std::collections::BTreeMap;
use std::sync::Arc;

use accounts_mgmt::{ClusterAuthorizationsServer, ClusterRegistrationsServer};
use accounts_mgmt_sdk::{
    Account, ClusterAuthorizationRequest, ClusterAuthorizationResponse, ClusterRegistrationRequest,
    ClusterRegistrationResponse, Plan, ReservedResource, Subscription, SubscriptionBuilder,
};
use ams_core::server::{PostServerRequest, PostServerResponse, RequestContext};
use ams_core::timestamp;
use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::caller;
use super::organizations::{ResourceKey, usage};
use crate::store::Store;

/// Lifetime of the tokens issued by registrations.
const TOKEN_TTL: Duration = Duration::hours(24);

fn subscription_of(store: &Store, cluster_id: &str) -> Result<Option<Subscription>> {
    if cluster_id.is_empty() {
        return Ok(None);
    }
    Ok(store
        .subscriptions
        .all(None)?
        .into_iter()
        .find(|s| s.cluster_id() == cluster_id))
}

/// Link to a stored subscription, as embedded in responses.
fn subscription_link(subscription: &Subscription) -> SubscriptionBuilder {
    Subscription::builder()
        .link(true)
        .id(subscription.id())
        .href(subscription.href())
}

fn organization_of(account: &Account) -> Option<&str> {
    account
        .organization()
        .map(|o| o.id())
        .filter(|id| !id.is_empty())
}

/// Takes `count` units from the quotas covering `key`, in key order.
/// Returns the units that didn't fit.
fn consume(remaining: &mut BTreeMap<ResourceKey, i64>, key: &ResourceKey, count: i64) -> i64 {
    let mut needed = count;
    for (_, left) in remaining
        .iter_mut()
        .filter(|(quota, _)| key.covered_by(quota))
    {
        if needed <= 0 {
            break;
        }
        let taken = needed.min((*left).max(0));
        *left -= taken;
        needed -= taken;
    }
    needed.max(0)
}

/// Requested resources that exceed what the quota still allows, with the
/// count of the excess. Earlier items of the request consume quota before
/// later ones are checked.
fn excess(
    store: &Store,
    organization: &str,
    requested: &[ReservedResource],
) -> Result<Vec<ReservedResource>> {
    let mut remaining: BTreeMap<ResourceKey, i64> = usage(store, organization)?
        .into_iter()
        .map(|(key, (allowed, reserved))| (key, allowed - reserved))
        .collect();
    let mut excess = Vec::new();
    for resource in requested {
        let key = ResourceKey::of_reserved(resource);
        let missing = consume(&mut remaining, &key, resource.count());
        if missing > 0 {
            excess.push(
                ReservedResource::builder()
                    .copy(resource)
                    .count(missing)
                    .build()?,
            );
        }
    }
    Ok(excess)
}

fn create_subscription(
    store: &Store,
    request: &ClusterAuthorizationRequest,
    account: &Account,
    organization: &str,
) -> Result<Subscription> {
    let plan = if request.managed() { "OSD" } else { "OCP" };
    let mut subscription = Subscription::builder()
        .organization_id(organization)
        .creator(
            Account::builder()
                .link(true)
                .id(account.id())
                .href(account.href()),
        )
        .plan(Plan::builder().id(plan).name(plan));
    if let Some(cluster_id) = request.get_cluster_id() {
        subscription = subscription.cluster_id(cluster_id);
    }
    if let Some(external_id) = request.get_external_cluster_id() {
        subscription = subscription.external_cluster_id(external_id);
    }
    if let Some(display_name) = request.get_display_name() {
        subscription = subscription.display_name(display_name);
    }
    let subscription = subscription.build()?;
    let stored = store
        .subscriptions
        .add(None, &store.path("subscriptions"), &subscription)?;
    for (index, resource) in request.resources().iter().enumerate() {
        store
            .reserved_resources
            .add_keyed(Some(stored.id()), &index.to_string(), resource)?;
    }
    Ok(stored)
}

pub struct Authorizations {
    store: Arc<Store>,
}

impl Authorizations {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

/// Decides on an authorization and reserves its resources. The reservation
/// lock of the store is held from the quota check to the last reserved
/// resource.
fn authorize(
    store: &Store,
    request: &ClusterAuthorizationRequest,
    account: &Account,
    organization: &str,
) -> Result<ClusterAuthorizationResponse> {
    let _reservations = store.reservations.lock();
    if let Some(existing) = subscription_of(store, request.cluster_id())? {
        return Ok(ClusterAuthorizationResponse::builder()
            .allowed(true)
            .subscription(subscription_link(&existing))
            .build()?);
    }

    let excess = excess(store, organization, request.resources())?;
    let allowed = excess.is_empty();
    let mut answer = ClusterAuthorizationResponse::builder()
        .allowed(allowed)
        .excess_resources(excess.iter().map(|r| ReservedResource::builder().copy(r)));
    if allowed && request.get_reserve() != Some(false) {
        let subscription = create_subscription(store, request, account, organization)?;
        tracing::info!(
            cluster_id = request.cluster_id(),
            subscription = subscription.id(),
            "cluster authorized"
        );
        answer = answer.subscription(subscription_link(&subscription));
    } else if !allowed {
        tracing::info!(
            cluster_id = request.cluster_id(),
            excess = excess.len(),
            "cluster authorization denied"
        );
    }
    Ok(answer.build()?)
}

#[async_trait]
impl ClusterAuthorizationsServer for Authorizations {
    /// Answers 200. A cluster that already has a subscription is allowed
    /// without reserving anything again; `reserve: false` only checks.
    async fn post(
        &self,
        _ctx: &RequestContext,
        request: PostServerRequest<ClusterAuthorizationRequest>,
        response: &mut PostServerResponse<ClusterAuthorizationResponse>,
    ) -> anyhow::Result<()> {
        let request = request.request();
        let account = self
            .store
            .accounts
            .all(None)?
            .into_iter()
            .find(|a| a.username() == request.account_username());
        let Some((account, organization)) = account
            .as_ref()
            .and_then(|a| organization_of(a).map(|o| (a, o)))
        else {
            tracing::debug!(
                username = request.account_username(),
                "authorization for an account without organization"
            );
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        };

        let answer = authorize(&self.store, request, account, organization)?;
        response.status(StatusCode::OK).response(answer);
        Ok(())
    }
}

pub struct Registrations {
    store: Arc<Store>,
    username: Option<Arc<str>>,
}

impl Registrations {
    pub fn new(store: Arc<Store>, username: Option<Arc<str>>) -> Self {
        Self { store, username }
    }
}

#[async_trait]
impl ClusterRegistrationsServer for Registrations {
    /// Registers the cluster for the caller, reusing its subscription when it
    /// has one, and issues a fresh token valid for a day.
    async fn post(
        &self,
        _ctx: &RequestContext,
        request: PostServerRequest<ClusterRegistrationRequest>,
        response: &mut PostServerResponse<ClusterRegistrationResponse>,
    ) -> anyhow::Result<()> {
        let request = request.request();
        if request.authorization_token().is_empty() {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let Some(account) = caller(&self.store, self.username.as_deref())? else {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        };

        let cluster_id = match request.get_cluster_id() {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => Uuid::new_v4().to_string(),
        };
        if subscription_of(&self.store, &cluster_id)?.is_none() {
            let subscription = Subscription::builder()
                .cluster_id(&cluster_id)
                .organization_id(organization_of(&account).unwrap_or_default())
                .creator(
                    Account::builder()
                        .link(true)
                        .id(account.id())
                        .href(account.href()),
                )
                .build()?;
            self.store
                .subscriptions
                .add(None, &self.store.path("subscriptions"), &subscription)?;
            tracing::info!(cluster_id = %cluster_id, "cluster registered");
        }

        let expires_at = timestamp::format(OffsetDateTime::now_utc() + TOKEN_TTL)?;
        response.response(
            ClusterRegistrationResponse::builder()
                .account_id(account.id())
                .authorization_token(Uuid::new_v4().simple().to_string())
                .cluster_id(cluster_id)
                .expires_at(expires_at)
                .build()?,
        );
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};
    use time::OffsetDateTime;

    use crate::servers::testing::{app, call, seeded};

    fn authorization(cluster: &str, count: i64) -> Value {
        json!({
            "account_username": "jdoe",
            "cluster_id": cluster,
            "managed": true,
            "resources": [{
                "resource_name": "gp.small",
                "resource_type": "cluster",
                "byoc": "rhinfra",
                "count": count
            }]
        })
    }

    #[tokio::test]
    async fn authorization_within_quota_creates_subscription() {
        let app = app(seeded(), None);
        let request = Some(authorization("c1", 3));
        let (status, body) = call(&app, Method::POST, "/cluster_authorizations", request).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["allowed"], true);
        assert_eq!(body["subscription"]["kind"], "SubscriptionLink");

        let path = format!(
            "/subscriptions/{}",
            body["subscription"]["id"].as_str().unwrap()
        );
        let (status, subscription) = call(&app, Method::GET, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        let subscription = subscription.unwrap();
        assert_eq!(subscription["cluster_id"], "c1");
        assert_eq!(subscription["organization_id"], "o1");
        assert_eq!(subscription["plan"]["id"], "OSD");
        assert_eq!(subscription["creator"]["kind"], "AccountLink");
    }

    #[tokio::test]
    async fn authorization_over_quota_reports_excess() {
        let app = app(seeded(), None);
        let request = Some(authorization("c1", 3));
        call(&app, Method::POST, "/cluster_authorizations", request).await;
        let request = Some(authorization("c2", 3));
        let (status, body) = call(&app, Method::POST, "/cluster_authorizations", request).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["allowed"], false);
        assert_eq!(body["excess_resources"][0]["count"], 2);
        assert!(body.get("subscription").is_none());

        let (_, list) = call(&app, Method::GET, "/subscriptions", None).await;
        assert_eq!(list.unwrap()["total"], 1);
    }

    #[tokio::test]
    async fn items_of_one_request_share_the_quota() {
        let app = app(seeded(), None);
        let mut request = authorization("c9", 3);
        let item = request["resources"][0].clone();
        request["resources"] = json!([item, item]);
        let (status, body) =
            call(&app, Method::POST, "/cluster_authorizations", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["allowed"], false);
        assert_eq!(body["excess_resources"].as_array().unwrap().len(), 1);
        assert_eq!(body["excess_resources"][0]["count"], 2);
        assert!(body.get("subscription").is_none());

        let (_, summary) = call(&app, Method::GET, "/organizations/o1/quota_summary", None).await;
        assert_eq!(summary.unwrap()["items"][0]["reserved"], 0);
    }

    #[tokio::test]
    async fn concurrent_authorizations_never_overbook() {
        let app = app(seeded(), None);
        let posts: Vec<_> = (0..4)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let request = authorization(&format!("c{i}"), 3);
                    call(&app, Method::POST, "/cluster_authorizations", Some(request)).await
                })
            })
            .collect();
        let mut allowed = 0;
        for post in posts {
            let (_, body) = post.await.unwrap();
            if body.unwrap()["allowed"] == true {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 1);

        let (_, summary) = call(&app, Method::GET, "/organizations/o1/quota_summary", None).await;
        assert_eq!(summary.unwrap()["items"][0]["reserved"], 3);
    }

    #[tokio::test]
    async fn authorization_is_idempotent_per_cluster() {
        let app = app(seeded(), None);
        let request = Some(authorization("c1", 4));
        let (_, first) = call(
            &app,
            Method::POST,
            "/cluster_authorizations",
            request.clone(),
        )
        .await;
        let (_, second) = call(&app, Method::POST, "/cluster_authorizations", request).await;
        assert_eq!(
            first.unwrap()["subscription"],
            second.unwrap()["subscription"]
        );
    }

    #[tokio::test]
    async fn check_only_authorization_reserves_nothing() {
        let app = app(seeded(), None);
        let mut request = authorization("c1", 1);
        request["reserve"] = json!(false);
        let (_, body) = call(&app, Method::POST, "/cluster_authorizations", Some(request)).await;
        let body = body.unwrap();
        assert_eq!(body["allowed"], true);
        assert!(body.get("subscription").is_none());
    }

    #[tokio::test]
    async fn authorization_for_unknown_account_is_rejected() {
        let mut request = authorization("c1", 1);
        request["account_username"] = json!("ghost");
        let app = app(seeded(), None);
        let (status, _) = call(&app, Method::POST, "/cluster_authorizations", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn registration_issues_token_and_subscription() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::POST,
            "/cluster_registrations",
            Some(json!({ "authorization_token": "pull-secret" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["account_id"], "a1");
        assert_eq!(body["authorization_token"].as_str().unwrap().len(), 32);
        let expires = ams_core::timestamp::parse(body["expires_at"].as_str().unwrap()).unwrap();
        assert!(expires > OffsetDateTime::now_utc());

        let cluster = body["cluster_id"].as_str().unwrap();
        let (_, list) = call(
            &app,
            Method::GET,
            &format!("/subscriptions?search=cluster_id%3D%27{cluster}%27"),
            None,
        )
        .await;
        assert_eq!(list.unwrap()["total"], 1);
    }

    #[tokio::test]
    async fn registration_requires_a_token() {
        let (status, _) = call(
            &app(seeded(), None),
            Method::POST,
            "/cluster_registrations",
            Some(json!({ "cluster_id": "c1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
