use std::sync::Arc;

use accounts_mgmt::{
    SubscriptionNotifyServer, SubscriptionReservedResourceServer,
    SubscriptionReservedResourcesServer, SubscriptionServer, SubscriptionsServer,
};
use accounts_mgmt_sdk::{ReservedResource, Subscription, SubscriptionNotify};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, RequestContext,
};
use async_trait::async_trait;
use axum::http::StatusCode;

use super::{get_into, list_into};
use crate::store::Store;

pub struct Subscriptions {
    store: Arc<Store>,
}

impl Subscriptions {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubscriptionsServer for Subscriptions {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Subscription>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.subscriptions, None, &request, response)
    }

    fn subscription(&self, id: &str) -> Option<Arc<dyn SubscriptionServer>> {
        self.store.subscriptions.contains(None, id).then(|| {
            Arc::new(Scoped {
                store: self.store.clone(),
                subscription: id.to_owned(),
            }) as Arc<dyn SubscriptionServer>
        })
    }
}

/// One subscription and its children.
struct Scoped {
    store: Arc<Store>,
    subscription: String,
}

impl Scoped {
    fn scoped(&self) -> Self {
        Self {
            store: self.store.clone(),
            subscription: self.subscription.clone(),
        }
    }
}

#[async_trait]
impl SubscriptionServer for Scoped {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Subscription>,
    ) -> anyhow::Result<()> {
        get_into(
            &self.store.subscriptions,
            None,
            &self.subscription,
            response,
        )
    }

    /// Releases the reserved resources along with the subscription.
    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        if !self.store.subscriptions.remove(None, &self.subscription) {
            response.status(StatusCode::NOT_FOUND);
            return Ok(());
        }
        self.store
            .reserved_resources
            .remove_children(&self.subscription);
        self.store.notifications.remove_children(&self.subscription);
        tracing::info!(id = %self.subscription, "subscription deleted");
        Ok(())
    }

    fn notify(&self) -> Option<Arc<dyn SubscriptionNotifyServer>> {
        Some(Arc::new(self.scoped()))
    }

    fn reserved_resources(&self) -> Option<Arc<dyn SubscriptionReservedResourcesServer>> {
        Some(Arc::new(self.scoped()))
    }
}

#[async_trait]
impl SubscriptionNotifyServer for Scoped {
    /// Records the notification. Nothing is sent.
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<SubscriptionNotify>,
        response: &mut AddServerResponse<SubscriptionNotify>,
    ) -> anyhow::Result<()> {
        if let Some(field) = missing_notify_field(request.body()) {
            tracing::debug!(field = %field, "invalid notification");
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let notify = SubscriptionNotify::builder()
            .copy(request.body())
            .subscription_id(&self.subscription)
            .build()?;
        let stored = self
            .store
            .notifications
            .add(Some(&self.subscription), "", &notify)?;
        tracing::info!(
            subscription = %self.subscription,
            template = stored.template_name(),
            "notification recorded"
        );
        response.body(stored);
        Ok(())
    }
}

/// First attribute a notification can't be rendered without.
fn missing_notify_field(notify: &SubscriptionNotify) -> Option<String> {
    if notify.template_name().is_empty() {
        return Some("template_name".to_owned());
    }
    notify
        .template_parameters()
        .iter()
        .position(|parameter| parameter.name().is_empty())
        .map(|index| format!("template_parameters[{index}].name"))
}

#[async_trait]
impl SubscriptionReservedResourcesServer for Scoped {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<ReservedResource>,
    ) -> anyhow::Result<()> {
        let parent = Some(self.subscription.as_str());
        list_into(&self.store.reserved_resources, parent, &request, response)
    }

    /// Reserved resources are addressed by their position, starting at 0.
    fn reserved_resource(&self, id: &str) -> Option<Arc<dyn SubscriptionReservedResourceServer>> {
        self.store
            .reserved_resources
            .contains(Some(&self.subscription), id)
            .then(|| {
                Arc::new(ReservedItem {
                    store: self.store.clone(),
                    subscription: self.subscription.clone(),
                    id: id.to_owned(),
                }) as Arc<dyn SubscriptionReservedResourceServer>
            })
    }
}

struct ReservedItem {
    store: Arc<Store>,
    subscription: String,
    id: String,
}

#[async_trait]
impl SubscriptionReservedResourceServer for ReservedItem {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<ReservedResource>,
    ) -> anyhow::Result<()> {
        let parent = Some(self.subscription.as_str());
        get_into(&self.store.reserved_resources, parent, &self.id, response)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};

    use crate::servers::testing::{app, call, seeded};

    async fn authorize(app: &axum::Router, cluster: &str, count: i64) -> Value {
        let (status, body) = call(
            app,
            Method::POST,
            "/cluster_authorizations",
            Some(json!({
                "account_username": "jdoe",
                "cluster_id": cluster,
                "resources": [{ "resource_name": "gp.small", "count": count }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body.unwrap()
    }

    #[tokio::test]
    async fn reserved_resources_are_listed_and_addressed_by_position() {
        let app = app(seeded(), None);
        let body = authorize(&app, "c1", 2).await;
        let id = body["subscription"]["id"].as_str().unwrap().to_owned();

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/subscriptions/{id}/reserved_resources"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["count"], 2);

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/subscriptions/{id}/reserved_resources/0"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["resource_name"], "gp.small");
        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/subscriptions/{id}/reserved_resources/1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_subscription_releases_its_resources() {
        let app = app(seeded(), None);
        let body = authorize(&app, "c1", 4).await;
        let path = format!(
            "/subscriptions/{}",
            body["subscription"]["id"].as_str().unwrap()
        );

        let (status, _) = call(&app, Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = call(&app, Method::GET, "/organizations/o1/quota_summary", None).await;
        assert_eq!(body.unwrap()["items"][0]["reserved"], 0);
    }

    #[tokio::test]
    async fn notify_is_recorded_and_validated() {
        let app = app(seeded(), None);
        let body = authorize(&app, "c1", 1).await;
        let path = format!(
            "/subscriptions/{}/notify",
            body["subscription"]["id"].as_str().unwrap()
        );

        let (status, body) = call(
            &app,
            Method::POST,
            &path,
            Some(json!({
                "template_name": "cluster-ready",
                "template_parameters": [{ "name": "cluster", "content": "c1" }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.unwrap()["template_name"], "cluster-ready");

        let invalid = [
            json!({ "subject": "hi" }),
            json!({ "template_name": "" }),
            json!({
                "template_name": "cluster-ready",
                "template_parameters": [{ "name": "cluster" }, { "content": "c1" }]
            }),
        ];
        for body in invalid {
            let (status, _) = call(&app, Method::POST, &path, Some(body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        }
    }

    #[tokio::test]
    async fn subscriptions_filter_by_cluster() {
        let app = app(seeded(), None);
        authorize(&app, "c1", 1).await;
        authorize(&app, "c2", 1).await;
        let (status, body) = call(
            &app,
            Method::GET,
            "/subscriptions?search=cluster_id%3D%27c2%27",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["cluster_id"], "c2");
        assert_eq!(body["items"][0]["organization_id"], "o1");
    }
}
