#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use accounts_mgmt::{
    AccessTokenServer, AccountServer, AccountsServer, ClusterAuthorizationsServer,
    ClusterRegistrationsServer, CurrentAccessServer, CurrentAccountServer, FeatureTogglesServer,
    OrganizationServer, OrganizationsServer, PermissionsServer, QuotaSummaryServer,
    RegistriesServer, RegistryCredentialsServer, ResourceQuotaServer, ResourceQuotasServer,
    RoleBindingsServer, RolesServer, RootServer, SkusServer, SubscriptionNotifyServer,
    SubscriptionReservedResourcesServer, SubscriptionServer, SubscriptionsServer,
    SupportCasesServer, router,
};
use accounts_mgmt_sdk::{
    AccessToken, AccessTokenAuth, Account, Client, Organization, ResourceQuota, Subscription,
};
use ams_core::List;
use ams_core::client::{ClientError, Connection};
use ams_core::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, PostServerRequest,
    PostServerResponse, RequestContext, ServerConfig, UpdateServerRequest, UpdateServerResponse,
};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct Fixture {
    accounts: Mutex<Vec<Account>>,
    updates: Mutex<Vec<Account>>,
    deleted_quotas: Mutex<Vec<String>>,
}

struct Root(Arc<Fixture>);
struct Accounts(Arc<Fixture>);
struct AccountItem {
    fixture: Arc<Fixture>,
    account: Account,
}
struct Organizations(Arc<Fixture>);
struct OrganizationItem {
    fixture: Arc<Fixture>,
    id: String,
}
struct Quotas {
    fixture: Arc<Fixture>,
    organization: String,
}
struct Quota {
    fixture: Arc<Fixture>,
    organization: String,
    id: String,
}
struct Subscriptions;
struct BrokenSubscription;
struct Tokens;

impl RootServer for Root {
    fn access_token(&self) -> Option<Arc<dyn AccessTokenServer>> {
        Some(Arc::new(Tokens))
    }
    fn accounts(&self) -> Option<Arc<dyn AccountsServer>> {
        Some(Arc::new(Accounts(self.0.clone())))
    }
    fn cluster_authorizations(&self) -> Option<Arc<dyn ClusterAuthorizationsServer>> {
        None
    }
    fn cluster_registrations(&self) -> Option<Arc<dyn ClusterRegistrationsServer>> {
        None
    }
    fn current_access(&self) -> Option<Arc<dyn CurrentAccessServer>> {
        None
    }
    fn current_account(&self) -> Option<Arc<dyn CurrentAccountServer>> {
        None
    }
    fn feature_toggles(&self) -> Option<Arc<dyn FeatureTogglesServer>> {
        None
    }
    fn organizations(&self) -> Option<Arc<dyn OrganizationsServer>> {
        Some(Arc::new(Organizations(self.0.clone())))
    }
    fn permissions(&self) -> Option<Arc<dyn PermissionsServer>> {
        None
    }
    fn registries(&self) -> Option<Arc<dyn RegistriesServer>> {
        None
    }
    fn registry_credentials(&self) -> Option<Arc<dyn RegistryCredentialsServer>> {
        None
    }
    fn role_bindings(&self) -> Option<Arc<dyn RoleBindingsServer>> {
        None
    }
    fn roles(&self) -> Option<Arc<dyn RolesServer>> {
        None
    }
    fn skus(&self) -> Option<Arc<dyn SkusServer>> {
        None
    }
    fn subscriptions(&self) -> Option<Arc<dyn SubscriptionsServer>> {
        Some(Arc::new(Subscriptions))
    }
    fn support_cases(&self) -> Option<Arc<dyn SupportCasesServer>> {
        None
    }
}

#[async_trait]
impl AccessTokenServer for Tokens {
    async fn post(
        &self,
        _ctx: &RequestContext,
        _request: PostServerRequest<()>,
        response: &mut PostServerResponse<AccessToken>,
    ) -> anyhow::Result<()> {
        let auth = AccessTokenAuth::builder()
            .auth("dG9rZW4=")
            .email("jdoe@example.com");
        response.response(AccessToken::builder().auths([("quay.io", auth)]).build()?);
        Ok(())
    }
}

#[async_trait]
impl AccountsServer for Accounts {
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<Account>,
        response: &mut AddServerResponse<Account>,
    ) -> anyhow::Result<()> {
        let account = Account::builder()
            .copy(request.body())
            .id("new")
            .href("/api/accounts_mgmt/v1/accounts/new")
            .build()?;
        self.0.accounts.lock().push(account.clone());
        response.body(account);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Account>,
    ) -> anyhow::Result<()> {
        let accounts = self.0.accounts.lock().clone();
        let total = i64::try_from(accounts.len())?;
        response
            .items(List::new(accounts))
            .page(request.page())
            .size(total)
            .total(total);
        Ok(())
    }

    fn account(&self, id: &str) -> Option<Arc<dyn AccountServer>> {
        let account = self
            .0
            .accounts
            .lock()
            .iter()
            .find(|a| a.id() == id)
            .cloned()?;
        Some(Arc::new(AccountItem {
            fixture: self.0.clone(),
            account,
        }))
    }
}

#[async_trait]
impl AccountServer for AccountItem {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Account>,
    ) -> anyhow::Result<()> {
        response.body(self.account.clone());
        Ok(())
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<Account>,
        _response: &mut UpdateServerResponse<Account>,
    ) -> anyhow::Result<()> {
        self.fixture.updates.lock().push(request.into_body());
        Ok(())
    }
}

#[async_trait]
impl OrganizationsServer for Organizations {
    async fn add(
        &self,
        _ctx: &RequestContext,
        _request: AddServerRequest<Organization>,
        _response: &mut AddServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("read only")
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        _request: ListServerRequest,
        _response: &mut ListServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn organization(&self, id: &str) -> Option<Arc<dyn OrganizationServer>> {
        Some(Arc::new(OrganizationItem {
            fixture: self.0.clone(),
            id: id.to_owned(),
        }))
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
        response.body(Organization::builder().id(self.id.as_str()).build()?);
        Ok(())
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        _request: UpdateServerRequest<Organization>,
        _response: &mut UpdateServerResponse<Organization>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn quota_summary(&self) -> Option<Arc<dyn QuotaSummaryServer>> {
        None
    }

    fn resource_quota(&self) -> Option<Arc<dyn ResourceQuotasServer>> {
        Some(Arc::new(Quotas {
            fixture: self.fixture.clone(),
            organization: self.id.clone(),
        }))
    }
}

#[async_trait]
impl ResourceQuotasServer for Quotas {
    async fn add(
        &self,
        _ctx: &RequestContext,
        _request: AddServerRequest<ResourceQuota>,
        _response: &mut AddServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        _request: ListServerRequest,
        _response: &mut ListServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn resource_quota(&self, id: &str) -> Option<Arc<dyn ResourceQuotaServer>> {
        Some(Arc::new(Quota {
            fixture: self.fixture.clone(),
            organization: self.organization.clone(),
            id: id.to_owned(),
        }))
    }
}

#[async_trait]
impl ResourceQuotaServer for Quota {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        response.body(
            ResourceQuota::builder()
                .id(self.id.as_str())
                .organization_id(self.organization.as_str())
                .allowed(10)
                .build()?,
        );
        Ok(())
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<ResourceQuota>,
        response: &mut UpdateServerResponse<ResourceQuota>,
    ) -> anyhow::Result<()> {
        // Echo the change with a 200 instead of the default 204.
        response.body(request.into_body()).status(StatusCode::OK);
        Ok(())
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        _response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        self.fixture
            .deleted_quotas
            .lock()
            .push(format!("{}/{}", self.organization, self.id));
        Ok(())
    }
}

#[async_trait]
impl SubscriptionsServer for Subscriptions {
    async fn list(
        &self,
        _ctx: &RequestContext,
        _request: ListServerRequest,
        _response: &mut ListServerResponse<Subscription>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn subscription(&self, _id: &str) -> Option<Arc<dyn SubscriptionServer>> {
        Some(Arc::new(BrokenSubscription))
    }
}

#[async_trait]
impl SubscriptionServer for BrokenSubscription {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        _response: &mut GetServerResponse<Subscription>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("connection to billing refused")
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _request: DeleteServerRequest,
        _response: &mut DeleteServerResponse,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn notify(&self) -> Option<Arc<dyn SubscriptionNotifyServer>> {
        None
    }

    fn reserved_resources(&self) -> Option<Arc<dyn SubscriptionReservedResourcesServer>> {
        None
    }
}

fn seeded() -> Arc<Fixture> {
    let fixture = Arc::new(Fixture::default());
    fixture.accounts.lock().push(
        Account::builder()
            .id("1")
            .href("/api/accounts_mgmt/v1/accounts/1")
            .username("jdoe")
            .build()
            .unwrap(),
    );
    fixture
}

fn app(fixture: &Arc<Fixture>) -> Router {
    router(Arc::new(Root(fixture.clone())), &ServerConfig::default())
}

async fn call(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).unwrap());
    (status, json)
}

#[tokio::test]
async fn list_answers_a_page() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/accounts?page=2";
    let (status, body) = call(app(&fixture), Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({
            "items": [{
                "kind": "Account",
                "id": "1",
                "href": "/api/accounts_mgmt/v1/accounts/1",
                "username": "jdoe"
            }],
            "page": 2,
            "size": 1,
            "total": 1
        })
    );
}

#[tokio::test]
async fn add_answers_created() {
    let fixture = seeded();
    let (status, body) = call(
        app(&fixture),
        Method::POST,
        "/api/accounts_mgmt/v1/accounts",
        Some(json!({"kind": "Account", "username": "asmith"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["id"], "new");
    assert_eq!(body["username"], "asmith");
    assert_eq!(fixture.accounts.lock().len(), 2);
}

#[tokio::test]
async fn update_answers_no_content() {
    let fixture = seeded();
    let (status, body) = call(
        app(&fixture),
        Method::PATCH,
        "/api/accounts_mgmt/v1/accounts/1",
        Some(json!({"first_name": "Jane"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());
    assert_eq!(fixture.updates.lock()[0].first_name(), "Jane");
}

#[tokio::test]
async fn wrong_kind_in_body_is_a_500() {
    let fixture = seeded();
    let (status, body) = call(
        app(&fixture),
        Method::POST,
        "/api/accounts_mgmt/v1/accounts",
        Some(json!({"kind": "Organization"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap()["id"], "500");
    assert_eq!(fixture.accounts.lock().len(), 1);
}

#[tokio::test]
async fn unknown_item_is_not_found() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/accounts/nope";
    let (status, body) = call(app(&fixture), Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = body.unwrap();
    assert_eq!(body["kind"], "Error");
    assert_eq!(body["id"], "404");
    assert_eq!(
        body["reason"],
        "Can't find resource for path '/api/accounts_mgmt/v1/accounts/nope''"
    );
}

#[tokio::test]
async fn unserved_collections_and_foreign_paths_are_not_found() {
    let fixture = seeded();
    for uri in [
        "/api/accounts_mgmt/v1/skus",
        "/api/accounts_mgmt/v1/nothing_here",
        "/api/clusters_mgmt/v1/clusters",
        "/api/accounts_mgmt/v1/accounts/1/labels",
    ] {
        let (status, _) = call(app(&fixture), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/accounts";
    let (status, body) = call(app(&fixture), Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body.unwrap()["reason"],
        "Method 'DELETE' isn't supported for path '/api/accounts_mgmt/v1/accounts''"
    );

    let (status, _) = call(app(&fixture), Method::GET, "/api/accounts_mgmt/v1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn nested_resources_are_routed_through_their_parents() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/organizations/o1/resource_quota/q1";

    let (status, body) = call(app(&fixture), Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({"kind": "ResourceQuota", "id": "q1", "allowed": 10, "organization_id": "o1"})
    );

    let change = Some(json!({"allowed": 20}));
    let (status, body) = call(app(&fixture), Method::PATCH, uri, change).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["allowed"], 20);

    let (status, body) = call(app(&fixture), Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());
    assert_eq!(*fixture.deleted_quotas.lock(), vec!["o1/q1".to_owned()]);
}

#[tokio::test]
async fn handler_failure_hides_the_cause() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/subscriptions/s1";
    let (status, body) = call(app(&fixture), Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let reason = body.unwrap()["reason"].as_str().unwrap().to_owned();
    assert_eq!(
        reason,
        "Can't process 'GET' request for path '/api/accounts_mgmt/v1/subscriptions/s1' \
         due to an internal server error"
    );
    assert!(!reason.contains("billing"));
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let fixture = seeded();
    let config = ServerConfig {
        body_limit: 16,
        ..ServerConfig::default()
    };
    let app = router(Arc::new(Root(fixture.clone())), &config);
    let (status, _) = call(
        app,
        Method::POST,
        "/api/accounts_mgmt/v1/accounts",
        Some(json!({"username": "a-very-long-user-name"})),
    )
    .await;
    assert!(status.is_client_error() || status.is_server_error());
    assert_eq!(fixture.accounts.lock().len(), 1);
}

#[tokio::test]
async fn custom_prefix_is_honoured() {
    let fixture = seeded();
    let config = ServerConfig {
        prefix: "/ams/".to_owned(),
        ..ServerConfig::default()
    };
    let app = router(Arc::new(Root(fixture.clone())), &config);
    let (status, _) = call(app.clone(), Method::GET, "/ams/accounts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(app, Method::GET, "/api/accounts_mgmt/v1/accounts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn typed_client_talks_to_the_router() {
    let fixture = seeded();
    let connection = Connection::builder()
        .url("http://localhost")
        .token("secret")
        .build_with(app(&fixture));
    let client = Client::new(connection);

    let page = client.accounts().list().size(10).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(page.total(), 1);
    assert_eq!(page.into_items().get(0).unwrap().username(), "jdoe");

    let added = client
        .accounts()
        .add()
        .body(Account::builder().username("asmith").build().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::CREATED);
    assert_eq!(added.body().unwrap().id(), "new");

    let account = client.accounts().account("new").get().send().await.unwrap();
    assert_eq!(account.into_body().unwrap().username(), "asmith");

    let deleted = client
        .organizations()
        .organization("o9")
        .resource_quota()
        .resource_quota("q9")
        .delete()
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let error = client
        .accounts()
        .account("missing")
        .get()
        .send()
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    match error {
        ClientError::Api { error, .. } => assert_eq!(error.id(), "404"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn access_token_is_posted_without_a_body() {
    let fixture = seeded();
    let uri = "/api/accounts_mgmt/v1/access_token";
    let (status, body) = call(app(&fixture), Method::POST, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({"auths": {"quay.io": {"auth": "dG9rZW4=", "email": "jdoe@example.com"}}})
    );

    let (status, _) = call(app(&fixture), Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = call(app(&fixture), Method::POST, &format!("{uri}/x"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn typed_client_posts_actions() {
    let fixture = seeded();
    let connection = Connection::builder()
        .url("http://localhost")
        .build_with(app(&fixture));
    let client = Client::new(connection);

    let posted = client.access_token().post().send().await.unwrap();
    assert_eq!(posted.status(), StatusCode::OK);
    let token = posted.into_response().unwrap();
    assert_eq!(token.auths("quay.io").unwrap().email(), "jdoe@example.com");
}
