use std::sync::Arc;

use accounts_mgmt::{AccountServer, AccountsServer};
use accounts_mgmt_sdk::Account;
use ams_core::server::{
    AddServerRequest, AddServerResponse, GetServerRequest, GetServerResponse, ListServerRequest,
    ListServerResponse, RequestContext, UpdateServerRequest, UpdateServerResponse,
};
use async_trait::async_trait;
use axum::http::StatusCode;

use super::{get_into, list_into, update_into};
use crate::store::{Conflict, Store};

/// Labels other than links need a key.
fn has_unkeyed_label(account: &Account) -> bool {
    let unkeyed = account
        .labels()
        .iter()
        .position(|label| !label.link() && label.key().is_empty());
    if let Some(index) = unkeyed {
        tracing::debug!(index, "label without key");
    }
    unkeyed.is_some()
}

pub struct Accounts {
    store: Arc<Store>,
}

impl Accounts {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
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
        if has_unkeyed_label(request.body()) {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let stored =
            match self
                .store
                .accounts
                .add(None, &self.store.path("accounts"), request.body())
            {
                Ok(stored) => stored,
                Err(e) if e.is::<Conflict>() => {
                    tracing::debug!(error = %e, "account not created");
                    response.status(StatusCode::CONFLICT);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
        tracing::info!(
            id = stored.id(),
            username = stored.username(),
            "account created"
        );
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Account>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.accounts, None, &request, response)
    }

    fn account(&self, id: &str) -> Option<Arc<dyn AccountServer>> {
        self.store.accounts.contains(None, id).then(|| {
            Arc::new(AccountItem {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn AccountServer>
        })
    }
}

struct AccountItem {
    store: Arc<Store>,
    id: String,
}

#[async_trait]
impl AccountServer for AccountItem {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Account>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.accounts, None, &self.id, response)
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        request: UpdateServerRequest<Account>,
        response: &mut UpdateServerResponse<Account>,
    ) -> anyhow::Result<()> {
        if has_unkeyed_label(request.body()) {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        update_into(&self.store.accounts, None, &self.id, &request, response)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::servers::testing::{app, call, seeded};

    #[tokio::test]
    async fn add_then_get_account() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({ "username": "newbie", "email": "n@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["kind"], "Account");
        let id = body["id"].as_str().unwrap();
        assert_eq!(body["href"], format!("/api/accounts_mgmt/v1/accounts/{id}"));
        assert!(body["created_at"].is_string());

        let (status, fetched) = call(&app, Method::GET, &format!("/accounts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched.unwrap()["email"], "n@example.com");
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({ "username": "jdoe" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn update_cannot_take_another_username() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::PATCH,
            "/accounts/a2",
            Some(json!({ "username": "jdoe" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.is_none());

        let (_, body) = call(
            &app,
            Method::GET,
            "/accounts?search=username%20%3D%20%27jdoe%27",
            None,
        )
        .await;
        assert_eq!(body.unwrap()["total"], 1);
        let (_, body) = call(&app, Method::GET, "/accounts/a2", None).await;
        assert_eq!(body.unwrap()["username"], "asmith");
    }

    #[tokio::test]
    async fn concurrent_adds_keep_usernames_unique() {
        let app = app(seeded(), None);
        let adds = (0..8).map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                call(
                    &app,
                    Method::POST,
                    "/accounts",
                    Some(json!({ "username": "twin" })),
                )
                .await
                .0
            })
        });
        let mut created = 0;
        for add in adds.collect::<Vec<_>>() {
            match add.await.unwrap() {
                StatusCode::CREATED => created += 1,
                status => assert_eq!(status, StatusCode::CONFLICT),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn labels_need_a_key() {
        let app = app(seeded(), None);
        let labels = json!([{ "key": "team", "value": "sre" }, { "value": "orphan" }]);
        let (status, _) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({ "username": "labelled", "labels": labels })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(
            &app,
            Method::PATCH,
            "/accounts/a1",
            Some(json!({ "labels": labels })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &app,
            Method::PATCH,
            "/accounts/a1",
            Some(json!({ "labels": [{ "kind": "LabelLink", "id": "l1" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["labels"][0]["kind"], "LabelLink");
    }

    #[tokio::test]
    async fn list_filters_by_username() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::GET,
            "/accounts?search=username%20%3D%20%27asmith%27",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["total"], 1);
        assert_eq!(body["size"], 1);
        assert_eq!(body["items"][0]["id"], "a2");
    }

    #[tokio::test]
    async fn update_merges_and_returns_account() {
        let app = app(seeded(), None);
        let (status, body) = call(
            &app,
            Method::PATCH,
            "/accounts/a1",
            Some(json!({ "first_name": "Jane", "id": "other" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["id"], "a1");
        assert_eq!(body["username"], "jdoe");
        assert_eq!(body["first_name"], "Jane");
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let app = app(seeded(), None);
        let (status, _) = call(&app, Method::GET, "/accounts/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
