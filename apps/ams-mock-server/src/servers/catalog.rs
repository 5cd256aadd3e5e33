//! Mostly read-only collections: SKUs, registries, their credentials and
//! feature toggles, plus the pull secret built from the registries.

use std::sync::Arc;

use accounts_mgmt::{
    AccessTokenServer, FeatureToggleServer, FeatureTogglesServer, RegistriesServer,
    RegistryCredentialServer, RegistryCredentialsServer, RegistryServer, SkuServer, SkusServer,
};
use accounts_mgmt_sdk::{
    AccessToken, AccessTokenAuth, FeatureToggle, Registry, RegistryCredential, Sku,
};
use ams_core::server::{
    AddServerRequest, AddServerResponse, GetServerRequest, GetServerResponse, ListServerRequest,
    ListServerResponse, PostServerRequest, PostServerResponse, RequestContext,
};
use async_trait::async_trait;
use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;
use uuid::Uuid;

use super::{caller, get_into, list_into};
use crate::store::Store;

pub struct Skus {
    store: Arc<Store>,
}

impl Skus {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SkusServer for Skus {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Sku>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.skus, None, &request, response)
    }

    fn sku(&self, id: &str) -> Option<Arc<dyn SkuServer>> {
        self.store.skus.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn SkuServer>
        })
    }
}

pub struct Registries {
    store: Arc<Store>,
}

impl Registries {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RegistriesServer for Registries {
    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<Registry>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.registries, None, &request, response)
    }

    fn registry(&self, id: &str) -> Option<Arc<dyn RegistryServer>> {
        self.store.registries.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn RegistryServer>
        })
    }
}

pub struct RegistryCredentials {
    store: Arc<Store>,
}

impl RegistryCredentials {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RegistryCredentialsServer for RegistryCredentials {
    /// Issues a token when the request doesn't carry one.
    async fn add(
        &self,
        _ctx: &RequestContext,
        request: AddServerRequest<RegistryCredential>,
        response: &mut AddServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()> {
        let credential = request.into_body();
        let registries = &self.store.registries;
        if credential
            .registry()
            .is_some_and(|r| !registries.contains(None, r.id()))
        {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let credential = if credential.get_token().is_some() {
            credential
        } else {
            RegistryCredential::builder()
                .copy(&credential)
                .token(Uuid::new_v4().simple().to_string())
                .build()?
        };
        let stored = self.store.registry_credentials.add(
            None,
            &self.store.path("registry_credentials"),
            &credential,
        )?;
        response.body(stored);
        Ok(())
    }

    async fn list(
        &self,
        _ctx: &RequestContext,
        request: ListServerRequest,
        response: &mut ListServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()> {
        list_into(&self.store.registry_credentials, None, &request, response)
    }

    fn registry_credential(&self, id: &str) -> Option<Arc<dyn RegistryCredentialServer>> {
        self.store.registry_credentials.contains(None, id).then(|| {
            Arc::new(Item {
                store: self.store.clone(),
                id: id.to_owned(),
            }) as Arc<dyn RegistryCredentialServer>
        })
    }
}

/// Registry host always present in the pull secret.
const DEFAULT_REGISTRY: &str = "cloud.openshift.com";

/// Pull secret of the caller: one auth per registry host.
pub struct AccessTokens {
    store: Arc<Store>,
    username: Option<Arc<str>>,
}

impl AccessTokens {
    pub fn new(store: Arc<Store>, username: Option<Arc<str>>) -> Self {
        Self { store, username }
    }
}

#[async_trait]
impl AccessTokenServer for AccessTokens {
    async fn post(
        &self,
        _ctx: &RequestContext,
        _request: PostServerRequest<()>,
        response: &mut PostServerResponse<AccessToken>,
    ) -> anyhow::Result<()> {
        let Some(account) = caller(&self.store, self.username.as_deref())? else {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        };
        let mut hosts = vec![DEFAULT_REGISTRY.to_owned()];
        for registry in self.store.registries.all(None)? {
            if let Some(host) = Url::parse(registry.url())
                .ok()
                .and_then(|u| registry_host(&u))
            {
                hosts.push(host);
            }
        }
        let auths = hosts.into_iter().map(|host| {
            let secret = format!("{}:{}", account.username(), Uuid::new_v4().simple());
            let mut auth = AccessTokenAuth::builder().auth(STANDARD.encode(secret));
            if let Some(email) = account.get_email() {
                auth = auth.email(email);
            }
            (host, auth)
        });
        response.response(AccessToken::builder().auths(auths).build()?);
        Ok(())
    }
}

fn registry_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// Any toggle id resolves; toggles that were never stored are disabled.
pub struct FeatureToggles {
    store: Arc<Store>,
}

impl FeatureToggles {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

impl FeatureTogglesServer for FeatureToggles {
    fn toggle(&self, id: &str) -> Option<Arc<dyn FeatureToggleServer>> {
        Some(Arc::new(Item {
            store: self.store.clone(),
            id: id.to_owned(),
        }))
    }
}

struct Item {
    store: Arc<Store>,
    id: String,
}

#[async_trait]
impl SkuServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Sku>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.skus, None, &self.id, response)
    }
}

#[async_trait]
impl RegistryServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<Registry>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.registries, None, &self.id, response)
    }
}

#[async_trait]
impl RegistryCredentialServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<RegistryCredential>,
    ) -> anyhow::Result<()> {
        get_into(&self.store.registry_credentials, None, &self.id, response)
    }
}

#[async_trait]
impl FeatureToggleServer for Item {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _request: GetServerRequest,
        response: &mut GetServerResponse<FeatureToggle>,
    ) -> anyhow::Result<()> {
        let toggle = match self.store.feature_toggles.get(None, &self.id)? {
            Some(toggle) => toggle,
            None => FeatureToggle::builder()
                .id(&self.id)
                .href(format!(
                    "{}/{}",
                    self.store.path("feature_toggles"),
                    self.id
                ))
                .enabled(false)
                .build()?,
        };
        response.body(toggle);
        Ok(())
    }
}
