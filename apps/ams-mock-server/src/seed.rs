//! Objects loaded into the store at startup.
//!
//! The seed file is YAML with one list per collection, each item written the
//! way the API returns it:
//!
//! ```yaml
//! accounts:
//!   - id: a1
//!     username: jdoe
//!     organization: { kind: OrganizationLink, id: o1 }
//! organizations:
//!   - id: o1
//!     name: Example
//! resource_quotas:
//!   - organization_id: o1
//!     resource_name: gp.small
//!     resource_type: cluster
//!     allowed: 4
//! ```

use std::path::Path;

use accounts_mgmt_sdk::ResourceQuota;
use ams_core::Object;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Format, Yaml};
use serde::Deserialize;
use serde_json::Value;

use crate::store::{Collection, Store};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Seed {
    pub accounts: Vec<Value>,
    pub feature_toggles: Vec<Value>,
    pub organizations: Vec<Value>,
    pub permissions: Vec<Value>,
    pub registries: Vec<Value>,
    /// Each quota names its organization with `organization_id`.
    pub resource_quotas: Vec<Value>,
    pub role_bindings: Vec<Value>,
    pub roles: Vec<Value>,
    pub skus: Vec<Value>,
    pub subscriptions: Vec<Value>,
}

impl Seed {
    /// # Errors
    /// Fails when the file is missing or isn't a seed document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("seed file does not exist: {}", path.display());
        }
        Figment::from(Yaml::file(path))
            .extract()
            .with_context(|| format!("invalid seed file {}", path.display()))
    }

    /// Adds every object to `store` and returns how many were added.
    ///
    /// # Errors
    /// Fails on the first object that isn't valid for its collection.
    pub fn apply(self, store: &Store) -> Result<usize> {
        let mut added = 0;
        added += fill(
            &store.accounts,
            &store.path("accounts"),
            "accounts",
            self.accounts,
        )?;
        added += fill(
            &store.feature_toggles,
            &store.path("feature_toggles"),
            "feature_toggles",
            self.feature_toggles,
        )?;
        added += fill(
            &store.organizations,
            &store.path("organizations"),
            "organizations",
            self.organizations,
        )?;
        added += fill(
            &store.permissions,
            &store.path("permissions"),
            "permissions",
            self.permissions,
        )?;
        added += fill(
            &store.registries,
            &store.path("registries"),
            "registries",
            self.registries,
        )?;
        added += fill(
            &store.role_bindings,
            &store.path("role_bindings"),
            "role_bindings",
            self.role_bindings,
        )?;
        added += fill(&store.roles, &store.path("roles"), "roles", self.roles)?;
        added += fill(&store.skus, &store.path("skus"), "skus", self.skus)?;
        added += fill(
            &store.subscriptions,
            &store.path("subscriptions"),
            "subscriptions",
            self.subscriptions,
        )?;

        for (index, value) in self.resource_quotas.into_iter().enumerate() {
            let quota: ResourceQuota = decode("resource_quotas", index, value)?;
            let Some(organization) = quota.get_organization_id().map(ToOwned::to_owned) else {
                anyhow::bail!("resource_quotas[{index}]: organization_id is required");
            };
            let base = format!(
                "{}/{organization}/resource_quota",
                store.path("organizations")
            );
            store
                .resource_quotas
                .add(Some(&organization), &base, &quota)
                .with_context(|| format!("resource_quotas[{index}]"))?;
            added += 1;
        }
        Ok(added)
    }
}

fn decode<T: Object>(what: &str, index: usize, value: Value) -> Result<T> {
    T::unmarshal(value).with_context(|| format!("{what}[{index}]"))
}

fn fill<T: Object>(
    collection: &Collection<T>,
    base: &str,
    what: &str,
    values: Vec<Value>,
) -> Result<usize> {
    let count = values.len();
    for (index, value) in values.into_iter().enumerate() {
        let object: T = decode(what, index, value)?;
        collection
            .add(None, base, &object)
            .with_context(|| format!("{what}[{index}]"))?;
    }
    Ok(count)
}
