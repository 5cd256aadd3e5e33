//! In-memory collections of API objects.
//!
//! Objects are kept in insertion order. Bookkeeping attributes (`id`, `href`,
//! timestamps) and updates are applied on the JSON form of the objects, so a
//! single [`Collection`] works for every derived type. Stored forms are always
//! re-encoded from the typed object, so only declared attributes are kept.

use std::cmp::Ordering;

use accounts_mgmt_sdk::{
    Account, FeatureToggle, Organization, Permission, Registry, RegistryCredential,
    ReservedResource, ResourceQuota, Role, RoleBinding, Sku, Subscription, SubscriptionNotify,
    SupportCaseResponse,
};
use ams_core::server::{ListServerRequest, ListServerResponse};
use ams_core::{List, Object, timestamp};
use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

/// Attributes a client can't change with an update.
const RESERVED: &[&str] = &["kind", "id", "href", "created_at"];

struct Entry {
    id: String,
    parent: Option<String>,
    data: Map<String, Value>,
}

/// A write would give a unique attribute a value another object holds.
#[derive(Debug, thiserror::Error)]
#[error("{attribute} '{value}' is already in use")]
pub struct Conflict {
    pub attribute: &'static str,
    pub value: String,
}

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    /// Cuts the requested page out of `items`. Pages start at 1.
    ///
    /// # Errors
    /// Fails only when the counts don't fit the wire integers.
    pub fn of(items: Vec<T>, request: &ListServerRequest) -> Result<Self> {
        let total = i64::try_from(items.len())?;
        let page = request.page().max(1);
        let size = request.size().max(0);
        let skip = usize::try_from((page - 1).saturating_mul(size))?;
        let take = usize::try_from(size)?;
        Ok(Self {
            items: items.into_iter().skip(skip).take(take).collect(),
            page,
            total,
        })
    }

    /// Copies the page into a list response.
    ///
    /// # Errors
    /// Fails only when the page doesn't fit the wire integers.
    pub fn fill(self, response: &mut ListServerResponse<T>) -> Result<()> {
        let size = i64::try_from(self.items.len())?;
        response
            .items(List::new(self.items))
            .page(self.page)
            .size(size)
            .total(self.total);
        Ok(())
    }
}

/// Objects of one type, optionally scoped by a parent id.
pub struct Collection<T> {
    entries: RwLock<Vec<Entry>>,
    /// Attribute whose values can't repeat under one parent.
    unique: Option<&'static str>,
    marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            unique: None,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T> Collection<T> {
    /// Collection rejecting writes that repeat a value of `attribute`.
    #[must_use]
    pub fn unique(attribute: &'static str) -> Self {
        Self {
            unique: Some(attribute),
            ..Self::default()
        }
    }

    /// Fails with [`Conflict`] when another entry under `parent` than `id`
    /// holds the unique value of `data`.
    fn check_unique(
        &self,
        entries: &[Entry],
        parent: Option<&str>,
        id: &str,
        data: &Map<String, Value>,
    ) -> Result<()> {
        let Some(attribute) = self.unique else {
            return Ok(());
        };
        let Some(value) = data.get(attribute).filter(|v| !v.is_null()) else {
            return Ok(());
        };
        let taken = entries.iter().any(|e| {
            e.parent.as_deref() == parent && e.id != id && e.data.get(attribute) == Some(value)
        });
        if taken {
            let value = value
                .as_str()
                .map_or_else(|| value.to_string(), ToOwned::to_owned);
            return Err(Conflict { attribute, value }.into());
        }
        Ok(())
    }
}

fn to_map<T: Object>(object: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(object.wrap())? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("object encoded as {other}"),
    }
}

fn from_map<T: Object>(map: &Map<String, Value>) -> Result<T> {
    Ok(T::unmarshal(Value::Object(map.clone()))?)
}

fn now() -> Result<Value> {
    Ok(Value::String(timestamp::format(OffsetDateTime::now_utc())?))
}

impl<T: Object> Collection<T> {
    /// Stores `object` under `parent`, keeping its id when it has one.
    ///
    /// `base` is the collection path the `href` is derived from.
    ///
    /// # Errors
    /// Fails when the id is already taken or the object can't be encoded.
    pub fn add(&self, parent: Option<&str>, base: &str, object: &T) -> Result<T> {
        self.insert(parent, None, base, object)
    }

    /// Stores an object without identity under an explicit key.
    ///
    /// # Errors
    /// Fails when the key is already taken or the object can't be encoded.
    pub fn add_keyed(&self, parent: Option<&str>, key: &str, object: &T) -> Result<T> {
        self.insert(parent, Some(key), "", object)
    }

    /// # Errors
    /// Fails with [`Conflict`] when the unique attribute is taken.
    fn insert(&self, parent: Option<&str>, key: Option<&str>, base: &str, object: &T) -> Result<T> {
        let mut data = to_map(object)?;
        let id = match (key, data.get("id").and_then(Value::as_str)) {
            (Some(key), _) => key.to_owned(),
            (None, Some(id)) => id.to_owned(),
            (None, None) => Uuid::new_v4().simple().to_string(),
        };
        if T::IDENTIFIED {
            data.insert("kind".to_owned(), Value::String(T::KIND.to_owned()));
            data.insert("id".to_owned(), Value::String(id.clone()));
            data.insert("href".to_owned(), Value::String(format!("{base}/{id}")));
        }
        let stamp = now()?;
        data.entry("created_at").or_insert_with(|| stamp.clone());
        data.insert("updated_at".to_owned(), stamp);
        let stored: T = from_map(&data)?;
        let data = to_map(&stored)?;

        let mut entries = self.entries.write();
        if entries
            .iter()
            .any(|e| e.id == id && e.parent.as_deref() == parent)
        {
            anyhow::bail!("object '{id}' already exists");
        }
        self.check_unique(&entries, parent, &id, &data)?;
        entries.push(Entry {
            id,
            parent: parent.map(ToOwned::to_owned),
            data,
        });
        Ok(stored)
    }

    /// # Errors
    /// Fails when the stored object can't be decoded.
    pub fn get(&self, parent: Option<&str>, id: &str) -> Result<Option<T>> {
        let entries = self.entries.read();
        entries
            .iter()
            .find(|e| e.id == id && e.parent.as_deref() == parent)
            .map(|e| from_map(&e.data))
            .transpose()
    }

    #[must_use]
    pub fn contains(&self, parent: Option<&str>, id: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|e| e.id == id && e.parent.as_deref() == parent)
    }

    /// Copies the attributes present in `patch` onto the stored object.
    ///
    /// Returns `None` when there is no such object.
    ///
    /// # Errors
    /// Fails when the result isn't a valid object, and with [`Conflict`] when
    /// it takes a unique value held by another object.
    pub fn update(&self, parent: Option<&str>, id: &str, patch: &T) -> Result<Option<T>> {
        let patch = to_map(patch)?;
        let mut entries = self.entries.write();
        let Some(index) = entries
            .iter()
            .position(|e| e.id == id && e.parent.as_deref() == parent)
        else {
            return Ok(None);
        };
        let mut data = entries[index].data.clone();
        for (key, value) in patch {
            if !RESERVED.contains(&key.as_str()) {
                data.insert(key, value);
            }
        }
        data.insert("updated_at".to_owned(), now()?);
        let updated: T = from_map(&data).context("update produces an invalid object")?;
        let data = to_map(&updated)?;
        self.check_unique(&entries, parent, id, &data)?;
        entries[index].data = data;
        Ok(Some(updated))
    }

    /// Returns `true` when an object was removed.
    pub fn remove(&self, parent: Option<&str>, id: &str) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.parent.as_deref() == parent));
        entries.len() != before
    }

    /// Removes every object under `parent`.
    pub fn remove_children(&self, parent: &str) {
        self.entries
            .write()
            .retain(|e| e.parent.as_deref() != Some(parent));
    }

    /// Every object under `parent`, in insertion order.
    ///
    /// # Errors
    /// Fails when a stored object can't be decoded.
    pub fn all(&self, parent: Option<&str>) -> Result<Vec<T>> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.parent.as_deref() == parent)
            .map(|e| from_map(&e.data))
            .collect()
    }

    /// Applies the `search`, `order`, `page` and `size` parameters.
    ///
    /// # Errors
    /// Fails on a malformed search or order expression.
    pub fn list(&self, parent: Option<&str>, request: &ListServerRequest) -> Result<Page<T>> {
        let filter = Search::parse(request.search())?;
        let order = Order::parse(request.order())?;
        let entries = self.entries.read();
        let mut matched: Vec<&Map<String, Value>> = entries
            .iter()
            .filter(|e| e.parent.as_deref() == parent)
            .map(|e| &e.data)
            .filter(|data| filter.matches(data))
            .collect();
        if !order.criteria.is_empty() {
            matched.sort_by(|a, b| order.compare(a, b));
        }

        let page = Page::of(matched, request)?;
        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(from_map)
                .collect::<Result<_>>()?,
            page: page.page,
            total: page.total,
        })
    }
}

/// Conjunction of `name = 'value'` terms.
#[derive(Debug, Default)]
struct Search {
    terms: Vec<(String, String)>,
}

impl Search {
    fn parse(text: &str) -> Result<Self> {
        let mut terms = Vec::new();
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self { terms });
        }
        for term in text.split(" and ") {
            let (name, value) = term.split_once('=').with_context(|| {
                format!("search term '{term}' isn't of the form name = 'value'")
            })?;
            let value = value.trim();
            let value = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .unwrap_or(value);
            terms.push((name.trim().to_owned(), value.to_owned()));
        }
        Ok(Self { terms })
    }

    fn matches(&self, data: &Map<String, Value>) -> bool {
        self.terms
            .iter()
            .all(|(name, expected)| match data.get(name) {
                Some(Value::String(actual)) => actual == expected,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == *expected,
            })
    }
}

/// Comma separated `name [asc|desc]` criteria.
#[derive(Debug, Default)]
struct Order {
    criteria: Vec<(String, bool)>,
}

impl Order {
    fn parse(text: &str) -> Result<Self> {
        let mut criteria = Vec::new();
        for criterion in text.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let mut words = criterion.split_whitespace();
            let name = words.next().unwrap_or_default().to_owned();
            let descending = match words.next() {
                None | Some("asc") => false,
                Some("desc") => true,
                Some(other) => anyhow::bail!("unknown sort direction '{other}'"),
            };
            criteria.push((name, descending));
        }
        Ok(Self { criteria })
    }

    fn compare(&self, a: &Map<String, Value>, b: &Map<String, Value>) -> Ordering {
        self.criteria
            .iter()
            .map(|(name, descending)| {
                let ordering = compare_values(a.get(name), b.get(name));
                if *descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Every collection served by the mock, rooted at the API prefix.
pub struct Store {
    prefix: String,
    /// Serializes quota checks with the reservations they lead to.
    pub reservations: Mutex<()>,
    pub accounts: Collection<Account>,
    pub feature_toggles: Collection<FeatureToggle>,
    /// Keyed by subscription id.
    pub notifications: Collection<SubscriptionNotify>,
    pub organizations: Collection<Organization>,
    pub permissions: Collection<Permission>,
    pub registries: Collection<Registry>,
    pub registry_credentials: Collection<RegistryCredential>,
    /// Keyed by subscription id, addressed by position.
    pub reserved_resources: Collection<ReservedResource>,
    /// Keyed by organization id.
    pub resource_quotas: Collection<ResourceQuota>,
    pub role_bindings: Collection<RoleBinding>,
    pub roles: Collection<Role>,
    pub skus: Collection<Sku>,
    pub subscriptions: Collection<Subscription>,
    pub support_cases: Collection<SupportCaseResponse>,
}

impl Store {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_owned(),
            reservations: Mutex::new(()),
            accounts: Collection::unique("username"),
            feature_toggles: Collection::default(),
            notifications: Collection::default(),
            organizations: Collection::default(),
            permissions: Collection::default(),
            registries: Collection::default(),
            registry_credentials: Collection::default(),
            reserved_resources: Collection::default(),
            resource_quotas: Collection::default(),
            role_bindings: Collection::default(),
            roles: Collection::default(),
            skus: Collection::default(),
            subscriptions: Collection::default(),
            support_cases: Collection::default(),
        }
    }

    /// Path of a collection, used as the base of the `href` of its items.
    #[must_use]
    pub fn path(&self, collection: &str) -> String {
        format!("{}/{collection}", self.prefix)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const BASE: &str = "/api/accounts_mgmt/v1/accounts";

    fn account(username: &str) -> Account {
        Account::builder().username(username).build().unwrap()
    }

    fn seeded() -> Collection<Account> {
        let accounts = Collection::default();
        for name in ["carol", "alice", "bob"] {
            accounts.add(None, BASE, &account(name)).unwrap();
        }
        accounts
    }

    #[test]
    fn add_assigns_identity_and_stamps() {
        let accounts = Collection::default();
        let stored = accounts.add(None, BASE, &account("jdoe")).unwrap();
        assert_eq!(stored.id().len(), 32);
        assert_eq!(stored.href(), format!("{BASE}/{}", stored.id()));
        assert!(stored.get_created_at().is_some());
        assert_eq!(stored.get_created_at(), stored.get_updated_at());
        assert_eq!(accounts.get(None, stored.id()).unwrap(), Some(stored));
    }

    #[test]
    fn add_keeps_given_id_and_rejects_duplicates() {
        let accounts = Collection::default();
        let first = Account::builder().id("a1").build().unwrap();
        assert_eq!(accounts.add(None, BASE, &first).unwrap().id(), "a1");
        assert!(accounts.add(None, BASE, &first).is_err());
        assert!(accounts.add(Some("other"), BASE, &first).is_ok());
    }

    #[test]
    fn update_merges_present_attributes_only() {
        let accounts = Collection::default();
        let jdoe = Account::builder()
            .username("jdoe")
            .email("j@x.io")
            .build()
            .unwrap();
        let stored = accounts.add(None, BASE, &jdoe).unwrap();
        let patch = Account::builder()
            .id("hijack")
            .first_name("Jane")
            .build()
            .unwrap();
        let updated = accounts.update(None, stored.id(), &patch).unwrap().unwrap();
        assert_eq!(updated.id(), stored.id());
        assert_eq!(updated.username(), "jdoe");
        assert_eq!(updated.email(), "j@x.io");
        assert_eq!(updated.first_name(), "Jane");
        assert_eq!(updated.get_created_at(), stored.get_created_at());
        assert!(accounts.update(None, "missing", &patch).unwrap().is_none());
    }

    #[test]
    fn remove_is_scoped_by_parent() {
        let quotas: Collection<Account> = Collection::default();
        let stored = quotas.add(Some("o1"), BASE, &account("x")).unwrap();
        assert!(!quotas.remove(Some("o2"), stored.id()));
        assert!(quotas.contains(Some("o1"), stored.id()));
        assert!(quotas.remove(Some("o1"), stored.id()));
        assert!(quotas.all(Some("o1")).unwrap().is_empty());
    }

    #[test]
    fn list_pages_and_counts() {
        let accounts = seeded();
        let request = ListServerRequest::new().with_page(2).with_size(2);
        let page = accounts.list(None, &request).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].username(), "bob");
    }

    #[test]
    fn list_filters_and_orders() {
        let accounts = seeded();
        let request = ListServerRequest::new().with_search("username = 'alice'");
        let page = accounts.list(None, &request).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].username(), "alice");

        let request = ListServerRequest::new().with_order("email asc, username desc");
        let names: Vec<String> = accounts
            .list(None, &request)
            .unwrap()
            .items
            .iter()
            .map(|a| a.username().to_owned())
            .collect();
        assert_eq!(names, ["carol", "bob", "alice"]);
    }

    #[test]
    fn malformed_expressions_fail() {
        let accounts = seeded();
        let search = ListServerRequest::new().with_search("username");
        assert!(accounts.list(None, &search).is_err());
        let order = ListServerRequest::new().with_order("username up");
        assert!(accounts.list(None, &order).is_err());
    }

    #[test]
    fn page_of_computed_items() {
        let request = ListServerRequest::new().with_page(0).with_size(2);
        let page = Page::of(vec![1, 2, 3], &request).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items, [1, 2]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn store_paths_ignore_trailing_slash() {
        assert_eq!(Store::new("/api/ams/").path("skus"), "/api/ams/skus");
    }

    #[test]
    fn plain_structs_are_stored_without_identity() {
        let reserved: Collection<ReservedResource> = Collection::default();
        let resource = ReservedResource::builder().count(2).build().unwrap();
        let stored = reserved.add_keyed(Some("s1"), "0", &resource).unwrap();
        assert_eq!(stored.count(), 2);
        assert!(reserved.contains(Some("s1"), "0"));
        assert!(stored.get_created_at().is_some());
        assert_eq!(reserved.all(Some("s1")).unwrap().len(), 1);
        reserved.remove_children("s1");
        assert!(reserved.all(Some("s1")).unwrap().is_empty());
    }

    #[test]
    fn unique_attribute_is_checked_on_add_and_update() {
        let accounts = Collection::unique("username");
        accounts.add(None, BASE, &account("jdoe")).unwrap();
        let other = accounts.add(None, BASE, &account("asmith")).unwrap();

        let err = accounts.add(None, BASE, &account("jdoe")).unwrap_err();
        let conflict = err.downcast_ref::<Conflict>().unwrap();
        assert_eq!(conflict.attribute, "username");
        assert_eq!(conflict.value, "jdoe");

        let err = accounts
            .update(None, other.id(), &account("jdoe"))
            .unwrap_err();
        assert!(err.is::<Conflict>());
        assert_eq!(
            accounts.get(None, other.id()).unwrap().unwrap().username(),
            "asmith"
        );

        // Keeping its own value or leaving it unset is fine.
        let renamed = accounts
            .update(None, other.id(), &account("asmith"))
            .unwrap()
            .unwrap();
        assert_eq!(renamed.username(), "asmith");
        accounts
            .add(
                None,
                BASE,
                &Account::builder().email("x@y.z").build().unwrap(),
            )
            .unwrap();
        accounts
            .add(
                None,
                BASE,
                &Account::builder().email("w@y.z").build().unwrap(),
            )
            .unwrap();
        accounts
            .add(Some("elsewhere"), BASE, &account("jdoe"))
            .unwrap();
    }

    #[test]
    fn only_declared_timestamps_are_stored() {
        let permissions: Collection<Permission> = Collection::default();
        let permission = Permission::builder().action("get").build().unwrap();
        permissions
            .add(None, "/api/accounts_mgmt/v1/permissions", &permission)
            .unwrap();
        let patch = Permission::builder().resource("Cluster").build().unwrap();
        let id = permissions.all(None).unwrap()[0].id().to_owned();
        permissions.update(None, &id, &patch).unwrap().unwrap();

        let entries = permissions.entries.read();
        assert!(!entries[0].data.contains_key("created_at"));
        assert!(!entries[0].data.contains_key("updated_at"));
        drop(entries);

        let request = ListServerRequest::new().with_order("created_at desc");
        assert_eq!(permissions.list(None, &request).unwrap().total, 1);
        let stamped = ListServerRequest::new().with_search("updated_at = 'x'");
        assert_eq!(permissions.list(None, &stamped).unwrap().total, 0);
    }
}
