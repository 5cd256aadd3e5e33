//! Ordered collections of API objects.
//!
//! A list nested in an object is written as a bare JSON array. A list sent on
//! its own as a link uses the `{"kind": ..., "href": ..., "items": [...]}` shape.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::codec::{BuildError, DecodeError, JsonSource, Object, ObjectBuilder};

#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    link: bool,
    href: Option<String>,
    items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            link: false,
            href: None,
            items: Vec::new(),
        }
    }
}

impl<T> List<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            link: false,
            href: None,
            items,
        }
    }

    #[must_use]
    pub fn link(&self) -> bool {
        self.link
    }

    #[must_use]
    pub fn href(&self) -> &str {
        self.href.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Same as [`List::is_empty`].
    #[must_use]
    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    /// Returns the item at `index`, `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns a copy of the items.
    #[must_use]
    pub fn slice(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Calls `f` for each item in order until it returns `false`.
    pub fn each(&self, mut f: impl FnMut(&T) -> bool) {
        for item in &self.items {
            if !f(item) {
                break;
            }
        }
    }

    /// Like [`List::each`] but also passes the index of the item.
    pub fn range(&self, mut f: impl FnMut(usize, &T) -> bool) {
        for (index, item) in self.items.iter().enumerate() {
            if !f(index, item) {
                break;
            }
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Object> List<T> {
    pub fn builder() -> ListBuilder<T> {
        ListBuilder::new()
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        if self.link {
            T::LIST_LINK_KIND
        } else {
            T::LIST_KIND
        }
    }

    /// Kind reported when there is no list at all.
    #[must_use]
    pub fn nil_kind() -> &'static str {
        T::LIST_NIL_KIND
    }

    /// Wire shape of the list when nested in another object.
    #[must_use]
    pub fn wrap(&self) -> Vec<T::Data> {
        self.items.iter().map(T::wrap).collect()
    }

    /// # Errors
    /// Fails when an item has an unexpected `kind`.
    pub fn unwrap(data: Vec<T::Data>) -> Result<Self, DecodeError> {
        let items = data.into_iter().map(T::unwrap).collect::<Result<_, _>>()?;
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn wrap_link(&self) -> ListLinkData<T::Data> {
        ListLinkData {
            kind: Some(self.kind().to_owned()),
            href: self.href.clone(),
            items: Some(self.wrap()),
        }
    }

    /// # Errors
    /// Fails when the list or one of its items has an unexpected `kind`.
    pub fn unwrap_link(data: ListLinkData<T::Data>) -> Result<Self, DecodeError> {
        let link =
            crate::codec::decode_kind(data.kind.as_deref(), T::LIST_KIND, T::LIST_LINK_KIND)?;
        let mut list = Self::unwrap(data.items.unwrap_or_default())?;
        list.link = link;
        list.href = data.href;
        Ok(list)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire shape of a list sent as a link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLinkData<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<D>>,
}

/// Builder of [`List`] values.
#[derive(Debug, Clone)]
#[must_use]
pub struct ListBuilder<T: Object> {
    link: bool,
    href: Option<String>,
    items: Vec<T::Builder>,
}

impl<T: Object> Default for ListBuilder<T> {
    fn default() -> Self {
        Self {
            link: false,
            href: None,
            items: Vec::new(),
        }
    }
}

impl<T: Object> ListBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, value: bool) -> Self {
        self.link = value;
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = Some(value.into());
        self
    }

    pub fn items(mut self, values: impl IntoIterator<Item = T::Builder>) -> Self {
        self.items = values.into_iter().collect();
        self
    }

    pub fn copy(mut self, list: &List<T>) -> Self {
        self.link = list.link;
        self.href.clone_from(&list.href);
        self.items = list
            .items
            .iter()
            .map(|item| T::Builder::default().copy(item))
            .collect();
        self
    }

    #[must_use]
    pub fn empty(&self) -> bool {
        self.items.is_empty()
    }

    /// # Errors
    /// Returns the first item error, wrapped with the index of the item.
    pub fn build(&self) -> Result<List<T>, BuildError> {
        let mut items = Vec::with_capacity(self.items.len());
        for (index, builder) in self.items.iter().enumerate() {
            items.push(
                builder
                    .build()
                    .map_err(|e| BuildError::nested(format!("[{index}]"), e))?,
            );
        }
        Ok(List {
            link: self.link,
            href: self.href.clone(),
            items,
        })
    }
}

/// Writes the items of `list` as a JSON array.
///
/// # Errors
/// Returns the serializer error.
pub fn marshal_list<T: Object, W: Write>(
    list: &List<T>,
    writer: W,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer(writer, &list.wrap())
}

/// Reads a JSON array of objects.
///
/// # Errors
/// Fails on malformed JSON or when an item has an unexpected `kind`.
pub fn unmarshal_list<T: Object>(source: impl JsonSource) -> Result<List<T>, DecodeError> {
    List::unwrap(source.decode()?)
}
