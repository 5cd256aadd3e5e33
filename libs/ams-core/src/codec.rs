//! Wire codec shared by all API objects.

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An API type with a JSON wire representation.
///
/// Implemented by `#[derive(Object)]`. Identified types carry a `kind` on the
/// wire that is either [`Object::KIND`] or [`Object::LINK_KIND`]; plain struct
/// types have no kind at all.
pub trait Object: Sized {
    const KIND: &'static str;
    const LINK_KIND: &'static str;
    const LIST_KIND: &'static str;
    const LIST_LINK_KIND: &'static str;
    /// Kind reported for an absent list. Never expected on the wire.
    const LIST_NIL_KIND: &'static str;
    /// Whether the type has identity (`id`, `href`, `link`) and a wire kind.
    const IDENTIFIED: bool;

    /// Serde shape of the object.
    type Data: Serialize + DeserializeOwned + Default;
    type Builder: ObjectBuilder<Object = Self>;

    fn wrap(&self) -> Self::Data;

    /// Converts the wire shape back into the object.
    ///
    /// # Errors
    /// Fails when a `kind` (of this object or a nested one) isn't accepted.
    fn unwrap(data: Self::Data) -> Result<Self, DecodeError>;

    /// Writes the JSON representation of the object.
    ///
    /// # Errors
    /// Returns the serializer error, typically an I/O failure of `writer`.
    fn marshal<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, &self.wrap())
    }

    /// Returns the JSON representation of the object.
    ///
    /// # Errors
    /// Returns the serializer error.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.wrap())
    }

    /// Reads an object from any [`JsonSource`].
    ///
    /// # Errors
    /// Fails on malformed JSON or on an unexpected `kind`.
    fn unmarshal(source: impl JsonSource) -> Result<Self, DecodeError> {
        Self::unwrap(source.decode()?)
    }
}

/// Builder side of an [`Object`].
pub trait ObjectBuilder: Default + Clone + std::fmt::Debug {
    type Object: Object;

    /// # Errors
    /// Returns the first error reported by a nested builder or by validation.
    fn build(&self) -> Result<Self::Object, BuildError>;

    #[must_use]
    fn copy(self, object: &Self::Object) -> Self;
}

/// Input accepted by the unmarshal functions.
pub trait JsonSource {
    /// # Errors
    /// Returns the JSON decoder error unchanged.
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error>;
}

impl JsonSource for &str {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self)
    }
}

impl JsonSource for &String {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self)
    }
}

impl JsonSource for &[u8] {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self)
    }
}

impl<const N: usize> JsonSource for &[u8; N] {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self)
    }
}

impl JsonSource for &Vec<u8> {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self)
    }
}

impl JsonSource for &bytes::Bytes {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self)
    }
}

impl JsonSource for serde_json::Value {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self)
    }
}

/// Decodes from any [`Read`] implementation.
#[derive(Debug)]
pub struct FromReader<R>(pub R);

impl<R: Read> JsonSource for FromReader<R> {
    fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_reader(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("expected kind '{expected}' or '{expected_link}' but got '{found}'")]
    UnexpectedKind {
        expected: &'static str,
        expected_link: &'static str,
        found: String,
    },
}

/// Checks a decoded `kind` and returns the `link` flag it stands for.
///
/// A missing kind is accepted and means a full object.
///
/// # Errors
/// Returns [`DecodeError::UnexpectedKind`] for any other value.
pub fn decode_kind(
    found: Option<&str>,
    kind: &'static str,
    link_kind: &'static str,
) -> Result<bool, DecodeError> {
    match found {
        None => Ok(false),
        Some(found) if found == kind => Ok(false),
        Some(found) if found == link_kind => Ok(true),
        Some(found) => Err(DecodeError::UnexpectedKind {
            expected: kind,
            expected_link: link_kind,
            found: found.to_owned(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
    #[error("can't build '{field}': {source}")]
    Nested {
        field: String,
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn nested(field: impl Into<String>, source: BuildError) -> Self {
        Self::Nested {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Dotted path of the field that failed, for example `labels[0].key`.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Invalid { field, .. } => field.clone(),
            Self::Nested { field, source } => {
                let inner = source.path();
                if inner.starts_with('[') {
                    format!("{field}{inner}")
                } else {
                    format!("{field}.{inner}")
                }
            }
        }
    }
}
