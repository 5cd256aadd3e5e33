//! The `Error` object and its JSON codec.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

/// Kind of a full error object.
pub const ERROR_KIND: &str = "Error";

/// Kind reported for an absent error.
pub const ERROR_NIL_KIND: &str = "ErrorNil";

/// Error returned by the API, either decoded from a response body or built
/// locally before being written to one.
///
/// The `id` carries the HTTP status code as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Error {
    id: Option<String>,
    href: Option<String>,
    code: Option<String>,
    reason: Option<String>,
}

impl Error {
    #[must_use]
    pub fn builder() -> ErrorBuilder {
        ErrorBuilder::default()
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        ERROR_KIND
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn href(&self) -> &str {
        self.href.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Machine readable code, for example `CLUSTERS-MGMT-404`.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(reason) = &self.reason {
            f.write_str(reason)
        } else if let Some(code) = &self.code {
            f.write_str(code)
        } else if let Some(id) = &self.id {
            f.write_str(id)
        } else {
            f.write_str("unknown error")
        }
    }
}

impl std::error::Error for Error {}

/// Builder of [`Error`] objects.
#[derive(Debug, Clone, Default)]
pub struct ErrorBuilder {
    id: Option<String>,
    href: Option<String>,
    code: Option<String>,
    reason: Option<String>,
}

impl ErrorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    #[must_use]
    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = Some(value.into());
        self
    }

    #[must_use]
    pub fn code(mut self, value: impl Into<String>) -> Self {
        self.code = Some(value.into());
        self
    }

    #[must_use]
    pub fn reason(mut self, value: impl Into<String>) -> Self {
        self.reason = Some(value.into());
        self
    }

    /// Builds the error. Every field is optional so this never fails.
    #[must_use]
    pub fn build(&self) -> Error {
        Error {
            id: self.id.clone(),
            href: self.href.clone(),
            code: self.code.clone(),
            reason: self.reason.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnmarshalError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("expected kind 'Error' but got '{found}'")]
    UnexpectedKind { found: String },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ErrorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ErrorData {
    fn wrap(error: &Error) -> Self {
        Self {
            kind: Some(ERROR_KIND.to_owned()),
            id: error.id.clone(),
            href: error.href.clone(),
            code: error.code.clone(),
            reason: error.reason.clone(),
        }
    }

    fn unwrap(self) -> Result<Error, UnmarshalError> {
        if let Some(kind) = self.kind
            && kind != ERROR_KIND
        {
            return Err(UnmarshalError::UnexpectedKind { found: kind });
        }
        Ok(Error {
            id: self.id,
            href: self.href,
            code: self.code,
            reason: self.reason,
        })
    }
}

/// Encodes an error as JSON.
///
/// # Errors
/// Returns the serializer error if the encoding fails.
pub fn marshal_error(error: &Error) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&ErrorData::wrap(error))
}

/// Decodes an error from a JSON document.
///
/// # Errors
/// Fails when the document is not valid JSON or when its `kind` isn't `Error`.
pub fn unmarshal_error(source: impl AsRef<[u8]>) -> Result<Error, UnmarshalError> {
    let data: ErrorData = serde_json::from_slice(source.as_ref())?;
    data.unwrap()
}

/// Decodes an error from a reader.
///
/// # Errors
/// Same as [`unmarshal_error`].
pub fn unmarshal_error_from_reader(reader: impl Read) -> Result<Error, UnmarshalError> {
    let data: ErrorData = serde_json::from_reader(reader)?;
    data.unwrap()
}
