//! Typed requests handed to server implementations and the responses they fill.
//!
//! Responses start with the status the verb normally answers with; handlers
//! may override it with `status`.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::codec::Object;
use crate::list::List;

/// Page returned when the request doesn't ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request doesn't ask for one.
pub const DEFAULT_SIZE: i64 = 100;

/// Written by the adapters once the handler has filled the response.
pub trait ServerResponse {
    fn status_code(&self) -> StatusCode;

    /// JSON body, `None` when nothing should be written.
    ///
    /// # Errors
    /// Returns the serializer error.
    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error>;
}

fn encode_object<T: Object>(
    status: StatusCode,
    body: Option<&T>,
) -> Result<Option<Vec<u8>>, serde_json::Error> {
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    body.map(|body| serde_json::to_vec(&body.wrap()))
        .transpose()
}

#[derive(Debug, Clone, Default)]
pub struct GetServerRequest;

#[derive(Debug, Clone)]
pub struct GetServerResponse<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> Default for GetServerResponse<T> {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }
}

impl<T> GetServerResponse<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&mut self, value: T) -> &mut Self {
        self.body = Some(value);
        self
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }

    #[must_use]
    pub fn get_body(&self) -> Option<&T> {
        self.body.as_ref()
    }
}

impl<T: Object> ServerResponse for GetServerResponse<T> {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        encode_object(self.status, self.body.as_ref())
    }
}

/// Request carrying the decoded body of a `PATCH`.
#[derive(Debug, Clone)]
pub struct UpdateServerRequest<T> {
    body: T,
}

impl<T> UpdateServerRequest<T> {
    #[must_use]
    pub fn new(body: T) -> Self {
        Self { body }
    }

    #[must_use]
    pub fn body(&self) -> &T {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }
}

#[derive(Debug, Clone)]
pub struct UpdateServerResponse<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> Default for UpdateServerResponse<T> {
    fn default() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }
}

impl<T> UpdateServerResponse<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the updated object. It is only written when the status allows a body.
    pub fn body(&mut self, value: T) -> &mut Self {
        self.body = Some(value);
        self
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }
}

impl<T: Object> ServerResponse for UpdateServerResponse<T> {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        encode_object(self.status, self.body.as_ref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteServerRequest;

#[derive(Debug, Clone)]
pub struct DeleteServerResponse {
    status: StatusCode,
}

impl Default for DeleteServerResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
        }
    }
}

impl DeleteServerResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }
}

impl ServerResponse for DeleteServerResponse {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        Ok(None)
    }
}

/// Request carrying the decoded body of a `POST` to a collection.
#[derive(Debug, Clone)]
pub struct AddServerRequest<T> {
    body: T,
}

impl<T> AddServerRequest<T> {
    #[must_use]
    pub fn new(body: T) -> Self {
        Self { body }
    }

    #[must_use]
    pub fn body(&self) -> &T {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }
}

#[derive(Debug, Clone)]
pub struct AddServerResponse<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> Default for AddServerResponse<T> {
    fn default() -> Self {
        Self {
            status: StatusCode::CREATED,
            body: None,
        }
    }
}

impl<T> AddServerResponse<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&mut self, value: T) -> &mut Self {
        self.body = Some(value);
        self
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }
}

impl<T: Object> ServerResponse for AddServerResponse<T> {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        encode_object(self.status, self.body.as_ref())
    }
}

/// Paging and filtering parameters of a collection `GET`.
#[derive(Debug, Clone, Default)]
pub struct ListServerRequest {
    order: Option<String>,
    page: Option<i64>,
    search: Option<String>,
    size: Option<i64>,
    total: Option<i64>,
}

impl ListServerRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_order(mut self, value: impl Into<String>) -> Self {
        self.order = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, value: i64) -> Self {
        self.page = Some(value);
        self
    }

    #[must_use]
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, value: i64) -> Self {
        self.size = Some(value);
        self
    }

    #[must_use]
    pub fn with_total(mut self, value: i64) -> Self {
        self.total = Some(value);
        self
    }

    /// Order criteria, a comma separated list of `field [asc|desc]`.
    #[must_use]
    pub fn order(&self) -> &str {
        self.order.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Index of the requested page, starting at 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    #[must_use]
    pub fn get_page(&self) -> Option<i64> {
        self.page
    }

    /// Search criteria, an SQL-like `where` clause.
    #[must_use]
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn get_search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    #[must_use]
    pub fn get_size(&self) -> Option<i64> {
        self.size
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.total.unwrap_or_default()
    }

    #[must_use]
    pub fn get_total(&self) -> Option<i64> {
        self.total
    }
}

/// Wire shape of a page of results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPageData<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<D>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListServerResponse<T> {
    status: StatusCode,
    items: Option<List<T>>,
    page: Option<i64>,
    size: Option<i64>,
    total: Option<i64>,
}

impl<T> Default for ListServerResponse<T> {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            items: None,
            page: None,
            size: None,
            total: None,
        }
    }
}

impl<T> ListServerResponse<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&mut self, value: List<T>) -> &mut Self {
        self.items = Some(value);
        self
    }

    pub fn page(&mut self, value: i64) -> &mut Self {
        self.page = Some(value);
        self
    }

    /// Number of items actually returned in the page.
    pub fn size(&mut self, value: i64) -> &mut Self {
        self.size = Some(value);
        self
    }

    /// Total number of items of the collection.
    pub fn total(&mut self, value: i64) -> &mut Self {
        self.total = Some(value);
        self
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }

    #[must_use]
    pub fn get_items(&self) -> Option<&List<T>> {
        self.items.as_ref()
    }
}

impl<T: Object> ServerResponse for ListServerResponse<T> {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        let data = ListPageData {
            items: self.items.as_ref().map(List::wrap),
            page: self.page,
            size: self.size,
            total: self.total,
        };
        serde_json::to_vec(&data).map(Some)
    }
}

/// Request of an action endpoint, such as a cluster authorization.
#[derive(Debug, Clone)]
pub struct PostServerRequest<T> {
    request: T,
}

impl<T> PostServerRequest<T> {
    #[must_use]
    pub fn new(request: T) -> Self {
        Self { request }
    }

    #[must_use]
    pub fn request(&self) -> &T {
        &self.request
    }

    #[must_use]
    pub fn into_request(self) -> T {
        self.request
    }
}

#[derive(Debug, Clone)]
pub struct PostServerResponse<T> {
    status: StatusCode,
    response: Option<T>,
}

impl<T> Default for PostServerResponse<T> {
    fn default() -> Self {
        Self {
            status: StatusCode::CREATED,
            response: None,
        }
    }
}

impl<T> PostServerResponse<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(&mut self, value: T) -> &mut Self {
        self.response = Some(value);
        self
    }

    pub fn status(&mut self, value: StatusCode) -> &mut Self {
        self.status = value;
        self
    }
}

impl<T: Object> ServerResponse for PostServerResponse<T> {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        encode_object(self.status, self.response.as_ref())
    }
}
