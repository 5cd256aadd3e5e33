//! Generic requests returned by the typed SDK clients.

use std::marker::PhantomData;

use axum::body::Body;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, header};

use super::connection::Connection;
use super::error::ClientError;
use crate::codec::Object;
use crate::list::List;
use crate::server::ListPageData;

/// Where a request goes and the extra parameters and headers it carries.
#[derive(Debug, Clone)]
struct Target {
    connection: Connection,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
}

/// Successful answer, body not decoded yet.
struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Target {
    fn new(connection: Connection, path: String) -> Self {
        Self {
            connection,
            path,
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    async fn execute(self, method: Method, body: Option<Vec<u8>>) -> Result<Reply, ClientError> {
        let uri = self.connection.url(&self.path, &self.query);
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))?,
            None => builder.body(Body::empty())?,
        };
        let response = self.connection.send(request).await?;
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(ClientError::Body)?;
        if parts.status.is_client_error() || parts.status.is_server_error() {
            return Err(match ams_errors::unmarshal_error(&body) {
                Ok(error) => ClientError::Api {
                    status: parts.status,
                    error,
                },
                Err(_) => ClientError::Status {
                    status: parts.status,
                },
            });
        }
        Ok(Reply {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

impl Reply {
    fn decode<T: Object>(&self) -> Result<Option<T>, ClientError> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(T::unmarshal(&self.body)?))
    }
}

fn encode<T: Object>(value: Option<&T>) -> Result<Option<Vec<u8>>, ClientError> {
    value
        .map(|value| serde_json::to_vec(&value.wrap()))
        .transpose()
        .map_err(ClientError::Encode)
}

/// Adds the `parameter` and `header` methods shared by every request.
macro_rules! request_options {
    () => {
        /// Adds a query parameter.
        pub fn parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
            self.target.query.push((name.into(), value.to_string()));
            self
        }

        /// Adds a request header.
        pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
            self.target.headers.append(name, value);
            self
        }
    };
}

/// Adds the `status` and `headers` accessors shared by every response.
macro_rules! response_meta {
    () => {
        #[must_use]
        pub fn status(&self) -> StatusCode {
            self.status
        }

        #[must_use]
        pub fn headers(&self) -> &HeaderMap {
            &self.headers
        }
    };
}

#[derive(Debug, Clone)]
#[must_use]
pub struct GetRequest<T> {
    target: Target,
    object: PhantomData<fn() -> T>,
}

impl<T: Object> GetRequest<T> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            object: PhantomData,
        }
    }

    request_options!();

    /// # Errors
    /// Fails on transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<GetResponse<T>, ClientError> {
        let reply = self.target.execute(Method::GET, None).await?;
        Ok(GetResponse {
            body: reply.decode()?,
            status: reply.status,
            headers: reply.headers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GetResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<T>,
}

impl<T> GetResponse<T> {
    response_meta!();

    #[must_use]
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn into_body(self) -> Option<T> {
        self.body
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct ListRequest<T> {
    target: Target,
    object: PhantomData<fn() -> T>,
}

impl<T: Object> ListRequest<T> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            object: PhantomData,
        }
    }

    request_options!();

    pub fn order(self, value: impl Into<String>) -> Self {
        self.parameter("order", value.into())
    }

    pub fn page(self, value: i64) -> Self {
        self.parameter("page", value)
    }

    pub fn search(self, value: impl Into<String>) -> Self {
        self.parameter("search", value.into())
    }

    pub fn size(self, value: i64) -> Self {
        self.parameter("size", value)
    }

    pub fn total(self, value: i64) -> Self {
        self.parameter("total", value)
    }

    /// # Errors
    /// Fails on transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<ListResponse<T>, ClientError> {
        let reply = self.target.execute(Method::GET, None).await?;
        let data: ListPageData<T::Data> = if reply.body.is_empty() {
            ListPageData::default()
        } else {
            serde_json::from_slice(&reply.body).map_err(|e| ClientError::Decode(e.into()))?
        };
        Ok(ListResponse {
            status: reply.status,
            headers: reply.headers,
            items: data.items.map(List::unwrap).transpose()?,
            page: data.page,
            size: data.size,
            total: data.total,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    items: Option<List<T>>,
    page: Option<i64>,
    size: Option<i64>,
    total: Option<i64>,
}

impl<T> ListResponse<T> {
    response_meta!();

    #[must_use]
    pub fn items(&self) -> Option<&List<T>> {
        self.items.as_ref()
    }

    #[must_use]
    pub fn into_items(self) -> List<T> {
        self.items.unwrap_or_default()
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or_default()
    }

    #[must_use]
    pub fn get_page(&self) -> Option<i64> {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or_default()
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

#[derive(Debug, Clone)]
#[must_use]
pub struct AddRequest<T> {
    target: Target,
    body: Option<T>,
}

impl<T: Object> AddRequest<T> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            body: None,
        }
    }

    request_options!();

    pub fn body(mut self, value: T) -> Self {
        self.body = Some(value);
        self
    }

    /// # Errors
    /// Fails on encoding and transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<AddResponse<T>, ClientError> {
        let body = encode(self.body.as_ref())?;
        let reply = self.target.execute(Method::POST, body).await?;
        Ok(AddResponse {
            body: reply.decode()?,
            status: reply.status,
            headers: reply.headers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AddResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<T>,
}

impl<T> AddResponse<T> {
    response_meta!();

    #[must_use]
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn into_body(self) -> Option<T> {
        self.body
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateRequest<T> {
    target: Target,
    body: Option<T>,
}

impl<T: Object> UpdateRequest<T> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            body: None,
        }
    }

    request_options!();

    /// Attributes to change. Unset attributes are left untouched by the server.
    pub fn body(mut self, value: T) -> Self {
        self.body = Some(value);
        self
    }

    /// # Errors
    /// Fails on encoding and transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<UpdateResponse<T>, ClientError> {
        let body = encode(self.body.as_ref())?;
        let reply = self.target.execute(Method::PATCH, body).await?;
        Ok(UpdateResponse {
            body: reply.decode()?,
            status: reply.status,
            headers: reply.headers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<T>,
}

impl<T> UpdateResponse<T> {
    response_meta!();

    #[must_use]
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteRequest {
    target: Target,
}

impl DeleteRequest {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
        }
    }

    request_options!();

    /// # Errors
    /// Fails on transport errors and error statuses.
    pub async fn send(self) -> Result<DeleteResponse, ClientError> {
        let reply = self.target.execute(Method::DELETE, None).await?;
        Ok(DeleteResponse {
            status: reply.status,
            headers: reply.headers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteResponse {
    status: StatusCode,
    headers: HeaderMap,
}

impl DeleteResponse {
    response_meta!();
}

#[derive(Debug, Clone)]
#[must_use]
pub struct PostRequest<Req, Resp> {
    target: Target,
    request: Option<Req>,
    response: PhantomData<fn() -> Resp>,
}

impl<Req: Object, Resp: Object> PostRequest<Req, Resp> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            request: None,
            response: PhantomData,
        }
    }

    request_options!();

    pub fn request(mut self, value: Req) -> Self {
        self.request = Some(value);
        self
    }

    /// # Errors
    /// Fails on encoding and transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<PostResponse<Resp>, ClientError> {
        let body = encode(self.request.as_ref())?;
        let reply = self.target.execute(Method::POST, body).await?;
        Ok(PostResponse {
            response: reply.decode()?,
            status: reply.status,
            headers: reply.headers,
        })
    }
}

/// `POST` of an action that takes no request body.
#[derive(Debug, Clone)]
#[must_use]
pub struct ActionRequest<T> {
    target: Target,
    response: PhantomData<fn() -> T>,
}

impl<T: Object> ActionRequest<T> {
    pub fn new(connection: Connection, path: String) -> Self {
        Self {
            target: Target::new(connection, path),
            response: PhantomData,
        }
    }

    request_options!();

    /// # Errors
    /// Fails on transport errors, error statuses and undecodable bodies.
    pub async fn send(self) -> Result<PostResponse<T>, ClientError> {
        let reply = self.target.execute(Method::POST, None).await?;
        Ok(PostResponse {
            response: reply.decode()?,
            status: reply.status,
            headers: reply.headers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PostResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    response: Option<T>,
}

impl<T> PostResponse<T> {
    response_meta!();

    #[must_use]
    pub fn response(&self) -> Option<&T> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn into_response(self) -> Option<T> {
        self.response
    }
}
