use std::fmt;

use axum::body::Body;
use bytes::Bytes;
use http::{HeaderValue, Request, Response, header};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::util::BoxCloneSyncService;
use tower::{Service, ServiceBuilder, ServiceExt};

use super::error::ClientError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Type-erased transport used by a [`Connection`].
pub type HttpService = BoxCloneSyncService<Request<Body>, Response<Body>, BoxError>;

const DEFAULT_URL: &str = "http://localhost:8000";
const DEFAULT_AGENT: &str = concat!("ams-core/", env!("CARGO_PKG_VERSION"));

/// Connection to an accounts management server.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct Connection {
    base_url: String,
    token: Option<String>,
    agent: String,
    service: HttpService,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("agent", &self.agent)
            .finish_non_exhaustive()
    }
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path` with the given query parameters.
    #[must_use]
    pub fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// Sends a request, adding the authentication and user agent headers.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the transport fails. HTTP error
    /// statuses are returned as regular responses.
    pub async fn send(&self, mut request: Request<Body>) -> Result<Response<Body>, ClientError> {
        let headers = request.headers_mut();
        if let Ok(agent) = HeaderValue::from_str(&self.agent) {
            headers.entry(header::USER_AGENT).or_insert(agent);
        }
        headers
            .entry(header::ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Request(e.into()))?;
            headers.entry(header::AUTHORIZATION).or_insert(value);
        }
        tracing::debug!(method = %request.method(), uri = %request.uri(), "Sending request");
        self.service
            .clone()
            .oneshot(request)
            .await
            .map_err(ClientError::Transport)
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct ConnectionBuilder {
    base_url: String,
    token: Option<String>,
    agent: String,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_owned(),
            token: None,
            agent: DEFAULT_AGENT.to_owned(),
        }
    }
}

impl ConnectionBuilder {
    /// Scheme, host and port of the server, for example `https://api.example.com`.
    pub fn url(mut self, value: impl Into<String>) -> Self {
        self.base_url = value.into().trim_end_matches('/').to_owned();
        self
    }

    /// Bearer token sent in the `Authorization` header.
    pub fn token(mut self, value: impl Into<String>) -> Self {
        self.token = Some(value.into());
        self
    }

    pub fn agent(mut self, value: impl Into<String>) -> Self {
        self.agent = value.into();
        self
    }

    /// Builds a connection sending requests through `service`.
    pub fn build_with<S, B>(self, service: S) -> Connection
    where
        S: Service<Request<Body>, Response = Response<B>> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let service = ServiceBuilder::new()
            .map_response(|response: Response<B>| response.map(Body::new))
            .map_err(|e: S::Error| -> BoxError { e.into() })
            .service(service);
        Connection {
            base_url: self.base_url,
            token: self.token,
            agent: self.agent,
            service: BoxCloneSyncService::new(service),
        }
    }

    /// Builds a connection over plain HTTP/1.
    pub fn build(self) -> Connection {
        let client = Client::builder(TokioExecutor::new()).build_http::<Body>();
        self.build_with(client)
    }
}
