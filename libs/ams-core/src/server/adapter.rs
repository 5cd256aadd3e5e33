use std::future::Future;

use axum::body::Body;
use axum::response::Response;
use http::{HeaderValue, header};

use super::context::RequestContext;
use super::types::{ListServerRequest, ServerResponse};
use crate::codec::{DecodeError, Object};
use crate::query::QueryError;

/// Failure to turn an HTTP request into a typed request.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("can't read request body: {0}")]
    Body(#[source] axum::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Reads and decodes a JSON request body.
///
/// The body size limit is enforced by the router layer.
///
/// # Errors
/// Fails when the body can't be read or decoded.
pub async fn read_body<T: Object>(body: Body) -> Result<T, ReadError> {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(ReadError::Body)?;
    Ok(T::unmarshal(&bytes)?)
}

/// Reads the paging and filtering parameters of a collection request.
///
/// # Errors
/// Fails when a parameter is repeated or has the wrong type.
pub fn read_list_request(ctx: &RequestContext) -> Result<ListServerRequest, ReadError> {
    let query = ctx.query();
    let mut request = ListServerRequest::new();
    if let Some(order) = query.parse_string("order")? {
        request = request.with_order(order);
    }
    if let Some(page) = query.parse_integer("page")? {
        request = request.with_page(page);
    }
    if let Some(search) = query.parse_string("search")? {
        request = request.with_search(search);
    }
    if let Some(size) = query.parse_integer("size")? {
        request = request.with_size(size);
    }
    if let Some(total) = query.parse_integer("total")? {
        request = request.with_total(total);
    }
    Ok(request)
}

/// Runs one verb: takes the read request, lets `handler` fill `response` and
/// writes it.
///
/// Read and handler failures are logged with their detail and answered with
/// a generic 500.
pub async fn adapt<Req, Resp, F, Fut>(
    ctx: &RequestContext,
    request: Result<Req, ReadError>,
    response: Resp,
    handler: F,
) -> Response
where
    Resp: ServerResponse,
    F: FnOnce(Req, Resp) -> Fut,
    Fut: Future<Output = anyhow::Result<Resp>>,
{
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(
                method = %ctx.method(),
                path = ctx.path(),
                error = %e,
                "Can't read request"
            );
            return ams_errors::send_internal_server_error(ctx.method(), ctx.path());
        }
    };
    match handler(request, response).await {
        Ok(response) => write_response(ctx, &response),
        Err(e) => {
            tracing::error!(
                method = %ctx.method(),
                path = ctx.path(),
                error = %format!("{e:#}"),
                "Can't process request"
            );
            ams_errors::send_internal_server_error(ctx.method(), ctx.path())
        }
    }
}

/// Writes the status and JSON body of a filled response.
pub fn write_response(ctx: &RequestContext, response: &impl ServerResponse) -> Response {
    let body = match response.encode() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(
                method = %ctx.method(),
                path = ctx.path(),
                error = %e,
                "Can't write response"
            );
            return ams_errors::send_internal_server_error(ctx.method(), ctx.path());
        }
    };
    let mut http_response = match body {
        Some(body) => {
            let mut http_response = Response::new(Body::from(body));
            http_response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            http_response
        }
        None => Response::new(Body::empty()),
    };
    *http_response.status_mut() = response.status_code();
    http_response
}

/// Answers a path segment that matches no child resource.
#[must_use]
pub fn not_found(ctx: &RequestContext) -> Response {
    tracing::debug!(path = ctx.path(), "No resource for path");
    ams_errors::send_not_found(ctx.path())
}

/// Answers a method the resource doesn't support.
#[must_use]
pub fn method_not_allowed(ctx: &RequestContext) -> Response {
    tracing::debug!(method = %ctx.method(), path = ctx.path(), "Method not supported");
    ams_errors::send_method_not_allowed(ctx.method(), ctx.path())
}
