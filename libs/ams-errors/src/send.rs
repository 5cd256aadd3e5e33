//! Writers for the error responses produced by the dispatch layer.

use axum::body::Body;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::{Error, marshal_error};

const PANIC_ID: &str = "1000";
const PANIC_REASON: &str =
    "An unexpected error happened, please check the log of the service for details";

/// Writes `error` using its `id` as the HTTP status code.
///
/// An id that isn't a valid status code is reported through [`send_panic`].
#[must_use]
pub fn send_error(error: &Error) -> Response {
    let status = error
        .get_id()
        .and_then(|id| id.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok());
    let Some(status) = status else {
        tracing::error!(
            id = error.id(),
            "Can't convert error identifier to status code"
        );
        return send_panic();
    };
    write(status, error)
}

/// Writes the generic 500 response used when nothing better can be said.
#[must_use]
pub fn send_panic() -> Response {
    let error = Error::builder().id(PANIC_ID).reason(PANIC_REASON).build();
    write(StatusCode::INTERNAL_SERVER_ERROR, &error)
}

#[must_use]
pub fn send_not_found(path: &str) -> Response {
    let error = Error::builder()
        .id(StatusCode::NOT_FOUND.as_u16().to_string())
        .reason(format!("Can't find resource for path '{path}''"))
        .build();
    write(StatusCode::NOT_FOUND, &error)
}

#[must_use]
pub fn send_method_not_allowed(method: &Method, path: &str) -> Response {
    let error = Error::builder()
        .id(StatusCode::METHOD_NOT_ALLOWED.as_u16().to_string())
        .reason(format!(
            "Method '{method}' isn't supported for path '{path}''"
        ))
        .build();
    write(StatusCode::METHOD_NOT_ALLOWED, &error)
}

#[must_use]
pub fn send_internal_server_error(method: &Method, path: &str) -> Response {
    let error = Error::builder()
        .id(StatusCode::INTERNAL_SERVER_ERROR.as_u16().to_string())
        .reason(format!(
            "Can't process '{method}' request for path '{path}' due to an internal server error"
        ))
        .build();
    write(StatusCode::INTERNAL_SERVER_ERROR, &error)
}

fn write(status: StatusCode, error: &Error) -> Response {
    match marshal_error(error) {
        Ok(body) => {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Can't send error response");
            status.into_response()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        send_error(&self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::error::unmarshal_error;

    async fn body_of(response: Response) -> Error {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        unmarshal_error(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_reports_path() {
        let response = send_not_found("/api/accounts_mgmt/v1/nope");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let error = body_of(response).await;
        assert_eq!(error.id(), "404");
        assert_eq!(
            error.reason(),
            "Can't find resource for path '/api/accounts_mgmt/v1/nope''"
        );
    }

    #[tokio::test]
    async fn method_not_allowed_reports_method() {
        let response = send_method_not_allowed(&Method::PUT, "/accounts");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let error = body_of(response).await;
        assert_eq!(error.id(), "405");
        assert_eq!(
            error.reason(),
            "Method 'PUT' isn't supported for path '/accounts''"
        );
    }

    #[tokio::test]
    async fn error_id_becomes_status() {
        let response = send_error(&Error::builder().id("409").reason("Taken").build());
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_of(response).await.reason(), "Taken");
    }

    #[tokio::test]
    async fn non_numeric_id_falls_back_to_panic() {
        let response = Error::builder().id("oops").build().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = body_of(response).await;
        assert_eq!(error.id(), "1000");
        assert_eq!(error.reason(), PANIC_REASON);
    }
}
