//! Error objects of the accounts management API.
//!
//! The wire shape is `{"kind":"Error","id":"404","href":...,"code":...,"reason":...}`.
//! With the `axum` feature enabled the crate also provides the writers used by
//! the dispatch layer to report 404, 405 and 500 conditions.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
#[cfg(feature = "axum")]
pub mod send;

pub use error::{
    ERROR_KIND, ERROR_NIL_KIND, Error, ErrorBuilder, UnmarshalError, marshal_error,
    unmarshal_error, unmarshal_error_from_reader,
};
#[cfg(feature = "axum")]
pub use send::{
    send_error, send_internal_server_error, send_method_not_allowed, send_not_found, send_panic,
};
