//! Client side of the bindings.
//!
//! A [`Connection`] sends `http::Request<Body>` through any tower service: a
//! `hyper-util` HTTP client for remote servers or an `axum::Router` when the
//! server runs in the same process. The generic requests below are what the
//! typed SDK clients return from their verb methods.

mod connection;
mod error;
mod request;

pub use connection::{BoxError, Connection, ConnectionBuilder, HttpService};
pub use error::ClientError;
pub use request::{
    ActionRequest, AddRequest, AddResponse, DeleteRequest, DeleteResponse, GetRequest, GetResponse,
    ListRequest, ListResponse, PostRequest, PostResponse, UpdateRequest, UpdateResponse,
};
