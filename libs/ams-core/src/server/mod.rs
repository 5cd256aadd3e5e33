//! Building blocks of the per-resource dispatchers.
//!
//! A dispatcher consumes path segments until none are left, then matches the
//! HTTP method and hands the request to [`adapt`], which reads the typed
//! request, calls the handler and writes the typed response. Read and handler
//! failures are logged and reported as a generic 500.

mod adapter;
mod config;
mod context;
mod types;

pub use adapter::{
    ReadError, adapt, method_not_allowed, not_found, read_body, read_list_request, write_response,
};
pub use config::ServerConfig;
pub use context::{RequestContext, path_segments};
pub use types::{
    AddServerRequest, AddServerResponse, DEFAULT_PAGE, DEFAULT_SIZE, DeleteServerRequest,
    DeleteServerResponse, GetServerRequest, GetServerResponse, ListPageData, ListServerRequest,
    ListServerResponse, PostServerRequest, PostServerResponse, ServerResponse, UpdateServerRequest,
    UpdateServerResponse,
};
