//! Runtime support for the accounts management API bindings.
//!
//! Every API type is a plain struct of optional fields deriving [`Object`]. The
//! derive generates the builder, the accessors and the wire struct; this crate
//! provides what the generated code and the per-resource dispatchers share:
//! - [`codec`]: the [`Object`] trait, JSON sources and decode/build errors
//! - [`list`]: ordered collections with their wire forms
//! - [`query`]: typed query parameter parsing
//! - [`server`]: request context, typed request/response pairs and adapters
//! - [`client`]: the connection and the generic requests used by SDK clients
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate self as ams_core;

pub mod client;
pub mod codec;
pub mod list;
pub mod query;
pub mod server;
pub mod timestamp;

pub use ams_macros::Object;
pub use codec::{
    BuildError, DecodeError, FromReader, JsonSource, Object, ObjectBuilder, decode_kind,
};
pub use list::{List, ListBuilder, ListLinkData, marshal_list, unmarshal_list};
pub use query::{Query, QueryError};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
