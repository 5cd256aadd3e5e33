//! Accounts management API, version 1.
//!
//! [`models`] holds every object of the API with its builder and wire codec.
//! [`client`] navigates the resource tree over a [`ams_core::client::Connection`]:
//!
//! ```ignore
//! let client = accounts_mgmt_sdk::Client::new(connection);
//! let account = client.accounts().account("1a2b").get().send().await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod models;

pub use client::Client;
pub use models::*;

/// Path under which every resource of this API version lives.
pub const API_PREFIX: &str = "/api/accounts_mgmt/v1";
