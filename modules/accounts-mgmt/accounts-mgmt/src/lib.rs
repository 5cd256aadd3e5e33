//! Server side of the accounts management API, version 1.
//!
//! Implement the traits in [`server`] and mount the tree with [`router`]:
//!
//! ```ignore
//! let app = accounts_mgmt::router(Arc::new(MyRoot::new()), &ServerConfig::default());
//! axum::serve(listener, app).await?;
//! ```
//!
//! Requests are routed segment by segment: each collection server hands the
//! next segment to its item accessor, each item server to its child
//! accessors. An accessor returning `None` answers 404.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod router;
pub mod server;

pub use router::router;
pub use server::*;
