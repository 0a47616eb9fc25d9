//! AAD Graph SDK
//!
//! Public API of the `aad_graph` module:
//!
//! - [`AadGraphClient`] - resolves a bearer token's directory groups and authorities
//! - [`UserGroup`] / [`MembershipResponse`] - membership models
//! - [`AadGraphError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use aad_graph_sdk::AadGraphClient;
//!
//! let authorities = graph.granted_authorities(&bearer_token).await?;
//! for authority in &authorities {
//!     println!("{authority}");
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

pub use api::AadGraphClient;
pub use error::AadGraphError;
pub use models::{DirectoryObject, MembershipResponse, UserGroup};
