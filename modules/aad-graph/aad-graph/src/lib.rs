//! AAD Graph Module
//!
//! Resolves the directory groups of the user behind a bearer token by calling
//! the configured membership endpoint, and maps them into `ROLE_<group>`
//! authorities.
//!
//! Provides the `AadGraphClient` implementation consumed through
//! [`module::init`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::AadGraphConfig;
