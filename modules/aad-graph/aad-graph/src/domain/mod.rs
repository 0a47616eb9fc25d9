//! Domain layer for the AAD Graph module.

pub mod error;
pub mod local_client;
pub mod policy;
pub mod service;

pub use error::DomainError;
pub use local_client::AadGraphLocalClient;
pub use policy::AuthorityPolicy;
pub use service::Service;
