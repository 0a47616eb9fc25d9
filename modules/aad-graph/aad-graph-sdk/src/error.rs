//! Error types for the `aad_graph` module.

use thiserror::Error;

/// Errors that can occur when using the AAD Graph API.
#[derive(Debug, Error)]
pub enum AadGraphError {
    /// The bearer token is empty or cannot be sent.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No membership endpoint is registered for the configured environment.
    #[error("no membership endpoint configured for environment '{environment}'")]
    MissingEndpoint { environment: String },

    /// The membership endpoint failed or returned an unusable response.
    #[error("directory lookup failed: {0}")]
    DirectoryLookup(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
