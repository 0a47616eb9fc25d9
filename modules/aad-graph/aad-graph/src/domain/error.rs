//! Domain errors for the AAD Graph module.

use aad_graph_sdk::AadGraphError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("bearer token is empty")]
    EmptyToken,

    #[error("bearer token is not a valid header value")]
    InvalidToken,

    #[error("no membership endpoint configured for environment '{environment}'")]
    MissingEndpoint { environment: String },

    #[error("invalid membership endpoint '{uri}': {source}")]
    InvalidEndpoint {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("membership endpoint returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("malformed membership response: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("membership request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<DomainError> for AadGraphError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmptyToken | DomainError::InvalidToken => {
                Self::Unauthorized(e.to_string())
            }
            DomainError::MissingEndpoint { environment } => Self::MissingEndpoint { environment },
            DomainError::UnexpectedStatus { .. }
            | DomainError::MalformedBody(_)
            | DomainError::Transport(_) => Self::DirectoryLookup(e.to_string()),
            DomainError::InvalidEndpoint { .. } | DomainError::Client(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}
