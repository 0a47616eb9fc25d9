//! AAD Graph module wiring.

use std::sync::Arc;

use aad_graph_sdk::AadGraphClient;
use tracing::{info, warn};

use crate::config::AadGraphConfig;
use crate::domain::{AadGraphLocalClient, AuthorityPolicy, Service};

/// Build the [`AadGraphClient`] for a loaded configuration.
///
/// A missing endpoint for the configured environment is only reported here;
/// lookups fail with `MissingEndpoint` when they are attempted.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
#[tracing::instrument(skip_all, fields(environment))]
pub fn init(cfg: &AadGraphConfig) -> anyhow::Result<Arc<dyn AadGraphClient>> {
    let environment = cfg.authentication.environment.as_str();
    tracing::Span::current().record("environment", environment);

    let svc = Arc::new(Service::new(cfg)?);
    match svc.policy() {
        AuthorityPolicy::AllowList(groups) => {
            info!(allowed = groups.len(), "Authorities filtered by allow-list");
        }
        AuthorityPolicy::Configured(groups) => {
            info!(configured = groups.len(), "Authorities taken from configured groups");
        }
        AuthorityPolicy::None => warn!("No groups configured, no authorities will be granted"),
    }

    match cfg.membership_uri() {
        Some(uri) => info!(uri, "Initialized aad_graph"),
        None => warn!("No membership endpoint configured for environment"),
    }

    Ok(Arc::new(AadGraphLocalClient::new(svc)))
}
