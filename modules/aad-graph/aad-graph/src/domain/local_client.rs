//! Local (in-process) client for the AAD Graph module.

use std::sync::Arc;

use aad_graph_sdk::{AadGraphClient, AadGraphError, UserGroup};
use aad_security::GrantedAuthority;
use async_trait::async_trait;

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Built by [`crate::module::init`].
pub struct AadGraphLocalClient {
    svc: Arc<Service>,
}

impl AadGraphLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AadGraphError {
    tracing::error!(operation = op, error = %e, "aad_graph call failed");
    e.into()
}

#[async_trait]
impl AadGraphClient for AadGraphLocalClient {
    async fn user_groups(&self, bearer_token: &str) -> Result<Vec<UserGroup>, AadGraphError> {
        self.svc
            .user_groups(bearer_token)
            .await
            .map_err(|e| log_and_convert("user_groups", e))
    }

    async fn granted_authorities(
        &self,
        bearer_token: &str,
    ) -> Result<Vec<GrantedAuthority>, AadGraphError> {
        self.svc
            .granted_authorities(bearer_token)
            .await
            .map_err(|e| log_and_convert("granted_authorities", e))
    }
}
