//! Public API trait for directory group resolution.

use aad_security::GrantedAuthority;
use async_trait::async_trait;

use crate::error::AadGraphError;
use crate::models::UserGroup;

/// Resolves group memberships of the user behind a bearer token.
///
/// Each call issues exactly one request to the configured membership
/// endpoint; nothing is cached between calls.
#[async_trait]
pub trait AadGraphClient: Send + Sync {
    /// Directory groups the token's user is a member of, in response order.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the bearer token is empty or not a valid header value
    /// - `MissingEndpoint` if no endpoint is configured for the environment
    /// - `DirectoryLookup` on non-200 responses, malformed bodies, or transport failures
    async fn user_groups(&self, bearer_token: &str) -> Result<Vec<UserGroup>, AadGraphError>;

    /// `ROLE_<group>` authorities for the token's user.
    ///
    /// Either the complete list is returned or the call fails.
    ///
    /// # Errors
    ///
    /// Same as [`AadGraphClient::user_groups`].
    async fn granted_authorities(
        &self,
        bearer_token: &str,
    ) -> Result<Vec<GrantedAuthority>, AadGraphError>;
}
