//! Membership lookup against the directory endpoint.

use std::time::Duration;

use aad_graph_sdk::{DirectoryObject, MembershipResponse, UserGroup};
use aad_security::GrantedAuthority;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use super::{AuthorityPolicy, DomainError};
use crate::config::{AadGraphConfig, ServiceEndpointsConfig, UserGroupConfig};

pub const ACCEPT_ODATA_MINIMAL_METADATA: &str = "application/json;odata=minimalmetadata";
pub const API_VERSION_HEADER: &str = "api-version";
pub const API_VERSION: &str = "1.6";

/// Resolves group memberships for bearer tokens.
///
/// Stateless between calls: configuration is read-only and every lookup is a
/// single request with no retry.
#[derive(Debug)]
pub struct Service {
    http: reqwest::Client,
    environment: String,
    endpoints: ServiceEndpointsConfig,
    group_match: UserGroupConfig,
    policy: AuthorityPolicy,
}

impl Service {
    /// # Errors
    ///
    /// Returns [`DomainError::Client`] if the HTTP client cannot be built.
    pub fn new(cfg: &AadGraphConfig) -> Result<Self, DomainError> {
        let auth = &cfg.authentication;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(auth.connect_timeout_ms))
            .timeout(Duration::from_millis(auth.request_timeout_ms))
            .build()
            .map_err(DomainError::Client)?;

        Ok(Self {
            http,
            environment: auth.environment.clone(),
            endpoints: cfg.endpoints.clone(),
            group_match: auth.user_group.clone(),
            policy: AuthorityPolicy::from_config(auth),
        })
    }

    #[must_use]
    pub fn policy(&self) -> &AuthorityPolicy {
        &self.policy
    }

    /// Groups the token's user belongs to, in response order.
    ///
    /// # Errors
    ///
    /// See [`Service::granted_authorities`].
    #[tracing::instrument(skip_all, fields(environment = %self.environment))]
    pub async fn user_groups(&self, bearer_token: &str) -> Result<Vec<UserGroup>, DomainError> {
        let body = self.fetch_membership(bearer_token).await?;
        let response: MembershipResponse =
            serde_json::from_value(body).map_err(DomainError::MalformedBody)?;
        Ok(self.groups_from(response))
    }

    /// `ROLE_<group>` authorities for the token's user.
    ///
    /// The membership endpoint is always called, so a failing directory
    /// fails the lookup even when authorities come from configuration.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyToken`] / [`DomainError::InvalidToken`] before any request
    /// - [`DomainError::MissingEndpoint`] before any request
    /// - [`DomainError::UnexpectedStatus`] for any status other than 200
    /// - [`DomainError::MalformedBody`] if the body is not JSON of the expected shape
    /// - [`DomainError::Transport`] if the request itself fails
    #[tracing::instrument(skip_all, fields(environment = %self.environment))]
    pub async fn granted_authorities(
        &self,
        bearer_token: &str,
    ) -> Result<Vec<GrantedAuthority>, DomainError> {
        let groups = if self.policy.needs_groups() {
            self.user_groups(bearer_token).await?
        } else {
            self.fetch_membership(bearer_token).await?;
            Vec::new()
        };

        let authorities = self.policy.authorities(&groups);
        debug!(count = authorities.len(), "Resolved granted authorities");
        Ok(authorities)
    }

    fn membership_uri(&self) -> Result<Url, DomainError> {
        let endpoints = self.endpoints.get(&self.environment).ok_or_else(|| {
            DomainError::MissingEndpoint {
                environment: self.environment.clone(),
            }
        })?;
        let uri = &endpoints.aad_membership_rest_uri;
        Url::parse(uri).map_err(|source| DomainError::InvalidEndpoint {
            uri: uri.clone(),
            source,
        })
    }

    async fn fetch_membership(&self, bearer_token: &str) -> Result<serde_json::Value, DomainError> {
        if bearer_token.is_empty() {
            return Err(DomainError::EmptyToken);
        }
        let uri = self.membership_uri()?;
        let mut authorization =
            HeaderValue::from_str(bearer_token).map_err(|_| DomainError::InvalidToken)?;
        authorization.set_sensitive(true);

        debug!(uri = %uri, "Requesting directory membership");
        let response = self
            .http
            .get(uri)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, ACCEPT_ODATA_MINIMAL_METADATA)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Membership endpoint returned an error status");
            return Err(DomainError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "Received membership response");
        serde_json::from_slice(&bytes).map_err(DomainError::MalformedBody)
    }

    fn groups_from(&self, response: MembershipResponse) -> Vec<UserGroup> {
        let UserGroupConfig {
            key,
            value,
            object_id_key,
            ..
        } = &self.group_match;

        response
            .value
            .into_iter()
            .filter(|entry| entry.property(key) == Some(value.as_str()))
            .filter_map(|entry| to_user_group(&entry, object_id_key))
            .collect()
    }
}

fn to_user_group(entry: &DirectoryObject, object_id_key: &str) -> Option<UserGroup> {
    let (Some(object_id), Some(display_name)) =
        (entry.property(object_id_key), entry.property("displayName"))
    else {
        debug!("Skipping group entry without object id or display name");
        return None;
    };

    Some(UserGroup {
        object_id: object_id.to_owned(),
        display_name: display_name.to_owned(),
    })
}
