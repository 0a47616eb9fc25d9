//! Configuration for the AAD Graph module.
//!
//! Loaded with figment: built-in defaults, then an optional YAML file, then
//! `AAD_`-prefixed environment variables (`__` separates nesting levels,
//! e.g. `AAD_AUTHENTICATION__ENVIRONMENT=cn`).

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "AAD_";

/// Endpoint registry key used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "global";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AadGraphConfig {
    pub authentication: AadAuthenticationConfig,
    pub endpoints: ServiceEndpointsConfig,
}

impl AadGraphConfig {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns a figment error if the file cannot be read or a value does
    /// not match the expected shape.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// Membership endpoint for the configured environment.
    #[must_use]
    pub fn membership_uri(&self) -> Option<&str> {
        self.endpoints
            .get(&self.authentication.environment)
            .map(|e| e.aad_membership_rest_uri.as_str())
    }
}

/// Authentication settings: which groups become authorities and how
/// membership entries are recognized as groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AadAuthenticationConfig {
    /// Key into [`ServiceEndpointsConfig`] used at request time.
    pub environment: String,

    /// Groups granted as authorities regardless of the membership response,
    /// used when no allow-list is configured.
    pub active_directory_groups: Vec<String>,

    pub user_group: UserGroupConfig,

    pub connect_timeout_ms: u64,

    /// Whole-request timeout for the membership call.
    pub request_timeout_ms: u64,
}

impl Default for AadAuthenticationConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            active_directory_groups: Vec::new(),
            user_group: UserGroupConfig::default(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
        }
    }
}

/// How group entries are picked out of a membership response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserGroupConfig {
    /// Allow-list of group display names. When non-empty, only these
    /// groups (as returned by the directory) become authorities.
    pub allowed_groups: Vec<String>,

    /// Property that must equal `value` for an entry to count as a group.
    pub key: String,

    pub value: String,

    /// Property holding the group's object id.
    pub object_id_key: String,
}

impl Default for UserGroupConfig {
    fn default() -> Self {
        Self {
            allowed_groups: Vec::new(),
            key: "objectType".to_owned(),
            value: "Group".to_owned(),
            object_id_key: "objectId".to_owned(),
        }
    }
}

/// Per-environment directory endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEndpoints {
    pub aad_membership_rest_uri: String,
}

/// Endpoint registry keyed by logical environment name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceEndpointsConfig {
    endpoints: BTreeMap<String, ServiceEndpoints>,
}

impl ServiceEndpointsConfig {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            endpoints: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, environment: &str) -> Option<&ServiceEndpoints> {
        self.endpoints.get(environment)
    }

    pub fn insert(&mut self, environment: &str, endpoints: ServiceEndpoints) {
        self.endpoints.insert(environment.to_owned(), endpoints);
    }

    #[must_use]
    pub fn with(mut self, environment: &str, membership_uri: &str) -> Self {
        self.insert(
            environment,
            ServiceEndpoints {
                aad_membership_rest_uri: membership_uri.to_owned(),
            },
        );
        self
    }
}

impl Default for ServiceEndpointsConfig {
    fn default() -> Self {
        Self::empty()
            .with(
                DEFAULT_ENVIRONMENT,
                "https://graph.windows.net/me/memberOf?api-version=1.6",
            )
            .with(
                "cn",
                "https://graph.chinacloudapi.cn/me/memberOf?api-version=1.6",
            )
    }
}
