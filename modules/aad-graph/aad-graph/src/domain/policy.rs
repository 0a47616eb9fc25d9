//! Selection of the groups that become authorities.

use std::collections::HashSet;

use aad_graph_sdk::UserGroup;
use aad_security::GrantedAuthority;

use crate::config::AadAuthenticationConfig;

/// Which groups are granted as `ROLE_<group>` authorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityPolicy {
    /// Directory groups whose display name is in the allow-list, in the
    /// order the directory returns them.
    AllowList(Vec<String>),
    /// The configured groups, in configured order. The membership response
    /// is not consulted.
    Configured(Vec<String>),
    /// Nothing configured: no authorities.
    None,
}

impl AuthorityPolicy {
    /// The allow-list wins when both lists are configured.
    #[must_use]
    pub fn from_config(cfg: &AadAuthenticationConfig) -> Self {
        if !cfg.user_group.allowed_groups.is_empty() {
            Self::AllowList(cfg.user_group.allowed_groups.clone())
        } else if !cfg.active_directory_groups.is_empty() {
            Self::Configured(cfg.active_directory_groups.clone())
        } else {
            Self::None
        }
    }

    /// Whether the membership response has to be decoded into groups.
    #[must_use]
    pub fn needs_groups(&self) -> bool {
        matches!(self, Self::AllowList(_))
    }

    /// Map groups to authorities.
    ///
    /// Directory groups matched by the allow-list collapse to their first
    /// occurrence. Configured groups map one-to-one, so the output has the
    /// same length and order as the configured list.
    #[must_use]
    pub fn authorities(&self, groups: &[UserGroup]) -> Vec<GrantedAuthority> {
        match self {
            Self::AllowList(allowed) => {
                let mut seen = HashSet::new();
                groups
                    .iter()
                    .map(|g| g.display_name.as_str())
                    .filter(|name| allowed.iter().any(|a| a == name))
                    .filter(|name| seen.insert(*name))
                    .map(GrantedAuthority::role)
                    .collect()
            }
            Self::Configured(configured) => configured
                .iter()
                .map(|name| GrantedAuthority::role(name))
                .collect(),
            Self::None => Vec::new(),
        }
    }
}
