//! Granted authorities derived from directory group membership.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix applied to every role-style authority.
pub const ROLE_PREFIX: &str = "ROLE_";

/// A role/permission marker attached to an authenticated principal.
///
/// Always carries the full authority string, e.g. `ROLE_group1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    /// Build the role authority for a directory group name.
    #[must_use]
    pub fn role(group_name: &str) -> Self {
        Self(format!("{ROLE_PREFIX}{group_name}"))
    }

    /// The full authority string.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.0
    }

    /// The group name without the role prefix, if this is a role authority.
    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        self.0.strip_prefix(ROLE_PREFIX)
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GrantedAuthority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
