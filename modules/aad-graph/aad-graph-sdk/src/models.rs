//! Models for directory membership responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `memberOf` response: the directory objects the user belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipResponse {
    pub value: Vec<DirectoryObject>,
}

/// One entry of a membership response (group, directory role, ...).
///
/// Well-known properties are typed; everything else is kept in `properties`
/// so deployments can match on custom keys.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryObject {
    #[serde(rename = "objectType")]
    pub object_type: Option<String>,
    #[serde(rename = "objectId")]
    pub object_id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, Value>,
}

impl DirectoryObject {
    /// String value of the property named `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        match key {
            "objectType" => self.object_type.as_deref(),
            "objectId" => self.object_id.as_deref(),
            "displayName" => self.display_name.as_deref(),
            _ => self.properties.get(key).and_then(Value::as_str),
        }
    }
}

/// A directory group the user is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub object_id: String,
    pub display_name: String,
}
