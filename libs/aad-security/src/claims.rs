//! Claim sets carried by signed tokens.
//!
//! Claims are modelled as a closed variant type ([`ClaimValue`]) so the
//! principal can be encoded with a non-self-describing binary format and
//! consumers never have to deal with untyped JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registered claim names (RFC 7519, section 4.1).
pub mod names {
    pub const SUBJECT: &str = "sub";
    pub const ISSUER: &str = "iss";
    pub const AUDIENCE: &str = "aud";
    pub const EXPIRATION_TIME: &str = "exp";
    pub const NOT_BEFORE: &str = "nbf";
    pub const ISSUED_AT: &str = "iat";
    pub const JWT_ID: &str = "jti";
}

/// Errors produced while reading a claim set from JSON.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("claim set must be a JSON object")]
    NotAnObject,

    #[error("invalid claim set JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single claim value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ClaimValue>),
    Map(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Convert a JSON value. `null` has no counterpart and yields `None`;
    /// nulls nested in lists or objects are dropped.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::String(s)),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(fields) => Some(Self::Map(
                fields
                    .into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Render as JSON. Non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Bool(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[ClaimValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, ClaimValue>> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ClaimValue>> for ClaimValue {
    fn from(value: BTreeMap<String, ClaimValue>) -> Self {
        Self::Map(value)
    }
}

/// Mapping of claim names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSet {
    #[must_use]
    pub fn builder() -> ClaimSetBuilder {
        ClaimSetBuilder::default()
    }

    /// Parse a JSON object (e.g. a decoded JWT payload).
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError`] if the input is not valid JSON or not an object.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ClaimsError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_json_value(value)
    }

    /// # Errors
    ///
    /// Returns [`ClaimsError::NotAnObject`] if `value` is not a JSON object.
    pub fn from_json_value(value: Value) -> Result<Self, ClaimsError> {
        let Value::Object(fields) = value else {
            return Err(ClaimsError::NotAnObject);
        };
        let claims = fields
            .into_iter()
            .filter_map(|(k, v)| ClaimValue::from_json(v).map(|v| (k, v)))
            .collect();
        Ok(Self { claims })
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.claims
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.get_str(names::SUBJECT)
    }

    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.get_str(names::ISSUER)
    }

    /// Audience values. A single-string `aud` yields one element.
    #[must_use]
    pub fn audience(&self) -> Vec<&str> {
        match self.get(names::AUDIENCE) {
            Some(ClaimValue::String(aud)) => vec![aud.as_str()],
            Some(ClaimValue::List(items)) => items.iter().filter_map(ClaimValue::as_str).collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn expiration_time(&self) -> Option<i64> {
        self.get(names::EXPIRATION_TIME).and_then(ClaimValue::as_i64)
    }

    #[must_use]
    pub fn not_before(&self) -> Option<i64> {
        self.get(names::NOT_BEFORE).and_then(ClaimValue::as_i64)
    }

    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.get(names::ISSUED_AT).and_then(ClaimValue::as_i64)
    }

    #[must_use]
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str(names::JWT_ID)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Default)]
pub struct ClaimSetBuilder {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSetBuilder {
    #[must_use]
    pub fn subject(self, subject: &str) -> Self {
        self.claim(names::SUBJECT, subject)
    }

    #[must_use]
    pub fn issuer(self, issuer: &str) -> Self {
        self.claim(names::ISSUER, issuer)
    }

    #[must_use]
    pub fn audience(self, audience: Vec<String>) -> Self {
        self.claim(names::AUDIENCE, audience)
    }

    #[must_use]
    pub fn expiration_time(self, exp: i64) -> Self {
        self.claim(names::EXPIRATION_TIME, exp)
    }

    #[must_use]
    pub fn not_before(self, nbf: i64) -> Self {
        self.claim(names::NOT_BEFORE, nbf)
    }

    #[must_use]
    pub fn issued_at(self, iat: i64) -> Self {
        self.claim(names::ISSUED_AT, iat)
    }

    #[must_use]
    pub fn jwt_id(self, jti: &str) -> Self {
        self.claim(names::JWT_ID, jti)
    }

    /// Set an arbitrary claim, replacing any previous value.
    #[must_use]
    pub fn claim(mut self, name: &str, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ClaimSet {
        ClaimSet {
            claims: self.claims,
        }
    }
}
