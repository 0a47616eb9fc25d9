//! The authenticated user behind a verified token.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::claims::{ClaimSet, ClaimValue};
use crate::token::{SignedToken, TokenError};

#[derive(Debug, thiserror::Error)]
pub enum PrincipalError {
    #[error("token header has no key identifier (kid)")]
    MissingKid,

    #[error("principal requires at least one claim")]
    EmptyClaims,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// The authenticated user behind a verified token.
///
/// Built once per authenticated request. The value is self-contained (no
/// reference to the original token) so it can be persisted and restored with
/// [`crate::encode_bin`] / [`crate::decode_bin`]. Deserialization from any
/// format enforces the same invariants as [`UserPrincipal::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawUserPrincipal")]
pub struct UserPrincipal {
    /// Key identifier of the signing key, from the token header.
    kid: String,
    /// Signing algorithm from the token header.
    algorithm: Algorithm,
    claims: ClaimSet,
}

impl UserPrincipal {
    /// # Errors
    ///
    /// - [`PrincipalError::MissingKid`] if the header carries no `kid`
    /// - [`PrincipalError::EmptyClaims`] if `claims` is empty
    pub fn new(token: &SignedToken, claims: ClaimSet) -> Result<Self, PrincipalError> {
        let kid = token.kid().ok_or(PrincipalError::MissingKid)?;
        Self::validated(kid.to_owned(), token.algorithm(), claims)
    }

    fn validated(
        kid: String,
        algorithm: Algorithm,
        claims: ClaimSet,
    ) -> Result<Self, PrincipalError> {
        if kid.is_empty() {
            return Err(PrincipalError::MissingKid);
        }
        if claims.is_empty() {
            return Err(PrincipalError::EmptyClaims);
        }
        Ok(Self {
            kid,
            algorithm,
            claims,
        })
    }

    /// Build a principal from a compact token, taking claims from its payload.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError`] if the token cannot be parsed or violates
    /// the constraints of [`UserPrincipal::new`].
    pub fn from_token(compact: &str) -> Result<Self, PrincipalError> {
        let token = SignedToken::parse(compact)?;
        let claims = token.claims()?;
        Self::new(&token, claims)
    }

    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.claims.issuer()
    }
}

/// Unchecked wire shape of [`UserPrincipal`].
#[derive(Deserialize)]
struct RawUserPrincipal {
    kid: String,
    algorithm: Algorithm,
    claims: ClaimSet,
}

impl TryFrom<RawUserPrincipal> for UserPrincipal {
    type Error = PrincipalError;

    fn try_from(raw: RawUserPrincipal) -> Result<Self, Self::Error> {
        Self::validated(raw.kid, raw.algorithm, raw.claims)
    }
}
