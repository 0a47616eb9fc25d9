//! Versioned binary encoding of [`UserPrincipal`].
//!
//! Layout: one version byte followed by the postcard encoding of the
//! principal. Decoding rejects unknown versions and principals that break the
//! `kid`/claims invariants.

use crate::principal::UserPrincipal;

pub const PRINCIPAL_BIN_VERSION: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PrincipalEncodeError {
    #[error("failed to encode principal: {0}")]
    Postcard(#[from] postcard::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PrincipalDecodeError {
    #[error("empty principal payload")]
    Empty,

    #[error("unsupported principal version {0}")]
    UnsupportedVersion(u8),

    #[error("failed to decode principal: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Encode a principal for storage outside the process.
///
/// # Errors
///
/// Returns [`PrincipalEncodeError`] if serialization fails.
pub fn encode_bin(principal: &UserPrincipal) -> Result<Vec<u8>, PrincipalEncodeError> {
    let payload = postcard::to_allocvec(principal)?;
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(PRINCIPAL_BIN_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a principal produced by [`encode_bin`].
///
/// # Errors
///
/// Returns [`PrincipalDecodeError`] if the payload is empty, carries an
/// unknown version, is not a valid encoding, or yields a principal with an
/// empty `kid` or no claims (reported by postcard as a custom serde error).
pub fn decode_bin(bytes: &[u8]) -> Result<UserPrincipal, PrincipalDecodeError> {
    let (&version, payload) = bytes.split_first().ok_or(PrincipalDecodeError::Empty)?;
    if version != PRINCIPAL_BIN_VERSION {
        return Err(PrincipalDecodeError::UnsupportedVersion(version));
    }

    Ok(postcard::from_bytes(payload)?)
}
