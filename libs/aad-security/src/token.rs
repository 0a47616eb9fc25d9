//! Parsed compact JWS tokens.
//!
//! Parsing only splits and decodes the token. Signatures are expected to have
//! been verified upstream before a token reaches this crate.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, Header};

use crate::claims::{ClaimSet, ClaimsError};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token: expected 3 segments, found {0}")]
    SegmentCount(usize),

    #[error("malformed token header: {0}")]
    Header(#[from] jsonwebtoken::errors::Error),

    #[error("malformed token payload: {0}")]
    Payload(#[from] base64::DecodeError),

    #[error("malformed token claims: {0}")]
    Claims(#[from] ClaimsError),
}

/// A compact JWS with its header decoded and payload and signature kept
/// encoded.
#[derive(Debug, Clone)]
pub struct SignedToken {
    header: Header,
    payload_segment: String,
    signature_segment: String,
}

impl SignedToken {
    /// Parse `header.payload.signature`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token does not have exactly three
    /// segments or its header is not a valid JOSE header.
    pub fn parse(compact: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = compact.trim().split('.').collect();
        let [_, payload_segment, signature_segment] = segments[..] else {
            return Err(TokenError::SegmentCount(segments.len()));
        };

        let header = jsonwebtoken::decode_header(compact.trim())?;

        Ok(Self {
            header,
            payload_segment: payload_segment.to_owned(),
            signature_segment: signature_segment.to_owned(),
        })
    }

    /// Key identifier from the header, if present.
    #[must_use]
    pub fn kid(&self) -> Option<&str> {
        self.header.kid.as_deref()
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.header.alg
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature_segment
    }

    /// Decode the payload segment into a claim set.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the payload is not base64url-encoded JSON
    /// object.
    pub fn claims(&self) -> Result<ClaimSet, TokenError> {
        let payload = URL_SAFE_NO_PAD.decode(self.payload_segment.trim_end_matches('='))?;
        Ok(ClaimSet::from_json_slice(&payload)?)
    }
}
