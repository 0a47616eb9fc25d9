//! Azure AD security primitives.
//!
//! - [`GrantedAuthority`] - `ROLE_<group>` authorities resolved from directory groups
//! - [`ClaimSet`] / [`ClaimValue`] - typed token claims
//! - [`SignedToken`] - a parsed (not verified) compact JWS
//! - [`UserPrincipal`] - the authenticated user, with a versioned binary codec
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod authority;
pub mod bin_codec;
pub mod claims;
pub mod principal;
pub mod token;

pub use authority::{GrantedAuthority, ROLE_PREFIX};
pub use bin_codec::{
    PRINCIPAL_BIN_VERSION, PrincipalDecodeError, PrincipalEncodeError, decode_bin, encode_bin,
};
pub use claims::{ClaimSet, ClaimSetBuilder, ClaimValue, ClaimsError};
pub use principal::{PrincipalError, UserPrincipal};
pub use token::{SignedToken, TokenError};
