//! Opaque bearer tokens.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// A freshly minted token. `token` goes to the client once; `token_hash` is
/// what gets stored.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("token_hash", &self.token_hash)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Mint a token valid for `ttl` from now.
///
/// # Errors
///
/// Returns `AuthError::Random` if the OS RNG fails.
pub fn issue_token(ttl: Duration) -> Result<IssuedToken, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Random(e.to_string()))?;
    let token = URL_SAFE_NO_PAD.encode(bytes);
    let issued_at = Utc::now();

    Ok(IssuedToken {
        token_hash: hash_token(&token),
        token,
        issued_at,
        expires_at: issued_at + ttl,
    })
}

/// Lower-case hex SHA-256 of the token text.
#[must_use]
pub fn hash_token(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` unless the value is `Bearer <token>`.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// # Errors
///
/// Returns `AuthError::TokenExpired` once `now` reaches `expires_at`.
pub fn check_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AuthError> {
    if now >= expires_at {
        return Err(AuthError::TokenExpired);
    }
    Ok(())
}
