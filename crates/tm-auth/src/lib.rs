//! # tm-auth
//!
//! Credentials for taskmaster: argon2id password hashes and opaque bearer
//! tokens. A token is 32 random bytes, base64url encoded; only its SHA-256
//! digest is ever stored.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{IssuedToken, bearer_token, check_expiry, hash_token, issue_token};
