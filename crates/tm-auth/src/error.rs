use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("token expired, log in again")]
    TokenExpired,

    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("random number generation failed: {0}")]
    Random(String),
}
