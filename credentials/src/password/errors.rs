use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is not valid: {0}")]
    InvalidHash(String),

    #[error("Invalid work factor parameters: {0}")]
    InvalidParams(String),
}
