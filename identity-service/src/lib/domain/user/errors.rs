use std::fmt;

use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password rule violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordRuleError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// The unique key a colliding insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueViolation {
    Username,
    Email,
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueViolation::Username => f.write_str("username"),
            UniqueViolation::Email => f.write_str("email"),
        }
    }
}

/// Error surfaced by a user directory implementation.
///
/// A timeout stays distinguishable from every other failure so callers can
/// report it as a server fault rather than a client error.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Unique key violation on {0}")]
    DuplicateKey(UniqueViolation),

    #[error("Directory call exceeded its deadline")]
    Timeout,

    #[error("Directory error: {0}")]
    Database(String),
}

/// Top-level error for credential service operations.
///
/// Each failure condition gets its own kind; in particular a registration
/// collision and a failed login are never the same value, and a directory
/// timeout is never mistaken for either.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// Registration collision on username or email. Deliberately does not
    /// say which, to keep parity with the login error's opacity.
    #[error("Username or email already exists")]
    DuplicateCredential,

    /// Login failure: unknown account and wrong password are identical by
    /// design, so callers cannot enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User directory timed out")]
    DirectoryTimeout,

    #[error("User directory error: {0}")]
    Directory(String),

    #[error("Password error: {0}")]
    Hashing(#[from] credentials::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] credentials::TokenError),
}

impl From<DirectoryError> for IdentityError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateKey(_) => IdentityError::DuplicateCredential,
            DirectoryError::Timeout => IdentityError::DirectoryTimeout,
            DirectoryError::Database(msg) => IdentityError::Directory(msg),
        }
    }
}
