use thiserror::Error;

/// Error type for token operations.
///
/// The verify-side variants stay distinguishable for diagnostics; callers
/// gating requests must reject all three the same way.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
