//! Credential primitives library
//!
//! Provides the cryptographic building blocks for identity services:
//! - Password hashing (Argon2id, tunable work factor)
//! - Signed, time-bounded identity tokens (HS256 JWT)
//!
//! The service crate owns the orchestration (lookups, registration, login);
//! this crate only knows how to hash, sign, and verify.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use chrono::Utc;
//! use credentials::{Role, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let now = Utc::now();
//! let token = codec.sign("user123", Role::User, now).unwrap();
//! let claims = codec.verify(&token, now).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.role, Role::User);
//! ```

pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
