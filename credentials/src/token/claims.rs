use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Hours a token stays valid after issuance.
pub const VALIDITY_HOURS: i64 = 24;

/// Identity assertion carried by a signed token.
///
/// A fixed, typed structure rather than an open claim map: the fields are the
/// contract. Claims are frozen at issuance; validity is derived purely from
/// the signature and the `exp` timestamp at verification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role copied from the user record at issuance
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat` + 24h
    pub exp: i64,
}

impl Claims {
    /// Create claims issued at a given instant.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `role` - Role to assert
    /// * `now` - Issuance instant
    pub fn issued(subject: impl ToString, role: Role, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();
        let expires_at = (now + Duration::hours(VALIDITY_HOURS)).timestamp();

        Self {
            sub: subject.to_string(),
            role,
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Check whether the claims are expired at a given instant.
    ///
    /// A token is valid for check times in `[iat, exp)` and expired from
    /// `exp` onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
