use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Access role carried by a user record and asserted by its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Get the role's wire representation.
    ///
    /// # Returns
    /// Lowercase role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Error for role parsing failures.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown role: {0} (expected 'user' or 'admin')")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
