use std::time::Duration;

use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::DirectoryError;
use crate::user::errors::IdentityError;

/// Port for the credential service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command with username, email, password, and role
    ///
    /// # Returns
    /// Identifier assigned by the directory
    ///
    /// # Errors
    /// * `DuplicateCredential` - Username or email is already taken
    /// * `DirectoryTimeout` - Directory call exceeded its deadline
    /// * `Directory` - Directory operation failed
    /// * `Hashing` - Password hashing failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, IdentityError>;

    /// Authenticate a login attempt and mint a bearer token.
    ///
    /// The identifier is matched against username and email alike.
    ///
    /// # Arguments
    /// * `login` - Username or email address
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed token asserting the user's identity and role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or wrong password (identical)
    /// * `DirectoryTimeout` - Directory call exceeded its deadline
    /// * `Directory` - Directory operation failed
    /// * `Token` - Token signing failed
    async fn login(&self, login: &str, password: &str) -> Result<String, IdentityError>;
}

/// Durable store of user records with a unique-key guarantee.
///
/// Implementations must enforce uniqueness of username and email at insert
/// time: when two inserts race, exactly one wins and the other observes
/// `DuplicateKey`. Every call is bounded by the supplied timeout and fails
/// with `Timeout` once exceeded.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Look up a record matching the username or the email exactly.
    ///
    /// # Arguments
    /// * `username` - Candidate username
    /// * `email` - Candidate email (may equal `username` for login lookups)
    /// * `timeout` - Deadline for the round trip
    ///
    /// # Returns
    /// Matching record, or None
    ///
    /// # Errors
    /// * `Timeout` - Deadline exceeded
    /// * `Database` - Lookup failed
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        timeout: Duration,
    ) -> Result<Option<User>, DirectoryError>;

    /// Insert a new record, enforcing the unique-key constraint atomically.
    ///
    /// # Arguments
    /// * `user` - Record to persist; the directory assigns the id
    /// * `timeout` - Deadline for the round trip
    ///
    /// # Returns
    /// Identifier of the created record
    ///
    /// # Errors
    /// * `DuplicateKey` - Username or email already present
    /// * `Timeout` - Deadline exceeded
    /// * `Database` - Insert failed
    async fn insert_unique(
        &self,
        user: NewUser,
        timeout: Duration,
    ) -> Result<UserId, DirectoryError>;
}
