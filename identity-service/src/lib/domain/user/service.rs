use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use credentials::PasswordHasher;
use credentials::TokenCodec;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserId;
use crate::user::errors::DirectoryError;
use crate::user::errors::IdentityError;
use crate::user::ports::CredentialServicePort;
use crate::user::ports::UserDirectory;

/// Credential service orchestrating directory lookups, hashing, and token
/// issuance.
///
/// All collaborators are injected at construction and immutable afterwards.
/// The service holds no locks of its own; serialization of conflicting
/// registrations is delegated to the directory's unique-key guarantee.
pub struct CredentialService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
    directory_timeout: Duration,
}

impl<D> CredentialService<D>
where
    D: UserDirectory,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User directory implementation
    /// * `hasher` - Password hasher with the configured work factor
    /// * `codec` - Token codec over the process-wide signing secret
    /// * `directory_timeout` - Deadline applied to every directory call
    pub fn new(
        directory: Arc<D>,
        hasher: PasswordHasher,
        codec: Arc<TokenCodec>,
        directory_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            hasher,
            codec,
            directory_timeout,
        }
    }
}

#[async_trait]
impl<D> CredentialServicePort for CredentialService<D>
where
    D: UserDirectory,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, IdentityError> {
        let existing = self
            .directory
            .find_by_username_or_email(
                command.username.as_str(),
                command.email.as_str(),
                self.directory_timeout,
            )
            .await?;

        // Rejected duplicates never reach the hasher
        if let Some(user) = existing {
            let field = if user.username == command.username {
                "username"
            } else {
                "email"
            };
            tracing::info!(field, "Registration rejected: credential already taken");
            return Err(IdentityError::DuplicateCredential);
        }

        let password_hash = self.hasher.hash(command.password.as_str())?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        match self
            .directory
            .insert_unique(new_user, self.directory_timeout)
            .await
        {
            Ok(id) => {
                tracing::info!(user_id = %id, "User registered");
                Ok(id)
            }
            // A concurrent register won the race between our check and the
            // insert; the directory-level rejection reads the same as a
            // pre-insert duplicate.
            Err(DirectoryError::DuplicateKey(field)) => {
                tracing::info!(%field, "Registration rejected: lost uniqueness race");
                Err(IdentityError::DuplicateCredential)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, login: &str, password: &str) -> Result<String, IdentityError> {
        let user = match self
            .directory
            .find_by_username_or_email(login, login, self.directory_timeout)
            .await?
        {
            Some(user) => user,
            None => {
                tracing::info!("Login failed: unknown account");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login failed: password mismatch");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.codec.sign(user.id, user.role, Utc::now())?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }
}
