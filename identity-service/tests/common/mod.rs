use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use credentials::PasswordHasher;
use credentials::TokenCodec;
use identity_service::domain::user::models::NewUser;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::service::CredentialService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::DirectoryError;
use identity_service::user::errors::UniqueViolation;
use identity_service::user::ports::CredentialServicePort;
use identity_service::user::ports::UserDirectory;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// In-memory user directory for hermetic tests.
///
/// The single lock makes the duplicate-check-and-insert atomic, matching the
/// unique-key guarantee the real directory provides.
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        _timeout: Duration,
    ) -> Result<Option<User>, DirectoryError> {
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .find(|u| u.username.as_str() == username || u.email.as_str() == email)
            .cloned())
    }

    async fn insert_unique(
        &self,
        user: NewUser,
        _timeout: Duration,
    ) -> Result<UserId, DirectoryError> {
        let mut users = self.users.lock().await;

        if users
            .iter()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(DirectoryError::DuplicateKey(UniqueViolation::Username));
        }
        if users.iter().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(DirectoryError::DuplicateKey(UniqueViolation::Email));
        }

        let id = UserId(Uuid::new_v4());
        users.push(User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: user.created_at,
        });

        Ok(id)
    }
}

/// Test application serving the real router over an in-memory directory
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let directory = Arc::new(InMemoryUserDirectory::new());
        // Minimal legal work factor keeps the suite fast
        let hasher = PasswordHasher::with_work_factor(8, 1, 1).expect("Failed to build hasher");
        let token_codec = Arc::new(TokenCodec::new(TEST_SECRET).expect("Failed to build codec"));

        let credential_service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
            directory,
            hasher,
            Arc::clone(&token_codec),
            Duration::from_secs(5),
        ));

        let router = create_router(credential_service, Arc::clone(&token_codec));

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server stopped unexpectedly");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(TEST_SECRET).expect("Failed to build codec"),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}
