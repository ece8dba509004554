use crate::repositories::credential_repository::{CredentialRepository, RepositoryError};
use crate::services::password::PasswordHasher;
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidEmailOrPassword,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Password verification task failed: {0}")]
    Verification(#[from] tokio::task::JoinError),
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub auth_token: String,
}

pub struct AuthService {
    credential_repository: Arc<dyn CredentialRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(credential_repository: Arc<dyn CredentialRepository>) -> Self {
        Self {
            credential_repository,
            hasher: PasswordHasher::new(),
        }
    }

    /// Verifies the credentials and returns the account's stored auth token.
    ///
    /// The token is never minted or rotated here. A successful login records
    /// the current time as `last_login_date`; that write is not transactional
    /// with the lookup.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthServiceError> {
        let credential = match self
            .credential_repository
            .find_by_email(&request.email)
            .await?
        {
            Some(credential) => credential,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AuthServiceError::InvalidEmailOrPassword);
            }
        };

        // Argon2 is CPU bound; keep it off the async workers
        let hasher = self.hasher;
        let stored_hash = credential.password.clone();
        let salt = credential.salt.clone();
        let iterations = credential.iterations;
        let password = request.password;
        let matches = tokio::task::spawn_blocking(move || {
            hasher.verify(&password, &stored_hash, &salt, iterations)
        })
        .await?;

        if !matches {
            tracing::warn!(email = %credential.email, "Login rejected: password mismatch");
            return Err(AuthServiceError::InvalidEmailOrPassword);
        }

        self.credential_repository
            .touch_last_login(&credential.email, Utc::now())
            .await?;

        tracing::info!(email = %credential.email, "Login succeeded");

        Ok(LoginResponse {
            auth_token: credential.auth_token,
        })
    }
}
