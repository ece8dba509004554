use crate::models::credential::Credential;
use crate::repositories::credential_repository::{
    CredentialRepository, NewCredential, RepositoryError,
};
use crate::services::password::{PasswordError, PasswordHasher};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CredentialServiceError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password too weak (minimum 8 characters)")]
    WeakPassword,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(#[from] PasswordError),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct CreateCredentialRequest {
    pub email: String,
    pub password: String,
    pub iterations: i64,
}

/// Provisions credential records with a fresh salt and a pre-issued auth token.
pub struct CredentialService {
    repository: Arc<dyn CredentialRepository>,
    hasher: PasswordHasher,
}

impl CredentialService {
    pub fn new(repository: Arc<dyn CredentialRepository>) -> Self {
        Self {
            repository,
            hasher: PasswordHasher::new(),
        }
    }

    pub async fn create_credential(
        &self,
        request: CreateCredentialRequest,
    ) -> Result<Credential, CredentialServiceError> {
        self.validate_email(&request.email)?;
        self.validate_password(&request.password)?;

        let salt = self.hasher.generate_salt();
        let password = self
            .hasher
            .derive(&request.password, &salt, request.iterations)?;

        let new = NewCredential {
            email: request.email,
            password,
            salt,
            iterations: request.iterations,
            auth_token: Self::generate_token(),
        };

        match self.repository.create_credential(new).await {
            Ok(credential) => {
                tracing::info!(email = %credential.email, "Credential created");
                Ok(credential)
            }
            Err(RepositoryError::AlreadyExists) => Err(CredentialServiceError::EmailTaken),
            Err(e) => Err(CredentialServiceError::RepositoryError(e)),
        }
    }

    fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        hex::encode(bytes)
    }

    fn validate_email(&self, email: &str) -> Result<(), CredentialServiceError> {
        if !email.contains('@') || email.len() > 255 || email.is_empty() {
            return Err(CredentialServiceError::InvalidEmail);
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), CredentialServiceError> {
        if password.len() < 8 {
            return Err(CredentialServiceError::WeakPassword);
        }
        Ok(())
    }
}
