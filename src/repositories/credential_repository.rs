use crate::models::credential::Credential;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Credential not found")]
    NotFound,
    #[error("Credential already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone)]
pub struct NewCredential {
    pub email: String,
    pub password: String,
    pub salt: String,
    pub iterations: i64,
    pub auth_token: String,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Credential>>;
    async fn touch_last_login(&self, email: &str, at: DateTime<Utc>) -> RepositoryResult<()>;
    async fn create_credential(&self, new: NewCredential) -> RepositoryResult<Credential>;
}

pub struct SqliteCredentialRepository {
    pool: SqlitePool,
}

impl SqliteCredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepository {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT
                email,
                password,
                salt,
                iterations,
                auth_token,
                last_login_date
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn touch_last_login(&self, email: &str, at: DateTime<Utc>) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE users SET last_login_date = ? WHERE email = ?")
            .bind(at.to_rfc3339())
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn create_credential(&self, new: NewCredential) -> RepositoryResult<Credential> {
        let result = sqlx::query(
            "INSERT INTO users (email, password, salt, iterations, auth_token) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.email)
        .bind(&new.password)
        .bind(&new.salt)
        .bind(new.iterations)
        .bind(&new.auth_token)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self
                .find_by_email(&new.email)
                .await?
                .ok_or(RepositoryError::NotFound),
            Err(e) => {
                if e.to_string().contains("UNIQUE") {
                    Err(RepositoryError::AlreadyExists)
                } else {
                    Err(RepositoryError::Database(e))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_pool, test_helpers};

    fn new_credential(email: &str) -> NewCredential {
        NewCredential {
            email: email.to_string(),
            password: "00ff".to_string(),
            salt: "abcd".to_string(),
            iterations: 2,
            auth_token: "token-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = SqliteCredentialRepository::new(create_test_pool().await);

        let created = repository
            .create_credential(new_credential("repo@example.com"))
            .await
            .unwrap();
        assert_eq!(created.iterations, 2);
        assert!(created.last_login_date.is_none());

        let found = repository.find_by_email("repo@example.com").await.unwrap();
        assert_eq!(found.map(|c| c.auth_token), Some("token-1".to_string()));
    }

    #[tokio::test]
    async fn test_find_is_exact_match() {
        let repository = SqliteCredentialRepository::new(create_test_pool().await);
        repository
            .create_credential(new_credential("repo@example.com"))
            .await
            .unwrap();

        assert!(repository.find_by_email("REPO@example.com").await.unwrap().is_none());
        assert!(repository.find_by_email("repo@example").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repository = SqliteCredentialRepository::new(create_test_pool().await);
        repository
            .create_credential(new_credential("dup@example.com"))
            .await
            .unwrap();

        let result = repository
            .create_credential(new_credential("dup@example.com"))
            .await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_touch_last_login() {
        let pool = create_test_pool().await;
        let repository = SqliteCredentialRepository::new(pool.clone());
        repository
            .create_credential(new_credential("touch@example.com"))
            .await
            .unwrap();

        let at = Utc::now();
        repository
            .touch_last_login("touch@example.com", at)
            .await
            .unwrap();

        let stored = test_helpers::last_login_date(&pool, "touch@example.com")
            .await
            .unwrap();
        assert_eq!(stored, Some(at.to_rfc3339()));
    }

    #[tokio::test]
    async fn test_touch_unknown_email() {
        let repository = SqliteCredentialRepository::new(create_test_pool().await);

        let result = repository.touch_last_login("ghost@example.com", Utc::now()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
