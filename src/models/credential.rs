use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub salt: String,
    pub iterations: i64,
    pub auth_token: String,
    pub last_login_date: Option<String>,
}
