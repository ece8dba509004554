use crate::error::Result;
use crate::services::auth_service::LoginRequest;
use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginPayload {
    email: String,
    password: String,
    /// Accepted for compatibility; not checked.
    #[serde(default)]
    #[allow(dead_code)]
    verification_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginBody {
    pub auth_token: String,
}

/// `POST /login`
///
/// 200 with the account's auth token, or 404 `InvalidEmailOrPassword` for
/// both unknown emails and wrong passwords.
pub async fn login_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginBody>> {
    let request = LoginRequest {
        email: payload.email,
        password: payload.password,
    };

    let response = app_state.auth_service.login(request).await?;

    Ok(Json(LoginBody {
        auth_token: response.auth_token,
    }))
}
