use axum::{extract::State, Json};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    extract::JsonBody,
    models::user::User,
    services::auth::verify_credentials,
    state::AppState,
    token::issue_token,
};

/// The request payload for login.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(length(min = 1, max = 255))]
    pub email: String,
    #[garde(length(max = 128))]
    pub password: String,
}

/// The response payload of the mock login endpoint.
#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
    pub token: String,
}

/// Handles the mock backend login.
///
/// Stateless: it checks the credential pair and echoes the user with a fresh
/// token, but keeps no session of its own.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    payload.validate()?;
    tracing::info!("🔐 Mock API login attempt: {}", payload.email);

    let user = verify_credentials(&state.config.login_policy, &payload.email, &payload.password)
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    Ok(Json(LoginResponse {
        success: true,
        token: issue_token(&user),
        user,
    }))
}
