use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use garde::Validate;
use serde::Serialize;

use crate::{
    error::Result,
    extract::JsonBody,
    handlers::auth::LoginRequest,
    models::user::{ProfileUpdate, User},
    services::{guard::LOGIN_PATH, notifications::Notice},
    state::AppState,
};

/// The current session as seen by the dashboard.
#[derive(Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub loading: bool,
    pub user: Option<User>,
}

/// The response payload for session operations.
#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Returns the current session.
pub async fn current(State(state): State<AppState>) -> Json<SessionView> {
    let snapshot = state.auth.snapshot();
    Json(SessionView {
        authenticated: snapshot.is_authenticated(),
        loading: snapshot.loading,
        user: snapshot.user,
    })
}

/// Signs the dashboard in.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Response> {
    payload.validate()?;

    if !state.auth.login(&payload.email, &payload.password).await? {
        let response = SessionResponse {
            success: false,
            user: None,
            error: Some("Invalid email or password".to_string()),
        };
        return Ok((StatusCode::UNAUTHORIZED, Json(response)).into_response());
    }

    let response = SessionResponse {
        success: true,
        user: state.auth.snapshot().user,
        error: None,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Signs the dashboard out and sends the browser to the login page.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect> {
    state.auth.logout().await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// Updates the signed-in user's profile.
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<SessionResponse>> {
    let user = state.auth.update_profile(update).await?;
    Ok(Json(SessionResponse {
        success: true,
        user: Some(user),
        error: None,
    }))
}

/// Reloads the session from storage.
#[axum::debug_handler]
pub async fn refresh(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let user = state.auth.refresh_profile().await?;
    Ok(Json(SessionResponse {
        success: true,
        user,
        error: None,
    }))
}

/// The response payload for pending notifications.
#[derive(Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notice>,
}

/// Drains the pending notifications.
pub async fn notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.auth.notifier().drain(),
    })
}
