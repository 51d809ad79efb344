use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    services::guard::{GuardState, access_for, evaluate},
    state::AppState,
};

/// A middleware that gates view routes on the current session.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The view, a redirect, or 503 while the session is still being restored.
pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(access) = access_for(&path) else {
        return next.run(request).await;
    };

    let session = state.auth.snapshot();
    let outcome = evaluate(&session, access, &path);

    if outcome.state == GuardState::Loading {
        tracing::debug!("⏳ Session still loading, deferring {}", path);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            [
                (header::RETRY_AFTER, "1"),
                (header::CONTENT_TYPE, "application/json"),
            ],
            r#"{"success":false,"error":"Session is loading"}"#,
        )
            .into_response();
    }

    if let Some(target) = outcome.redirect {
        tracing::warn!("❌ Guard redirect: {} -> {}", path, target);
        return Redirect::to(&target).into_response();
    }

    tracing::debug!("✅ Guard allowed: {}", path);
    request.extensions_mut().insert(session);

    next.run(request).await
}
