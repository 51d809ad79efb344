use axum::{http::Uri, Extension, Json};
use serde::Serialize;

use crate::models::{session::SessionStore, user::User};

/// Describes the view the dashboard should render.
#[derive(Serialize)]
pub struct ViewResponse {
    pub view: String,
    pub title: &'static str,
    pub user: Option<User>,
}

fn title_for(path: &str) -> &'static str {
    match path.trim_end_matches('/') {
        "/login" => "Sign in",
        "/unauthorized" => "Access denied",
        "/dashboard" => "Overview",
        "/dashboard/bookings" => "Bookings",
        "/dashboard/customers" => "Customers",
        "/dashboard/services" => "Services",
        "/dashboard/profile" => "Business profile",
        p if p == "/admin" || p.starts_with("/admin/") => "Administration",
        _ => "Dashboard",
    }
}

/// Serves a guarded view. The route guard has already run.
pub async fn view(uri: Uri, Extension(session): Extension<SessionStore>) -> Json<ViewResponse> {
    let path = uri.path();
    Json(ViewResponse {
        view: path.to_string(),
        title: title_for(path),
        user: session.user,
    })
}
