use std::time::Duration;
use anyhow::Context;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use http::{HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware_layer, services::guard, state::AppState};

/// The largest request body accepted, in bytes.
const MAX_BODY_BYTES: usize = 64 * 1024;

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400)))
}

/// Builds the full application router.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the `Router`.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.cors_origins)?;

    let api_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route(
            "/api/bookings/{booking_id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route("/api/customers", get(handlers::customers::list_customers))
        .route(
            "/api/customers/{customer_id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/api/merchant/profile",
            get(handlers::merchant::get_profile).put(handlers::merchant::update_profile),
        )
        .route("/api/merchant/stats", get(handlers::merchant::get_stats))
        .route("/api/services", get(handlers::services::list_services))
        .route(
            "/api/services/{service_id}",
            get(handlers::services::get_service)
                .put(handlers::services::update_service)
                .delete(handlers::services::delete_service),
        )
        .with_state(state.clone());

    let session_routes = Router::new()
        .route("/session", get(handlers::session::current))
        .route("/session/login", post(handlers::session::login))
        .route("/session/logout", post(handlers::session::logout))
        .route("/session/profile", put(handlers::session::update_profile))
        .route("/session/refresh", post(handlers::session::refresh))
        .route(
            "/session/notifications",
            get(handlers::session::notifications),
        )
        .with_state(state.clone());

    let mut view_routes = Router::new();
    for (path, _) in guard::ROUTES {
        view_routes = view_routes.route(path, get(handlers::pages::view));
    }
    let view_routes = view_routes
        .route("/admin/{*rest}", get(handlers::pages::view))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::guard::route_guard,
        ))
        .with_state(state);

    let app = Router::new()
        .merge(api_routes)
        .merge(session_routes)
        .merge(view_routes)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::default().include_headers(false))
                        .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                        .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
                )
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(cors),
        );

    Ok(app)
}
