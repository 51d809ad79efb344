use axum::{
    extract::Path,
    Json,
};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    extract::{JsonBody, QueryParams},
    handlers::services::DeleteResponse,
    models::booking::{Booking, BookingStatus, BookingUpdate},
    repositories::booking as booking_repo,
};

/// The query parameters for listing bookings.
#[derive(Deserialize)]
pub struct ListBookingsQuery {
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

/// Lists bookings, optionally filtered by status.
pub async fn list_bookings(
    QueryParams(query): QueryParams<ListBookingsQuery>,
) -> Json<Vec<Booking>> {
    Json(booking_repo::list(query.status))
}

/// Gets a booking.
pub async fn get_booking(Path(booking_id): Path<String>) -> Result<Json<Booking>> {
    let booking = booking_repo::find_by_id(&booking_id).ok_or(AppError::NotFound)?;
    Ok(Json(booking))
}

/// Echoes a booking with the update applied. Nothing is stored.
#[axum::debug_handler]
pub async fn update_booking(
    Path(booking_id): Path<String>,
    JsonBody(update): JsonBody<BookingUpdate>,
) -> Result<Json<Booking>> {
    update.validate()?;
    let booking = booking_repo::find_by_id(&booking_id).ok_or(AppError::NotFound)?;
    Ok(Json(booking.apply(update)))
}

/// Acknowledges deleting a booking. Nothing is stored.
pub async fn delete_booking(Path(booking_id): Path<String>) -> Result<Json<DeleteResponse>> {
    booking_repo::find_by_id(&booking_id).ok_or(AppError::NotFound)?;
    tracing::info!("🗑️ Booking {} deleted (mock)", booking_id);
    Ok(Json(DeleteResponse::new("Booking deleted successfully")))
}
