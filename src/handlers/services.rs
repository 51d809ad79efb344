use axum::{extract::Path, Json};
use garde::Validate;
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    extract::JsonBody,
    models::service::{Service, ServiceUpdate},
    repositories::service as service_repo,
};

/// The response payload for deletions.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Lists all services.
pub async fn list_services() -> Json<Vec<Service>> {
    Json(service_repo::all())
}

/// Gets a service.
pub async fn get_service(Path(service_id): Path<String>) -> Result<Json<Service>> {
    let service = service_repo::find_by_id(&service_id).ok_or(AppError::NotFound)?;
    Ok(Json(service))
}

/// Echoes a service with the update applied. Nothing is stored.
#[axum::debug_handler]
pub async fn update_service(
    Path(service_id): Path<String>,
    JsonBody(update): JsonBody<ServiceUpdate>,
) -> Result<Json<Service>> {
    update.validate()?;
    let service = service_repo::find_by_id(&service_id).ok_or(AppError::NotFound)?;
    Ok(Json(service.apply(update)))
}

/// Acknowledges deleting a service. Nothing is stored.
pub async fn delete_service(Path(service_id): Path<String>) -> Result<Json<DeleteResponse>> {
    service_repo::find_by_id(&service_id).ok_or(AppError::NotFound)?;
    tracing::info!("🗑️ Service {} deleted (mock)", service_id);
    Ok(Json(DeleteResponse::new("Service deleted successfully")))
}
