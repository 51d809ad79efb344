use axum::{extract::Path, Json};
use garde::Validate;

use crate::{
    error::{AppError, Result},
    extract::JsonBody,
    handlers::services::DeleteResponse,
    models::customer::{Customer, CustomerUpdate},
    repositories::customer as customer_repo,
};

/// Lists all customers.
pub async fn list_customers() -> Json<Vec<Customer>> {
    Json(customer_repo::all())
}

/// Gets a customer.
pub async fn get_customer(Path(customer_id): Path<String>) -> Result<Json<Customer>> {
    let customer = customer_repo::find_by_id(&customer_id).ok_or(AppError::NotFound)?;
    Ok(Json(customer))
}

/// Echoes a customer with the update applied. Nothing is stored.
#[axum::debug_handler]
pub async fn update_customer(
    Path(customer_id): Path<String>,
    JsonBody(update): JsonBody<CustomerUpdate>,
) -> Result<Json<Customer>> {
    update.validate()?;
    let customer = customer_repo::find_by_id(&customer_id).ok_or(AppError::NotFound)?;
    Ok(Json(customer.apply(update)))
}

/// Acknowledges deleting a customer. Nothing is stored.
pub async fn delete_customer(Path(customer_id): Path<String>) -> Result<Json<DeleteResponse>> {
    customer_repo::find_by_id(&customer_id).ok_or(AppError::NotFound)?;
    tracing::info!("🗑️ Customer {} deleted (mock)", customer_id);
    Ok(Json(DeleteResponse::new("Customer deleted successfully")))
}
