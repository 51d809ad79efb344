use axum::Json;
use garde::Validate;

use crate::{
    error::Result,
    extract::JsonBody,
    models::merchant::{MerchantProfile, MerchantProfileUpdate, MerchantStats},
    repositories::merchant as merchant_repo,
};

/// Gets the merchant profile.
pub async fn get_profile() -> Json<MerchantProfile> {
    Json(merchant_repo::profile())
}

/// Echoes the merchant profile with the update applied. Nothing is stored.
#[axum::debug_handler]
pub async fn update_profile(
    JsonBody(update): JsonBody<MerchantProfileUpdate>,
) -> Result<Json<MerchantProfile>> {
    update.validate()?;
    Ok(Json(merchant_repo::profile().apply(update)))
}

/// Gets the dashboard statistics.
pub async fn get_stats() -> Json<MerchantStats> {
    Json(merchant_repo::stats())
}
