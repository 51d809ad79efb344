use garde::Validate;
use serde::{Deserialize, Serialize};

/// The merchant's public business profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantProfile {
    pub id: String,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub opening_hours: String,
    pub rating: f64,
    pub review_count: u32,
}

/// The profile fields a merchant may change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MerchantProfileUpdate {
    #[garde(length(min = 1, max = 200))]
    pub business_name: Option<String>,
    #[garde(length(min = 1, max = 120))]
    pub owner_name: Option<String>,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(length(max = 32))]
    pub phone: Option<String>,
    #[garde(length(max = 500))]
    pub address: Option<String>,
    #[garde(length(max = 2000))]
    pub description: Option<String>,
    #[garde(length(max = 200))]
    pub opening_hours: Option<String>,
}

impl MerchantProfile {
    /// Returns a copy of the profile with `update` applied.
    pub fn apply(mut self, update: MerchantProfileUpdate) -> Self {
        if let Some(business_name) = update.business_name {
            self.business_name = business_name;
        }
        if let Some(owner_name) = update.owner_name {
            self.owner_name = owner_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(opening_hours) = update.opening_hours {
            self.opening_hours = opening_hours;
        }
        self
    }
}

/// Headline numbers for the merchant dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub completed_bookings: usize,
    pub cancelled_bookings: usize,
    pub total_revenue: f64,
    pub total_customers: usize,
    pub active_services: usize,
}
