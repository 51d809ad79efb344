use garde::Validate;
use serde::{Deserialize, Serialize};

/// A customer who has booked with the merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_bookings: u32,
    pub total_spent: f64,
    pub last_visit: String,
}

/// The customer fields a merchant may change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerUpdate {
    #[garde(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(length(max = 32))]
    pub phone: Option<String>,
}

impl Customer {
    /// Returns a copy of the customer with `update` applied.
    pub fn apply(mut self, update: CustomerUpdate) -> Self {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        self
    }
}
