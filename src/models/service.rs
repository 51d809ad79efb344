use garde::Validate;
use serde::{Deserialize, Serialize};

/// A bookable service offered by the merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub duration_minutes: u32,
    pub active: bool,
}

/// The service fields a merchant may change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceUpdate {
    #[garde(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[garde(length(max = 2000))]
    pub description: Option<String>,
    #[garde(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[garde(range(min = 0.0))]
    pub price: Option<f64>,
    #[garde(range(min = 5, max = 720))]
    pub duration_minutes: Option<u32>,
    #[garde(skip)]
    pub active: Option<bool>,
}

impl Service {
    /// Returns a copy of the service with `update` applied.
    pub fn apply(mut self, update: ServiceUpdate) -> Self {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(duration_minutes) = update.duration_minutes {
            self.duration_minutes = duration_minutes;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self
    }
}
