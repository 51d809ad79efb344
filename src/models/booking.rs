use garde::Validate;
use serde::{Deserialize, Serialize};

/// The lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// An appointment for one service by one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub service_id: String,
    pub service_title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local start time, `HH:MM`.
    pub time: String,
    pub status: BookingStatus,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The booking fields a merchant may change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingUpdate {
    #[garde(custom(valid_date))]
    pub date: Option<String>,
    #[garde(custom(valid_time))]
    pub time: Option<String>,
    #[garde(skip)]
    pub status: Option<BookingStatus>,
    #[garde(length(max = 1000))]
    pub notes: Option<String>,
}

fn valid_date(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(date) if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() => {
            Err(garde::Error::new("date must be YYYY-MM-DD"))
        }
        _ => Ok(()),
    }
}

fn valid_time(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(time) if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() => {
            Err(garde::Error::new("time must be HH:MM"))
        }
        _ => Ok(()),
    }
}

impl Booking {
    /// Returns a copy of the booking with `update` applied.
    pub fn apply(mut self, update: BookingUpdate) -> Self {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self
    }
}
