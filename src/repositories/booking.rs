use crate::models::booking::{Booking, BookingStatus};

#[allow(clippy::too_many_arguments)]
fn booking(
    id: &str,
    customer: (&str, &str),
    service: (&str, &str),
    date: &str,
    time: &str,
    status: BookingStatus,
    price: f64,
    notes: Option<&str>,
) -> Booking {
    Booking {
        id: id.to_string(),
        customer_id: customer.0.to_string(),
        customer_name: customer.1.to_string(),
        service_id: service.0.to_string(),
        service_title: service.1.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        status,
        price,
        notes: notes.map(str::to_string),
    }
}

/// Returns a fresh copy of the fixed booking list.
pub fn all() -> Vec<Booking> {
    vec![
        booking(
            "1",
            ("1", "Sarah Johnson"),
            ("1", "Hair Cut & Style"),
            "2024-06-15",
            "10:00",
            BookingStatus::Confirmed,
            65.0,
            Some("Prefers a layered cut"),
        ),
        booking(
            "2",
            ("2", "Emily Chen"),
            ("2", "Gel Manicure"),
            "2024-06-15",
            "13:30",
            BookingStatus::Pending,
            40.0,
            None,
        ),
        booking(
            "3",
            ("3", "Maria Garcia"),
            ("4", "Balayage Color"),
            "2024-06-12",
            "09:00",
            BookingStatus::Completed,
            180.0,
            None,
        ),
        booking(
            "4",
            ("1", "Sarah Johnson"),
            ("3", "Hydrating Facial"),
            "2024-06-10",
            "15:00",
            BookingStatus::Completed,
            85.0,
            Some("Sensitive skin"),
        ),
        booking(
            "5",
            ("4", "Olivia Brown"),
            ("1", "Hair Cut & Style"),
            "2024-06-09",
            "11:00",
            BookingStatus::Cancelled,
            65.0,
            None,
        ),
    ]
}

/// Finds a booking by its ID.
pub fn find_by_id(id: &str) -> Option<Booking> {
    all().into_iter().find(|b| b.id == id)
}

/// Lists bookings, optionally only those in `status`.
pub fn list(status: Option<BookingStatus>) -> Vec<Booking> {
    all()
        .into_iter()
        .filter(|b| status.is_none_or(|s| b.status == s))
        .collect()
}
