use crate::models::booking::BookingStatus;
use crate::models::merchant::{MerchantProfile, MerchantStats};
use crate::repositories::{booking, customer, service};

/// Returns a fresh copy of the fixed merchant profile.
pub fn profile() -> MerchantProfile {
    MerchantProfile {
        id: "m-1".to_string(),
        business_name: "Glow Beauty Studio".to_string(),
        owner_name: "Jessica Miller".to_string(),
        email: "hello@glowbeauty.example".to_string(),
        phone: "+1 555 0199".to_string(),
        address: "221 Market Street, San Francisco, CA".to_string(),
        description: "Full-service salon for hair, nails and skin care.".to_string(),
        opening_hours: "Tue-Sat 09:00-19:00".to_string(),
        rating: 4.8,
        review_count: 127,
    }
}

/// Derives the dashboard statistics from the fixed records.
pub fn stats() -> MerchantStats {
    let bookings = booking::all();
    let count = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();

    MerchantStats {
        total_bookings: bookings.len(),
        pending_bookings: count(BookingStatus::Pending),
        completed_bookings: count(BookingStatus::Completed),
        cancelled_bookings: count(BookingStatus::Cancelled),
        total_revenue: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.price)
            .sum(),
        total_customers: customer::all().len(),
        active_services: service::all().iter().filter(|s| s.active).count(),
    }
}
