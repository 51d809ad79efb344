use crate::models::customer::Customer;

fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    total_bookings: u32,
    total_spent: f64,
    last_visit: &str,
) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        total_bookings,
        total_spent,
        last_visit: last_visit.to_string(),
    }
}

/// Returns a fresh copy of the fixed customer list.
pub fn all() -> Vec<Customer> {
    vec![
        customer("1", "Sarah Johnson", "sarah.johnson@example.com", "+1 555 0101", 12, 845.0, "2024-06-10"),
        customer("2", "Emily Chen", "emily.chen@example.com", "+1 555 0102", 5, 320.0, "2024-06-12"),
        customer("3", "Maria Garcia", "maria.garcia@example.com", "+1 555 0103", 8, 1240.0, "2024-06-08"),
        customer("4", "Olivia Brown", "olivia.brown@example.com", "+1 555 0104", 2, 110.0, "2024-05-28"),
    ]
}

/// Finds a customer by their ID.
pub fn find_by_id(id: &str) -> Option<Customer> {
    all().into_iter().find(|c| c.id == id)
}
