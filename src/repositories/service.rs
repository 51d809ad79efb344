use crate::models::service::Service;

fn service(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    price: f64,
    duration_minutes: u32,
    active: bool,
) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price,
        duration_minutes,
        active,
    }
}

/// Returns a fresh copy of the fixed service catalog.
pub fn all() -> Vec<Service> {
    vec![
        service(
            "1",
            "Hair Cut & Style",
            "Precision cut with wash, blow-dry and finishing style.",
            "Hair",
            65.0,
            60,
            true,
        ),
        service(
            "2",
            "Gel Manicure",
            "Cuticle care, shaping and long-wear gel polish.",
            "Nails",
            40.0,
            45,
            true,
        ),
        service(
            "3",
            "Hydrating Facial",
            "Deep cleanse, exfoliation and hydrating mask.",
            "Skin",
            85.0,
            75,
            true,
        ),
        service(
            "4",
            "Balayage Color",
            "Hand-painted highlights with toner and gloss.",
            "Hair",
            180.0,
            180,
            true,
        ),
        service(
            "5",
            "Lash Lift & Tint",
            "Semi-permanent curl and tint for natural lashes.",
            "Lashes",
            70.0,
            50,
            false,
        ),
    ]
}

/// Finds a service by its ID.
pub fn find_by_id(id: &str) -> Option<Service> {
    all().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_fixed_record() {
        let service = find_by_id("1").unwrap();
        assert_eq!(service.title, "Hair Cut & Style");
        assert!(find_by_id("999").is_none());
    }

    #[test]
    fn ids_are_unique() {
        let services = all();
        let mut ids: Vec<_> = services.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), services.len());
    }
}
