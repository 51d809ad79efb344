use crate::models::user::{Role, User};

/// The only account in the compiled-in credential table.
pub const ADMIN_EMAIL: &str = "admin@beautybook.app";

/// Returns the compiled-in credential table. It has no write path.
pub fn table() -> Vec<User> {
    vec![User {
        id: "1".to_string(),
        email: ADMIN_EMAIL.to_string(),
        name: "Admin User".to_string(),
        role: Role::Admin,
        phone: None,
        avatar_url: None,
    }]
}

/// Finds a user by email. Matching ignores ASCII case and surrounding spaces.
pub fn find_by_email(email: &str) -> Option<User> {
    let email = email.trim();
    table()
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(find_by_email(ADMIN_EMAIL).unwrap().role, Role::Admin);
        assert!(find_by_email(" Admin@BeautyBook.app ").is_some());
        assert!(find_by_email("nobody@example.com").is_none());
    }
}
