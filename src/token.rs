use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;

use crate::models::user::User;

/// Synthesizes the opaque session token issued at login.
///
/// The token only identifies the login event. It is not signed and nothing
/// ever verifies it.
pub fn issue_token(user: &User) -> String {
    let raw = format!("{}:{}:{}", user.id, user.email, Utc::now().timestamp_millis());
    format!("bb_{}", general_purpose::URL_SAFE_NO_PAD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::credential;

    #[test]
    fn token_is_opaque_and_prefixed() {
        let user = credential::table().remove(0);
        let token = issue_token(&user);
        assert!(token.starts_with("bb_"));
        assert!(!token.contains(&user.email));

        let decoded = general_purpose::URL_SAFE_NO_PAD
            .decode(token.trim_start_matches("bb_"))
            .unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.starts_with(&format!("{}:{}:", user.id, user.email)));
    }
}
