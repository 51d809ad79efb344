use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::sync::watch;

use crate::models::session::SessionStore;
use crate::models::user::Role;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where signed-in users without the required role are sent.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
/// Where signed-in users land when they open a guest-only page.
pub const HOME_PATH: &str = "/dashboard";

/// Characters escaped in the `redirect` query value. Path separators and
/// unreserved characters stay readable.
const RETURN_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Only visitors without a session (the login page).
    GuestOnly,
    /// Any signed-in user whose role is in the list.
    Roles(&'static [Role]),
}

const ANY_ROLE: &[Role] = &[Role::Customer, Role::Merchant, Role::Admin];
const STAFF: &[Role] = &[Role::Merchant, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// The guarded view routes.
pub const ROUTES: &[(&str, Access)] = &[
    (LOGIN_PATH, Access::GuestOnly),
    (UNAUTHORIZED_PATH, Access::Public),
    ("/dashboard", Access::Roles(ANY_ROLE)),
    ("/dashboard/bookings", Access::Roles(STAFF)),
    ("/dashboard/customers", Access::Roles(STAFF)),
    ("/dashboard/services", Access::Roles(STAFF)),
    ("/dashboard/profile", Access::Roles(STAFF)),
    ("/admin", Access::Roles(ADMIN_ONLY)),
];

/// Looks up the access rule for `path` by longest matching route prefix.
///
/// A prefix only matches on a path segment boundary. Unknown paths return `None`.
pub fn access_for(path: &str) -> Option<Access> {
    let path = path.trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };

    ROUTES
        .iter()
        .filter(|(route, _)| {
            path == *route
                || (path.starts_with(route) && path.as_bytes().get(route.len()) == Some(&b'/'))
        })
        .max_by_key(|(route, _)| route.len())
        .map(|(_, access)| *access)
}

/// The guard's view of the session for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What the guard decided for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub state: GuardState,
    /// Where to send the visitor instead of rendering, if anywhere.
    pub redirect: Option<String>,
}

impl GuardOutcome {
    fn render(state: GuardState) -> Self {
        Self {
            state,
            redirect: None,
        }
    }

    fn redirect(state: GuardState, to: String) -> Self {
        Self {
            state,
            redirect: Some(to),
        }
    }

    /// True when the view should render as requested.
    pub fn allows(&self) -> bool {
        self.state != GuardState::Loading && self.redirect.is_none()
    }
}

fn login_redirect(path: &str) -> String {
    let mut target = String::from(LOGIN_PATH);
    if path != "/" && !path.is_empty() {
        target.push_str("?redirect=");
        target.extend(utf8_percent_encode(path, RETURN_PATH));
    }
    target
}

/// Derives the guard state for a navigation to `path` under `access`.
pub fn evaluate(session: &SessionStore, access: Access, path: &str) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::render(GuardState::Loading);
    }

    let authenticated = session.is_authenticated();
    let state = if authenticated {
        GuardState::Authenticated
    } else {
        GuardState::Unauthenticated
    };

    match access {
        Access::Public => GuardOutcome::render(state),
        Access::GuestOnly if authenticated => {
            GuardOutcome::redirect(state, HOME_PATH.to_string())
        }
        Access::GuestOnly => GuardOutcome::render(state),
        Access::Roles(roles) => match session.user.as_ref() {
            Some(user) if authenticated && roles.contains(&user.role) => {
                GuardOutcome::render(GuardState::Authenticated)
            }
            Some(_) if authenticated => GuardOutcome::redirect(
                GuardState::Unauthenticated,
                UNAUTHORIZED_PATH.to_string(),
            ),
            _ => GuardOutcome::redirect(GuardState::Unauthenticated, login_redirect(path)),
        },
    }
}

/// A guard bound to one route that re-evaluates as the session changes.
pub struct RouteGuard {
    session: watch::Receiver<SessionStore>,
    path: String,
    access: Access,
}

impl RouteGuard {
    /// Watches `session` for the route at `path`.
    pub fn new(session: watch::Receiver<SessionStore>, path: impl Into<String>, access: Access) -> Self {
        Self {
            session,
            path: path.into(),
            access,
        }
    }

    /// The outcome for the current session.
    pub fn current(&self) -> GuardOutcome {
        evaluate(&self.session.borrow(), self.access, &self.path)
    }

    /// Waits for the next session change and returns the new outcome.
    ///
    /// Returns `None` once the session provider has been dropped.
    pub async fn changed(&mut self) -> Option<GuardOutcome> {
        self.session.changed().await.ok()?;
        Some(evaluate(&self.session.borrow_and_update(), self.access, &self.path))
    }

    /// Points the guard at another route, as on client-side navigation.
    pub fn navigate(&mut self, path: impl Into<String>, access: Access) -> GuardOutcome {
        self.path = path.into();
        self.access = access;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Session;
    use crate::models::user::User;

    fn signed_in(role: Role) -> SessionStore {
        SessionStore::signed_in(Session {
            user: User {
                id: "7".to_string(),
                email: "someone@example.com".to_string(),
                name: "Someone".to_string(),
                role,
                phone: None,
                avatar_url: None,
            },
            token: "tok".to_string(),
        })
    }

    #[test]
    fn route_lookup_uses_longest_segment_prefix() {
        assert_eq!(access_for("/dashboard"), Some(Access::Roles(ANY_ROLE)));
        assert_eq!(access_for("/dashboard/"), Some(Access::Roles(ANY_ROLE)));
        assert_eq!(access_for("/dashboard/bookings"), Some(Access::Roles(STAFF)));
        assert_eq!(access_for("/dashboard/bookings/3"), Some(Access::Roles(STAFF)));
        assert_eq!(access_for("/admin/users"), Some(Access::Roles(ADMIN_ONLY)));
        assert_eq!(access_for("/administrator"), None);
        assert_eq!(access_for("/login"), Some(Access::GuestOnly));
        assert_eq!(access_for("/api/services/1"), None);
    }

    #[test]
    fn loading_never_renders_or_redirects() {
        let outcome = evaluate(&SessionStore::loading(), Access::Roles(ADMIN_ONLY), "/admin");
        assert_eq!(outcome.state, GuardState::Loading);
        assert_eq!(outcome.redirect, None);
        assert!(!outcome.allows());
    }

    #[test]
    fn admin_on_admin_route_is_authenticated() {
        let outcome = evaluate(&signed_in(Role::Admin), Access::Roles(ADMIN_ONLY), "/admin");
        assert_eq!(outcome.state, GuardState::Authenticated);
        assert!(outcome.allows());
    }

    #[test]
    fn customer_on_admin_route_goes_to_unauthorized() {
        let outcome = evaluate(&signed_in(Role::Customer), Access::Roles(ADMIN_ONLY), "/admin");
        assert_eq!(outcome.state, GuardState::Unauthenticated);
        assert_eq!(outcome.redirect.as_deref(), Some(UNAUTHORIZED_PATH));
    }

    #[test]
    fn signed_out_goes_to_login_with_return_path() {
        let outcome = evaluate(
            &SessionStore::signed_out(),
            Access::Roles(STAFF),
            "/dashboard/bookings",
        );
        assert_eq!(outcome.state, GuardState::Unauthenticated);
        assert_eq!(
            outcome.redirect.as_deref(),
            Some("/login?redirect=/dashboard/bookings")
        );
    }

    #[test]
    fn return_path_is_percent_encoded() {
        assert_eq!(login_redirect("/admin/a b&c"), "/login?redirect=/admin/a%20b%26c");
        assert_eq!(login_redirect("/"), "/login");
        assert_eq!(
            login_redirect("/dashboard/profile?tab=café"),
            "/login?redirect=/dashboard/profile%3Ftab%3Dcaf%C3%A9"
        );
    }

    #[test]
    fn guest_only_and_public_routes() {
        let login = evaluate(&signed_in(Role::Merchant), Access::GuestOnly, "/login");
        assert_eq!(login.redirect.as_deref(), Some(HOME_PATH));

        let login = evaluate(&SessionStore::signed_out(), Access::GuestOnly, "/login");
        assert!(login.allows());

        let public = evaluate(&SessionStore::signed_out(), Access::Public, "/unauthorized");
        assert!(public.allows());
        assert_eq!(public.state, GuardState::Unauthenticated);
    }

    #[tokio::test]
    async fn guard_reevaluates_on_session_change() {
        let (tx, rx) = watch::channel(SessionStore::loading());
        let mut guard = RouteGuard::new(rx, "/admin", Access::Roles(ADMIN_ONLY));
        assert_eq!(guard.current().state, GuardState::Loading);

        tx.send_replace(signed_in(Role::Admin));
        let outcome = guard.changed().await.unwrap();
        assert_eq!(outcome.state, GuardState::Authenticated);

        tx.send_replace(SessionStore::signed_out());
        let outcome = guard.changed().await.unwrap();
        assert_eq!(outcome.redirect.as_deref(), Some("/login?redirect=/admin"));

        drop(tx);
        assert!(guard.changed().await.is_none());
    }

    #[tokio::test]
    async fn guard_follows_auth_context_login_and_logout() {
        use crate::config::LoginPolicy;
        use crate::repositories::credential;
        use crate::services::auth::AuthContext;
        use crate::storage::Storage;
        use std::time::Duration;

        let ctx = AuthContext::new(Storage::memory(), LoginPolicy::Demo, Duration::ZERO);
        let mut guard = RouteGuard::new(ctx.subscribe(), "/admin", Access::Roles(ADMIN_ONLY));
        assert_eq!(guard.current().state, GuardState::Loading);

        ctx.restore().await.unwrap();
        let outcome = guard.changed().await.unwrap();
        assert_eq!(outcome.state, GuardState::Unauthenticated);
        assert_eq!(outcome.redirect.as_deref(), Some("/login?redirect=/admin"));

        assert!(ctx.login(credential::ADMIN_EMAIL, "").await.unwrap());
        let outcome = guard.changed().await.unwrap();
        assert_eq!(outcome.state, GuardState::Authenticated);
        assert!(outcome.allows());

        ctx.logout().await.unwrap();
        let outcome = guard.changed().await.unwrap();
        assert_eq!(outcome.redirect.as_deref(), Some("/login?redirect=/admin"));

        drop(ctx);
        assert!(guard.changed().await.is_none());
    }

    #[test]
    fn guard_reevaluates_on_navigation() {
        let (_tx, rx) = watch::channel(signed_in(Role::Merchant));
        let mut guard = RouteGuard::new(rx, "/dashboard", Access::Roles(ANY_ROLE));
        assert!(guard.current().allows());

        let outcome = guard.navigate("/admin", Access::Roles(ADMIN_ONLY));
        assert_eq!(outcome.redirect.as_deref(), Some(UNAUTHORIZED_PATH));
    }
}
