use std::sync::Arc;
use std::time::Duration;
use garde::Validate;
use subtle::ConstantTimeEq;
use tokio::sync::{Mutex, watch};

use crate::config::LoginPolicy;
use crate::error::{AppError, Result};
use crate::models::session::{Session, SessionStore};
use crate::models::user::{ProfileUpdate, Role, User};
use crate::repositories::credential;
use crate::services::notifications::Notifier;
use crate::storage::{AUTH_TOKEN_KEY, Storage, USER_KEY};
use crate::token::issue_token;

/// Checks a credential pair against the configured login policy.
///
/// # Arguments
///
/// * `policy` - The login policy.
/// * `email` - The submitted email.
/// * `password` - The submitted password.
///
/// # Returns
///
/// The matching user record, or `None` on mismatch.
pub fn verify_credentials(policy: &LoginPolicy, email: &str, password: &str) -> Option<User> {
    match policy {
        LoginPolicy::Demo => credential::find_by_email(email),
        LoginPolicy::Static {
            email: expected_email,
            password: expected_password,
        } => {
            let email_ok = email.trim().eq_ignore_ascii_case(expected_email.trim());
            let password_ok: bool = password
                .as_bytes()
                .ct_eq(expected_password.as_bytes())
                .into();
            if !(email_ok && password_ok) {
                return None;
            }

            Some(credential::find_by_email(email).unwrap_or_else(|| User {
                id: "admin".to_string(),
                email: expected_email.trim().to_string(),
                name: "Administrator".to_string(),
                role: Role::Admin,
                phone: None,
                avatar_url: None,
            }))
        }
    }
}

/// Reads the persisted session. Returns `None` unless both keys are present
/// and the user record parses.
async fn read_stored_session(storage: &Storage) -> Result<Option<Session>> {
    let token = storage.get(AUTH_TOKEN_KEY).await?;
    let user_json = storage.get(USER_KEY).await?;

    let (Some(token), Some(user_json)) = (token, user_json) else {
        tracing::debug!("Stored session incomplete");
        return Ok(None);
    };

    if token.is_empty() {
        return Ok(None);
    }

    match sonic_rs::from_str::<User>(&user_json) {
        Ok(user) => Ok(Some(Session { user, token })),
        Err(e) => {
            tracing::warn!("❌ Stored user record is invalid: {}", e);
            Ok(None)
        }
    }
}

/// Writes both session keys in one storage operation, so a failure never
/// leaves a token paired with another user's record.
async fn persist_session(storage: &Storage, session: &Session) -> Result<()> {
    let user_json = sonic_rs::to_string(&session.user)?;
    storage
        .set_all(&[(AUTH_TOKEN_KEY, session.token.as_str()), (USER_KEY, user_json.as_str())])
        .await
}

/// Removes both session keys. Both removals are attempted even if the first fails.
async fn clear_stored_session(storage: &Storage) -> Result<()> {
    let token_result = storage.remove(AUTH_TOKEN_KEY).await;
    let user_result = storage.remove(USER_KEY).await;
    token_result.and(user_result)
}

/// The process-wide session provider.
///
/// Holds the in-memory [`SessionStore`], the storage it is persisted to and the
/// notice queue. Cloning yields another handle to the same session.
///
/// Every operation that writes storage or publishes a new state holds
/// `op_lock` for its whole read-persist-publish sequence.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<watch::Sender<SessionStore>>,
    op_lock: Arc<Mutex<()>>,
    storage: Storage,
    policy: LoginPolicy,
    latency: Duration,
    notifier: Notifier,
}

impl AuthContext {
    /// Creates a provider in the loading state. Call [`AuthContext::restore`] to settle it.
    pub fn new(storage: Storage, policy: LoginPolicy, latency: Duration) -> Self {
        let (store, _) = watch::channel(SessionStore::loading());
        Self {
            store: Arc::new(store),
            op_lock: Arc::new(Mutex::new(())),
            storage,
            policy,
            latency,
            notifier: Notifier::new(),
        }
    }

    /// Returns a copy of the current session state.
    pub fn snapshot(&self) -> SessionStore {
        self.store.borrow().clone()
    }

    /// Returns a receiver that observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionStore> {
        self.store.subscribe()
    }

    /// The notice queue fed by gateway operations.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn publish(&self, state: SessionStore) {
        self.store.send_replace(state);
    }

    /// Restores the session from storage. Runs once at startup.
    ///
    /// An incomplete or unreadable stored session is destroyed. The store always
    /// leaves the loading state, even when storage fails.
    pub async fn restore(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;
        tracing::debug!("🔐 Restoring session from storage...");

        let stored = match read_stored_session(&self.storage).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("❌ Session restore failed: {}", e);
                self.publish(SessionStore::signed_out());
                self.notifier.error("Could not restore your session");
                return Err(e);
            }
        };

        match stored {
            Some(session) => {
                tracing::info!(
                    "✅ Session restored for user: {} ({})",
                    session.user.id,
                    session.user.role
                );
                self.publish(SessionStore::signed_in(session));
                Ok(())
            }
            None => {
                self.publish(SessionStore::signed_out());
                clear_stored_session(&self.storage).await?;
                tracing::info!("No stored session");
                Ok(())
            }
        }
    }

    /// Runs [`AuthContext::restore`] in the background.
    pub fn spawn_restore(&self) -> tokio::task::JoinHandle<()> {
        let ctx = self.clone();
        tokio::spawn(async move {
            if let Err(e) = ctx.restore().await {
                tracing::error!("❌ Startup session restore failed: {}", e);
            }
        })
    }

    /// Signs in with an email/password pair.
    ///
    /// # Returns
    ///
    /// `Ok(true)` on success, `Ok(false)` when the credentials do not match.
    /// A mismatch leaves any existing session as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        tracing::info!("🔐 Login attempt: {}", email);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let Some(user) = verify_credentials(&self.policy, email, password) else {
            tracing::warn!("❌ Invalid credentials for: {}", email);
            self.notifier.error("Invalid email or password");
            return Ok(false);
        };

        let _op = self.op_lock.lock().await;

        let session = Session {
            token: issue_token(&user),
            user,
        };

        if let Err(e) = persist_session(&self.storage, &session).await {
            tracing::error!("❌ Failed to persist session: {}", e);
            self.notifier.error("Login failed, please try again");
            return Err(e);
        }

        tracing::info!("✅ User logged in: {}", session.user.id);
        self.notifier
            .success(format!("Welcome back, {}!", session.user.name));
        self.publish(SessionStore::signed_in(session));

        Ok(true)
    }

    /// Signs out. The in-memory session is always torn down and both storage
    /// keys are always removed.
    pub async fn logout(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let previous = self.snapshot();
        self.publish(SessionStore::signed_out());

        let result = clear_stored_session(&self.storage).await;
        match &result {
            Ok(()) => {
                match previous.user {
                    Some(user) => tracing::info!("👋 User logged out: {}", user.id),
                    None => tracing::debug!("Logout without an active session"),
                }
                self.notifier.info("You have been signed out");
            }
            Err(e) => {
                tracing::error!("❌ Failed to clear stored session: {}", e);
                self.notifier.error("Sign out could not clear saved data");
            }
        }

        result
    }

    /// Merges `update` into the signed-in user and persists it.
    ///
    /// # Returns
    ///
    /// The updated user, or [`AppError::NoSession`] when nobody is signed in.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let _op = self.op_lock.lock().await;
        let Some(session) = self.snapshot().session() else {
            tracing::warn!("❌ Profile update without a session");
            self.notifier.error("No user session");
            return Err(AppError::NoSession);
        };

        if let Err(report) = update.validate() {
            let err = AppError::from(report);
            self.notifier.error(err.user_message());
            return Err(err);
        }

        let session = Session {
            user: session.user.apply(update),
            token: session.token,
        };

        if let Err(e) = persist_session(&self.storage, &session).await {
            tracing::error!("❌ Failed to persist profile: {}", e);
            self.notifier.error("Failed to update profile");
            return Err(e);
        }

        tracing::info!("✅ Profile updated for user: {}", session.user.id);
        self.notifier.success("Profile updated successfully");

        let user = session.user.clone();
        self.publish(SessionStore::signed_in(session));
        Ok(user)
    }

    /// Re-reads the persisted session into memory.
    ///
    /// # Returns
    ///
    /// The stored user, or `None` when storage no longer holds a valid session.
    pub async fn refresh_profile(&self) -> Result<Option<User>> {
        let _op = self.op_lock.lock().await;
        let stored = match read_stored_session(&self.storage).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("❌ Failed to refresh profile: {}", e);
                self.notifier.error("Failed to refresh profile");
                return Err(e);
            }
        };

        match stored {
            Some(session) => {
                let user = session.user.clone();
                tracing::debug!("Profile refreshed for user: {}", user.id);
                self.publish(SessionStore::signed_in(session));
                Ok(Some(user))
            }
            None => {
                tracing::debug!("Refresh found no stored session");
                self.publish(SessionStore::signed_out());
                Ok(None)
            }
        }
    }
}
