use crate::config::Config;
use crate::error::Result;
use crate::services::auth::AuthContext;
use crate::storage::Storage;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The process-wide session provider.
    pub auth: AuthContext,
}

impl AppState {
    /// Creates a new `AppState`, opening the configured session storage.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let storage = Storage::connect(&config.storage).await?;
        Ok(Self::with_storage(config, storage))
    }

    /// Creates a new `AppState` over an already opened storage.
    pub fn with_storage(config: &Config, storage: Storage) -> Self {
        let auth = AuthContext::new(
            storage,
            config.login_policy.clone(),
            config.simulated_latency,
        );
        tracing::info!(
            "✅ Session provider initialized (login policy: {:?})",
            config.login_policy
        );

        AppState {
            config: config.clone(),
            auth,
        }
    }
}
