use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use configs::{SessionConfig, TokenStoreKind};
use tracing::{debug, info};

use super::store::{FileTokenStore, MemoryTokenStore, StoredToken, TokenStore};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

fn default_remember() -> Duration { Duration::days(30) }
fn default_session() -> Duration { Duration::minutes(30) }

/// Holds the current session credential and hands it to the HTTP client.
///
/// None of the operations fail: they are storage operations, and a store
/// that cannot be read behaves as if no token were present.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    clock: Clock,
    remember_for: Duration,
    session_for: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            clock: Arc::new(Utc::now),
            remember_for: default_remember(),
            session_for: default_session(),
        }
    }

    /// Session held in memory only.
    pub fn in_memory() -> Self { Self::new(Arc::new(MemoryTokenStore::new())) }

    pub async fn from_config(cfg: &SessionConfig) -> Self {
        let store: Arc<dyn TokenStore> = match cfg.store {
            TokenStoreKind::Memory => Arc::new(MemoryTokenStore::new()),
            TokenStoreKind::File => Arc::new(FileTokenStore::new(cfg.store_path.clone()).await),
        };
        Self::new(store).with_retention(to_chrono(cfg.remember_for()), to_chrono(cfg.session_for()))
    }

    pub fn with_retention(mut self, remember_for: Duration, session_for: Duration) -> Self {
        self.remember_for = remember_for;
        self.session_for = session_for;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Store `token` as the current credential, replacing any previous one.
    /// `persist` selects the long "remember me" retention.
    ///
    /// # Examples
    /// ```
    /// use service::SessionManager;
    /// let session = SessionManager::in_memory();
    /// tokio_test::block_on(session.set_token("abc123", false));
    /// assert_eq!(tokio_test::block_on(session.get_token()).as_deref(), Some("abc123"));
    /// tokio_test::block_on(session.remove_token());
    /// assert!(!tokio_test::block_on(session.is_authenticated()));
    /// ```
    pub async fn set_token(&self, token: &str, persist: bool) {
        let ttl = if persist { self.remember_for } else { self.session_for };
        let expires_at = (self.clock)() + ttl;
        self.store.save(StoredToken { token: token.to_string(), expires_at }).await;
        info!(persist, %expires_at, "session token stored");
    }

    pub async fn get_token(&self) -> Option<String> {
        self.store.load((self.clock)()).await.map(|t| t.token)
    }

    /// Drop the stored token; a no-op when none is present.
    pub async fn remove_token(&self) {
        self.store.clear().await;
        debug!("session token removed");
    }

    pub async fn is_authenticated(&self) -> bool { self.get_token().await.is_some() }
}

fn to_chrono(d: std::time::Duration) -> Duration {
    Duration::from_std(d).unwrap_or_else(|_| default_session())
}
