use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

/// A bearer token with the instant the storage mechanism forgets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool { now < self.expires_at }
}

/// Storage for the single authoritative session token.
///
/// Implementations enforce expiry themselves: `load` never returns an entry
/// whose `expires_at` has passed, and drops such entries.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self, now: DateTime<Utc>) -> Option<StoredToken>;
    async fn save(&self, token: StoredToken);
    async fn clear(&self);
}

/// Page-lifetime store: the token lives as long as the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<StoredToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, now: DateTime<Utc>) -> Option<StoredToken> {
        {
            let slot = self.slot.read().await;
            match slot.as_ref() {
                None => return None,
                Some(t) if t.is_live(now) => return Some(t.clone()),
                Some(_) => {}
            }
        }
        // a save may have landed between the two locks
        let mut slot = self.slot.write().await;
        match slot.as_ref() {
            Some(t) if t.is_live(now) => Some(t.clone()),
            Some(_) => {
                debug!("expired token dropped from memory store");
                slot.take();
                None
            }
            None => None,
        }
    }

    async fn save(&self, token: StoredToken) {
        *self.slot.write().await = Some(token);
    }

    async fn clear(&self) {
        self.slot.write().await.take();
    }
}

/// JSON-file-backed store, so a "remember me" session survives restarts.
///
/// The file holds one `StoredToken` document; an absent or unreadable file
/// means no session. I/O failures are logged and never surfaced.
pub struct FileTokenStore {
    inner: RwLock<Option<StoredToken>>,
    file_path: PathBuf,
}

impl FileTokenStore {
    /// Initialize the store from a path, loading any token already on disk.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        if let Err(e) = common::env::ensure_parent_dir(&file_path).await {
            warn!(error = %e, "token store directory unavailable");
        }
        let current = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice::<StoredToken>(&bytes).ok(),
            Err(_) => None,
        };
        Self { inner: RwLock::new(current), file_path }
    }

    pub fn path(&self) -> &std::path::Path { &self.file_path }

    async fn persist(&self, token: Option<&StoredToken>) {
        let result = match token {
            Some(t) => match serde_json::to_vec(t) {
                Ok(data) => fs::write(&self.file_path, data).await,
                Err(e) => {
                    warn!(error = %e, "cannot encode session token");
                    return;
                }
            },
            None => match fs::remove_file(&self.file_path).await {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!(path = %self.file_path.display(), error = %e, "session file update failed");
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, now: DateTime<Utc>) -> Option<StoredToken> {
        {
            let current = self.inner.read().await;
            match current.as_ref() {
                None => return None,
                Some(t) if t.is_live(now) => return Some(t.clone()),
                Some(_) => {}
            }
        }
        let mut current = self.inner.write().await;
        match current.as_ref() {
            Some(t) if t.is_live(now) => Some(t.clone()),
            Some(_) => {
                debug!(path = %self.file_path.display(), "expired token purged from file store");
                current.take();
                self.persist(None).await;
                None
            }
            None => None,
        }
    }

    async fn save(&self, token: StoredToken) {
        let mut current = self.inner.write().await;
        *current = Some(token);
        self.persist(current.as_ref()).await;
    }

    async fn clear(&self) {
        let mut current = self.inner.write().await;
        if current.take().is_some() {
            self.persist(None).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(value: &str, expires_at: DateTime<Utc>) -> StoredToken {
        StoredToken { token: value.into(), expires_at }
    }

    #[tokio::test]
    async fn memory_store_forgets_expired_token() {
        let now = Utc::now();
        let store = MemoryTokenStore::new();
        store.save(token("abc", now + Duration::minutes(1))).await;
        assert_eq!(store.load(now).await.map(|t| t.token), Some("abc".into()));
        assert!(store.load(now + Duration::minutes(2)).await.is_none());
        // purged, not merely hidden
        assert!(store.load(now).await.is_none());
    }

    #[tokio::test]
    async fn memory_store_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear().await;
        store.save(token("abc", Utc::now() + Duration::hours(1))).await;
        store.clear().await;
        store.clear().await;
        assert!(store.load(Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("venue_session_{}.json", uuid::Uuid::new_v4()));
        let now = Utc::now();

        let store = FileTokenStore::new(&tmp).await;
        assert!(store.load(now).await.is_none());
        store.save(token("persisted", now + Duration::days(30))).await;

        let reloaded = FileTokenStore::new(&tmp).await;
        assert_eq!(reloaded.load(now).await.map(|t| t.token), Some("persisted".into()));

        reloaded.clear().await;
        assert!(fs::metadata(&tmp).await.is_err());
        let again = FileTokenStore::new(&tmp).await;
        assert!(again.load(now).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn file_store_purges_expired_file() {
        let tmp = std::env::temp_dir().join(format!("venue_session_{}.json", uuid::Uuid::new_v4()));
        let now = Utc::now();
        let store = FileTokenStore::new(&tmp).await;
        store.save(token("old", now - Duration::seconds(1))).await;
        assert!(store.load(now).await.is_none());
        assert!(fs::metadata(&tmp).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn expiry_purge_never_drops_a_concurrent_save() {
        let now = Utc::now();
        for _ in 0..500 {
            let store = std::sync::Arc::new(MemoryTokenStore::new());
            store.save(token("stale", now - Duration::seconds(1))).await;

            let reader = {
                let store = store.clone();
                tokio::spawn(async move { store.load(now).await })
            };
            let writer = {
                let store = store.clone();
                tokio::spawn(async move {
                    store.save(token("fresh", now + Duration::minutes(30))).await
                })
            };
            let seen = reader.await.unwrap();
            writer.await.unwrap();

            assert!(seen.is_none() || seen.as_ref().map(|t| t.token.as_str()) == Some("fresh"));
            assert_eq!(store.load(now).await.map(|t| t.token), Some("fresh".into()));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn file_store_purge_keeps_concurrent_save() {
        let tmp = std::env::temp_dir().join(format!("venue_session_{}.json", uuid::Uuid::new_v4()));
        let now = Utc::now();
        let store = std::sync::Arc::new(FileTokenStore::new(&tmp).await);
        for _ in 0..100 {
            store.save(token("stale", now - Duration::seconds(1))).await;
            let reader = {
                let store = store.clone();
                tokio::spawn(async move { store.load(now).await })
            };
            let writer = {
                let store = store.clone();
                tokio::spawn(async move {
                    store.save(token("fresh", now + Duration::days(30))).await
                })
            };
            reader.await.unwrap();
            writer.await.unwrap();
            assert_eq!(store.load(now).await.map(|t| t.token), Some("fresh".into()));
        }
        let reloaded = FileTokenStore::new(&tmp).await;
        assert_eq!(reloaded.load(now).await.map(|t| t.token), Some("fresh".into()));
        let _ = fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn corrupt_file_means_no_session() {
        let tmp = std::env::temp_dir().join(format!("venue_session_{}.json", uuid::Uuid::new_v4()));
        fs::write(&tmp, b"not json").await.unwrap();
        let store = FileTokenStore::new(&tmp).await;
        assert!(store.load(Utc::now()).await.is_none());
        let _ = fs::remove_file(&tmp).await;
    }
}
