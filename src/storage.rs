use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use redis::{AsyncCommands, aio::ConnectionManager};
use tokio::sync::Mutex;

use crate::config::StorageBackend;
use crate::error::Result;

/// Storage key holding the opaque session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "user";

/// A JSON key-value file, rewritten whole on every mutation.
#[derive(Clone)]
pub struct FileStore {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file is created lazily.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read(self.path.as_path()).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(HashMap::new()),
            Ok(bytes) => Ok(sonic_rs::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = sonic_rs::to_string(map)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, self.path.as_path()).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// Persistent key-value storage for the session.
#[derive(Clone)]
pub enum Storage {
    /// In-process map.
    Memory(Arc<Mutex<HashMap<String, String>>>),
    /// Redis connection manager.
    Redis(ConnectionManager),
    /// JSON file on disk.
    File(FileStore),
}

impl Storage {
    /// Creates an empty in-memory storage.
    pub fn memory() -> Self {
        Storage::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Opens the configured storage backend.
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend selected in the configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Storage`.
    pub async fn connect(backend: &StorageBackend) -> Result<Self> {
        match backend {
            StorageBackend::Memory => {
                tracing::info!("✅ Session storage: in-memory");
                Ok(Self::memory())
            }
            StorageBackend::Redis(url) => {
                let client = redis::Client::open(url.as_str())?;
                let manager = ConnectionManager::new(client).await?;
                tracing::info!("✅ Session storage: Redis connection manager initialized");
                Ok(Storage::Redis(manager))
            }
            StorageBackend::File(path) => {
                tracing::info!("✅ Session storage: file {}", path);
                Ok(Storage::File(FileStore::new(path)))
            }
        }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Storage::Memory(map) => Ok(map.lock().await.get(key).cloned()),
            Storage::Redis(manager) => {
                let mut conn = manager.clone();
                Ok(conn.get::<_, Option<String>>(key).await?)
            }
            Storage::File(file) => file.get(key).await,
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Storage::Memory(map) => {
                map.lock().await.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Storage::Redis(manager) => {
                let mut conn = manager.clone();
                let _: () = conn.set(key, value).await?;
                Ok(())
            }
            Storage::File(file) => file.set(key, value).await,
        }
    }

    /// Stores every entry in one operation. Either all of them are written or
    /// none are.
    pub async fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        match self {
            Storage::Memory(map) => {
                let mut map = map.lock().await;
                for (key, value) in entries {
                    map.insert(key.to_string(), value.to_string());
                }
                Ok(())
            }
            Storage::Redis(manager) => {
                let mut conn = manager.clone();
                let _: () = conn.mset(entries).await?;
                Ok(())
            }
            Storage::File(file) => file.set_all(entries).await,
        }
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<()> {
        match self {
            Storage::Memory(map) => {
                map.lock().await.remove(key);
                Ok(())
            }
            Storage::Redis(manager) => {
                let mut conn = manager.clone();
                let _: () = conn.del(key).await?;
                Ok(())
            }
            Storage::File(file) => file.remove(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    fn temp_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!(
                "beautybook-storage-{}-{}",
                std::process::id(),
                NEXT_DIR.fetch_add(1, Ordering::Relaxed)
            ))
            .join("session.json")
    }

    #[tokio::test]
    async fn memory_set_get_remove() {
        let storage = Storage::memory();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).await.unwrap(), None);

        storage.set(AUTH_TOKEN_KEY, "abc").await.unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        storage.remove(AUTH_TOKEN_KEY).await.unwrap();
        storage.remove(AUTH_TOKEN_KEY).await.unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let path = temp_file();
        let storage = Storage::File(FileStore::new(&path));
        storage.set(AUTH_TOKEN_KEY, "token-1").await.unwrap();
        storage.set(USER_KEY, r#"{"id":"u1"}"#).await.unwrap();

        let reopened = Storage::File(FileStore::new(&path));
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("token-1"));
        assert_eq!(reopened.get(USER_KEY).await.unwrap().as_deref(), Some(r#"{"id":"u1"}"#));

        reopened.remove(USER_KEY).await.unwrap();
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
        assert_eq!(storage.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("token-1"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_empty() {
        let storage = Storage::File(FileStore::new(temp_file()));
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
        storage.remove(USER_KEY).await.unwrap();
    }

    #[tokio::test]
    async fn file_store_set_all_writes_every_key() {
        let path = temp_file();
        let storage = Storage::File(FileStore::new(&path));
        storage.set(USER_KEY, "old").await.unwrap();
        storage
            .set_all(&[(AUTH_TOKEN_KEY, "token-2"), (USER_KEY, "new")])
            .await
            .unwrap();

        let reopened = Storage::File(FileStore::new(&path));
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("token-2"));
        assert_eq!(reopened.get(USER_KEY).await.unwrap().as_deref(), Some("new"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn file_store_corrupt_file_is_an_error() {
        let path = temp_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let storage = Storage::File(FileStore::new(&path));
        assert!(storage.get(USER_KEY).await.is_err());
        assert!(
            storage
                .set_all(&[(AUTH_TOKEN_KEY, "t"), (USER_KEY, "u")])
                .await
                .is_err()
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
