//! JSON file key-value store.
//!
//! The whole store is one JSON object of string values. Every mutation
//! rewrites the file through a temp file and a rename, so a crash leaves
//! either the previous map or the new one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use jb_core::ports::{KeyValueStorePort, StorageError};

pub const DEFAULT_STORE_FILE: &str = "store.json";

/// `<data_dir>/jobboard/store.json`, if the platform has a data dir.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("jobboard").join(DEFAULT_STORE_FILE))
}

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    io_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self, key: &str) -> Result<Entries> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: err.to_string(),
                }
                .into())
            }
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|err| {
            StorageError::Parse {
                key: key.to_string(),
                reason: format!("{}: {err}", self.path.display()),
            }
            .into()
        })
    }

    async fn atomic_write(&self, entries: &Entries) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(entries).context("serialize store failed")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _io = self.io_lock.lock().await;
        let entries = self.load(key).await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut entries = self.load(key).await?;
        entries.insert(key.to_string(), value.to_string());
        self.atomic_write(&entries).await.map_err(|err| {
            StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:#}"),
            }
            .into()
        })
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut entries = self.load(keys.first().copied().unwrap_or_default()).await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            debug!(keys = ?keys, "remove found nothing to delete");
            return Ok(());
        }
        self.atomic_write(&entries).await.map_err(|err| {
            StorageError::Remove {
                keys: keys.iter().map(|key| key.to_string()).collect(),
                reason: format!("{err:#}"),
            }
            .into()
        })
    }
}
