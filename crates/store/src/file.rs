//! One-file-per-id challenge stores
//!
//! Each challenge is a single JSON file `<id>.json` holding the payload and
//! a wall-clock expiry, so records survive process restarts. Writes go to a
//! temp file first and are renamed into place, keeping readers from ever
//! seeing a half-written record. Corrupt files are deleted on read.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::{AsyncCaptchaStore, CaptchaStore};
use crate::error::{StoreError, StoreResult};

/// Probability that a write triggers a sweep of expired files.
const CLEANUP_PROBABILITY: f64 = 0.05;

#[derive(Debug, Serialize, Deserialize)]
struct StoredChallenge {
    expires_at: DateTime<Utc>,
    challenge_data: Value,
}

fn validate_id(id: &str) -> StoreResult<()> {
    if !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(StoreError::Backend(format!(
            "invalid challenge id '{}'",
            id
        )))
    }
}

fn expiry_after(ttl: Duration) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(0))
}

/// Blocking filesystem store.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the store directory.
    pub fn new(dir: impl AsRef<Path>) -> StoreResult<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn sweep_expired(&self) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Challenge store sweep failed to list {:?}: {}", self.dir, e);
                return;
            }
        };
        let now = Utc::now();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let expired = std::fs::read_to_string(&path)
                .ok()
                .and_then(|text| serde_json::from_str::<StoredChallenge>(&text).ok())
                .map(|stored| now >= stored.expires_at)
                // Unreadable files are handled on their own read path.
                .unwrap_or(false);
            if expired {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!("Failed to remove expired challenge {:?}: {}", path, e);
                }
            }
        }
    }

    /// Reads and validates one record file. Corrupt and expired files are
    /// removed; both read as absent.
    fn read_live(&self, id: &str) -> StoreResult<Option<StoredChallenge>> {
        let path = self.path_for(id);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredChallenge = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Corrupt challenge file {:?}: {}; deleting", path, e);
                let _ = std::fs::remove_file(&path);
                return Ok(None);
            }
        };
        if Utc::now() >= stored.expires_at {
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }
        Ok(Some(stored))
    }
}

impl CaptchaStore for FileStore {
    fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()> {
        validate_id(id)?;
        if rand::thread_rng().gen::<f64>() < CLEANUP_PROBABILITY {
            self.sweep_expired();
        }
        let stored = StoredChallenge {
            expires_at: expiry_after(ttl),
            challenge_data: data.clone(),
        };
        let text = serde_json::to_string(&stored)?;
        let path = self.path_for(id);
        let tmp = self.dir.join(format!("{}.json.tmp", id));
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        Ok(self.read_live(id)?.map(|stored| stored.challenge_data))
    }

    fn delete_challenge(&self, id: &str) -> StoreResult<()> {
        validate_id(id)?;
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        let stored = match self.read_live(id)? {
            Some(stored) => stored,
            None => return Ok(None),
        };
        // The remove decides the race: whoever deletes the file owns the
        // record.
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(Some(stored.challenge_data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Filesystem store for async callers, over `tokio::fs`.
pub struct AsyncFileStore {
    dir: PathBuf,
}

impl AsyncFileStore {
    pub async fn new(dir: impl AsRef<Path>) -> StoreResult<Self> {
        tokio::fs::create_dir_all(dir.as_ref()).await?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_live(&self, id: &str) -> StoreResult<Option<StoredChallenge>> {
        let path = self.path_for(id);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredChallenge = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Corrupt challenge file {:?}: {}; deleting", path, e);
                let _ = tokio::fs::remove_file(&path).await;
                return Ok(None);
            }
        };
        if Utc::now() >= stored.expires_at {
            let _ = tokio::fs::remove_file(&path).await;
            return Ok(None);
        }
        Ok(Some(stored))
    }

    async fn sweep_expired(&self) {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Challenge store sweep failed to list {:?}: {}", self.dir, e);
                return;
            }
        };
        let now = Utc::now();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let expired = tokio::fs::read_to_string(&path)
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<StoredChallenge>(&text).ok())
                .map(|stored| now >= stored.expires_at)
                .unwrap_or(false);
            if expired {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to remove expired challenge {:?}: {}", path, e);
                }
            }
        }
    }
}

impl AsyncCaptchaStore for AsyncFileStore {
    async fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()> {
        validate_id(id)?;
        if rand::thread_rng().gen::<f64>() < CLEANUP_PROBABILITY {
            self.sweep_expired().await;
        }
        let stored = StoredChallenge {
            expires_at: expiry_after(ttl),
            challenge_data: data.clone(),
        };
        let text = serde_json::to_string(&stored)?;
        let path = self.path_for(id);
        let tmp = self.dir.join(format!("{}.json.tmp", id));
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        Ok(self.read_live(id).await?.map(|stored| stored.challenge_data))
    }

    async fn delete_challenge(&self, id: &str) -> StoreResult<()> {
        validate_id(id)?;
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        let stored = match self.read_live(id).await? {
            Some(stored) => stored,
            None => return Ok(None),
        };
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(Some(stored.challenge_data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
