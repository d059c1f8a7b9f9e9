//! In-memory challenge stores
//!
//! A map from challenge id to (payload, monotonic expiry). Expired entries
//! are removed lazily: on read, and with a small probability on every write
//! so abandoned challenges cannot accumulate without bound.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use rand::Rng;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::contract::{AsyncCaptchaStore, CaptchaStore};
use crate::error::StoreResult;

/// Probability that a write triggers a sweep of expired entries.
const CLEANUP_PROBABILITY: f64 = 0.1;

type Entries = HashMap<String, (Value, Instant)>;

fn sweep_expired(entries: &mut Entries) {
    let now = Instant::now();
    entries.retain(|id, (_, expiry)| {
        let keep = now < *expiry;
        if !keep {
            tracing::debug!("Removed expired challenge {}", id);
        }
        keep
    });
}

/// Thread-safe in-memory store for blocking callers.
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live (possibly expired but unswept) entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptchaStore for MemoryStore {
    fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap();
        if rand::thread_rng().gen::<f64>() < CLEANUP_PROBABILITY {
            sweep_expired(&mut entries);
        }
        entries.insert(id.to_string(), (data.clone(), Instant::now() + ttl));
        Ok(())
    }

    fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        {
            let entries = self.entries.read().unwrap();
            match entries.get(id) {
                Some((value, expiry)) if Instant::now() < *expiry => {
                    return Ok(Some(value.clone()))
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Found but expired: upgrade to a write lock and re-check, since a
        // writer may have replaced the entry between the two locks.
        let mut entries = self.entries.write().unwrap();
        match entries.get(id) {
            Some((value, expiry)) if Instant::now() < *expiry => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(id);
                tracing::debug!("Challenge {} found but expired", id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn delete_challenge(&self, id: &str) -> StoreResult<()> {
        self.entries.write().unwrap().remove(id);
        Ok(())
    }

    fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        // remove() under the write lock makes the first caller win.
        let removed = self.entries.write().unwrap().remove(id);
        match removed {
            Some((value, expiry)) if Instant::now() < expiry => Ok(Some(value)),
            _ => Ok(None),
        }
    }
}

/// In-memory store for async callers, guarded by an async mutex.
pub struct AsyncMemoryStore {
    entries: Mutex<Entries>,
}

impl AsyncMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for AsyncMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncCaptchaStore for AsyncMemoryStore {
    async fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()> {
        let sweep = rand::thread_rng().gen::<f64>() < CLEANUP_PROBABILITY;
        let mut entries = self.entries.lock().await;
        if sweep {
            sweep_expired(&mut entries);
        }
        entries.insert(id.to_string(), (data.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        let mut entries = self.entries.lock().await;
        match entries.get(id) {
            Some((value, expiry)) if Instant::now() < *expiry => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(id);
                tracing::debug!("Challenge {} found but expired", id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_challenge(&self, id: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(id);
        Ok(())
    }

    async fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        let removed = self.entries.lock().await.remove(id);
        match removed {
            Some((value, expiry)) if Instant::now() < expiry => Ok(Some(value)),
            _ => Ok(None),
        }
    }
}
