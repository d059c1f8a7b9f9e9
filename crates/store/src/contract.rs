//! Store contracts for challenge state
//!
//! A challenge store is a TTL key-value map from opaque challenge ids to
//! JSON payloads. Missing keys are not errors: `retrieve` returns `None` and
//! `delete` is idempotent. `take` is the single-use primitive verification
//! relies on: it removes and returns the payload atomically per id, so of
//! two concurrent verifiers exactly one observes the record.
//!
//! The contract is backend-agnostic; in-memory maps, one-file-per-id
//! directories and networked TTL stores all fit it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::error::StoreResult;

/// Blocking challenge store.
pub trait CaptchaStore: Send + Sync {
    /// Persists `data` under `id` for at most `ttl`.
    fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()>;

    /// Fetches the payload if present and not expired.
    fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>>;

    /// Removes the payload. Deleting a missing id is not an error.
    fn delete_challenge(&self, id: &str) -> StoreResult<()>;

    /// Atomically removes and returns the payload. The default is a
    /// retrieve-then-delete; backends with stronger primitives override it.
    fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        let value = self.retrieve_challenge(id)?;
        if value.is_some() {
            self.delete_challenge(id)?;
        }
        Ok(value)
    }

    /// Releases backend resources. No-op by default.
    fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Asynchronous challenge store; semantics are identical to `CaptchaStore`.
pub trait AsyncCaptchaStore: Send + Sync {
    fn store_challenge(
        &self,
        id: &str,
        data: &Value,
        ttl: Duration,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    fn retrieve_challenge(&self, id: &str) -> impl Future<Output = StoreResult<Option<Value>>> + Send;

    fn delete_challenge(&self, id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    fn take_challenge(&self, id: &str) -> impl Future<Output = StoreResult<Option<Value>>> + Send {
        async move {
            let value = self.retrieve_challenge(id).await?;
            if value.is_some() {
                self.delete_challenge(id).await?;
            }
            Ok(value)
        }
    }

    fn close(&self) -> impl Future<Output = StoreResult<()>> + Send {
        async { Ok(()) }
    }
}

// Shared handles are stores too, so a service and its caller can hold the
// same backend.
impl<S: CaptchaStore + ?Sized> CaptchaStore for Arc<S> {
    fn store_challenge(&self, id: &str, data: &Value, ttl: Duration) -> StoreResult<()> {
        (**self).store_challenge(id, data, ttl)
    }

    fn retrieve_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        (**self).retrieve_challenge(id)
    }

    fn delete_challenge(&self, id: &str) -> StoreResult<()> {
        (**self).delete_challenge(id)
    }

    fn take_challenge(&self, id: &str) -> StoreResult<Option<Value>> {
        (**self).take_challenge(id)
    }

    fn close(&self) -> StoreResult<()> {
        (**self).close()
    }
}

impl<S: AsyncCaptchaStore> AsyncCaptchaStore for Arc<S> {
    fn store_challenge(
        &self,
        id: &str,
        data: &Value,
        ttl: Duration,
    ) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).store_challenge(id, data, ttl)
    }

    fn retrieve_challenge(
        &self,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Value>>> + Send {
        (**self).retrieve_challenge(id)
    }

    fn delete_challenge(&self, id: &str) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).delete_challenge(id)
    }

    fn take_challenge(&self, id: &str) -> impl Future<Output = StoreResult<Option<Value>>> + Send {
        (**self).take_challenge(id)
    }

    fn close(&self) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).close()
    }
}
