//! In-flight request registry
//!
//! Holds the key of every running request. Insert and remove happen under
//! one mutex; removal is tied to [`InFlightGuard`] so every exit path,
//! including a dropped future, releases the key.

use crate::request::RequestKey;
use crate::session::SessionId;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Map of running requests to the session that owns them
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    entries: Mutex<HashMap<RequestKey, SessionId>>,
}

/// Registration of one running request; removed on drop
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    key: RequestKey,
}

impl InFlightRegistry {
    /// Create empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` for `session`
    ///
    /// # Errors
    /// Returns the holding session id if `key` is already registered.
    pub fn try_register(&self, key: RequestKey, session: SessionId) -> Result<InFlightGuard<'_>, SessionId> {
        let mut entries = self.entries.lock();
        if let Some(holder) = entries.get(&key) {
            return Err(*holder);
        }
        entries.insert(key.clone(), session);
        Ok(InFlightGuard { registry: self, key })
    }

    /// Check whether `key` is registered
    #[must_use]
    pub fn contains(&self, key: &RequestKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Number of running requests
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if nothing is running
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl InFlightGuard<'_> {
    /// Registered key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &RequestKey {
        &self.key
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.entries.lock().remove(&self.key);
    }
}
