// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock cache tier for testing.
//!
//! This module provides `MockTier`, an in-memory tier that records every operation
//! and supports failure injection for testing error paths.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{CacheTier, Error};

/// Recorded tier operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOp<V> {
    /// A get operation was performed with the given key.
    Get(String),
    /// A set operation was performed.
    Set {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
        /// Whether the write was marked as an empty result.
        is_empty: bool,
    },
    /// A del operation was performed with the given key.
    Del(String),
}

impl<V> TierOp<V> {
    /// Returns the key this operation targeted.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Get(key) | Self::Del(key) | Self::Set { key, .. } => key,
        }
    }
}

type FailPredicate<V> = Box<dyn Fn(&TierOp<V>) -> bool + Send + Sync>;

/// A configurable mock tier for testing.
///
/// The tier stores every value it is given, empty or not, and can be told to fail
/// operations on demand. All operations are recorded for later verification. Clones
/// share state, so a clone kept by the test observes what the cache did.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # fn main() {
/// use hybrid_tier::{CacheTier, ErrorKind, testing::{MockTier, TierOp}};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let tier = MockTier::<i32>::new();
///
/// tier.set("key", 42, false).await.unwrap();
/// assert_eq!(tier.get("key").await.unwrap(), Some(42));
///
/// assert_eq!(tier.operations(), vec![
///     TierOp::Set { key: "key".to_string(), value: 42, is_empty: false },
///     TierOp::Get("key".to_string()),
/// ]);
///
/// // Fail only gets for a specific key
/// tier.fail_when(|op| matches!(op, TierOp::Get(k) if k == "forbidden"));
/// let error = tier.get("forbidden").await.unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Backend);
/// assert!(tier.get("allowed").await.is_ok());
/// # });
/// # }
/// # #[cfg(not(feature = "test-util"))]
/// # fn main() {}
/// ```
pub struct MockTier<V> {
    data: Arc<Mutex<HashMap<String, V>>>,
    operations: Arc<Mutex<Vec<TierOp<V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<V>>>>,
}

impl<V> std::fmt::Debug for MockTier<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTier")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<V> Clone for MockTier<V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<V> Default for MockTier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MockTier<V> {
    /// Creates a new empty mock tier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(HashMap::new())
    }

    /// Creates a mock tier with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<String, V>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the tier holds a value for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    /// Sets a predicate that determines when operations should fail.
    ///
    /// Failing operations are still recorded and return an error of kind
    /// [`ErrorKind::Backend`](crate::ErrorKind::Backend) without touching the data.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&TierOp<V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn should_fail(&self, op: &TierOp<V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }

    fn record(&self, op: TierOp<V>) {
        self.operations.lock().push(op);
    }
}

impl<V> MockTier<V>
where
    V: Clone,
{
    /// Returns a copy of the value stored under `key`, bypassing operation recording.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<V> {
        self.data.lock().get(key).cloned()
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<TierOp<V>> {
        self.operations.lock().clone()
    }

    /// Returns the recorded set operations.
    #[must_use]
    pub fn sets(&self) -> Vec<TierOp<V>> {
        self.operations
            .lock()
            .iter()
            .filter(|op| matches!(op, TierOp::Set { .. }))
            .cloned()
            .collect()
    }
}

impl<V> CacheTier<V> for MockTier<V>
where
    V: Clone + Send + Sync,
{
    async fn set(&self, key: &str, value: V, is_empty: bool) -> Result<(), Error> {
        let op = TierOp::Set {
            key: key.to_string(),
            value: value.clone(),
            is_empty,
        };
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::backend("mock: set failed"));
        }
        self.data.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<V>, Error> {
        let op = TierOp::Get(key.to_string());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::backend("mock: get failed"));
        }
        Ok(self.data.lock().get(key).cloned())
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        let op = TierOp::Del(key.to_string());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::backend("mock: del failed"));
        }
        self.data.lock().remove(key);
        Ok(())
    }
}
