// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory cache tier implementation using moka.

use std::time::{Duration, Instant};

use hybrid_tier::{CacheTier, Error, TierOptions, WritePlan};
use moka::{Expiry, future::Cache};

use crate::builder::MemoryTierBuilder;

/// A stored value together with the time-to-live it was written with.
#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    ttl: Option<Duration>,
}

/// Expires each slot after its own time-to-live.
struct SlotExpiry;

impl<V> Expiry<String, Slot<V>> for SlotExpiry {
    fn expire_after_create(&self, _key: &String, slot: &Slot<V>, _created_at: Instant) -> Option<Duration> {
        slot.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        slot: &Slot<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        slot.ttl
    }
}

/// An in-process bounded cache tier backed by moka.
///
/// This tier provides:
/// - Concurrent access from any number of tasks
/// - Capacity-bounded eviction
/// - Per-entry expiration, so empty results can expire sooner than real values
///
/// Clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use hybrid_memory::MemoryTier;
/// use hybrid_tier::CacheTier;
/// # futures::executor::block_on(async {
///
/// let tier = MemoryTier::<i32>::with_capacity(1000);
///
/// tier.set("key", 42, false).await?;
/// assert_eq!(tier.get("key").await?, Some(42));
/// # Ok::<(), hybrid_tier::Error>(())
/// # });
/// ```
#[derive(Clone)]
pub struct MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<String, Slot<V>>,
    ttl: Option<Duration>,
    options: TierOptions,
}

impl<V> std::fmt::Debug for MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTier")
            .field("ttl", &self.ttl)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<V> Default for MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded tier with default options and no expiration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new tier holding at most `max_capacity` entries.
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory tier.
    #[must_use]
    pub fn builder() -> MemoryTierBuilder<V> {
        MemoryTierBuilder::new()
    }

    pub(crate) fn from_builder(builder: MemoryTierBuilder<V>) -> Self {
        let mut moka_builder = Cache::builder().expire_after(SlotExpiry);

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
            ttl: builder.time_to_live,
            options: builder.options,
        }
    }

    /// Returns the options this tier was built with.
    #[must_use]
    pub fn options(&self) -> &TierOptions {
        &self.options
    }

    /// Returns the approximate number of entries.
    ///
    /// The count is maintained lazily by moka and may lag behind recent writes.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<V> CacheTier<V> for MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn set(&self, key: &str, value: V, is_empty: bool) -> Result<(), Error> {
        match self.options.plan_write(is_empty, self.ttl) {
            WritePlan::Skip => Ok(()),
            WritePlan::Store { ttl } => {
                self.inner.insert(self.options.key(key).into_owned(), Slot { value, ttl }).await;
                Ok(())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<V>, Error> {
        let key = self.options.key(key);
        Ok(self.inner.get(key.as_ref()).await.map(|slot| slot.value))
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        let key = self.options.key(key);
        self.inner.invalidate(key.as_ref()).await;
        Ok(())
    }
}
