// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory tiers.
//!
//! The builder abstracts the underlying moka configuration, providing a stable API
//! surface without exposing moka's types.

use std::marker::PhantomData;
use std::time::Duration;

use hybrid_tier::TierOptions;

use crate::tier::MemoryTier;

/// Builder for configuring a [`MemoryTier`].
///
/// # Examples
///
/// ```
/// use hybrid_memory::MemoryTier;
/// use hybrid_tier::TierOptions;
/// use std::time::Duration;
///
/// let tier = MemoryTier::<String>::builder()
///     .max_capacity(1000)
///     .time_to_live(Duration::from_secs(300))
///     .initial_capacity(100)
///     .name("users")
///     .options(TierOptions::new().cache_empty(true).empty_ttl(Duration::from_secs(10)))
///     .build();
/// ```
#[derive(Debug)]
pub struct MemoryTierBuilder<V> {
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) time_to_live: Option<Duration>,
    pub(crate) name: Option<String>,
    pub(crate) options: TierOptions,
    _phantom: PhantomData<V>,
}

impl<V> Default for MemoryTierBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryTierBuilder<V> {
    /// Creates a new builder for an unbounded tier without expiration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_capacity: None,
            initial_capacity: None,
            time_to_live: None,
            name: None,
            options: TierOptions::default(),
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum number of entries.
    ///
    /// Once the capacity is reached, entries are evicted using moka's `TinyLFU`
    /// policy. Without a capacity the tier is limited only by available memory.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint) of the tier.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets the time-to-live of regular entries.
    ///
    /// Empty entries use the options' empty time-to-live instead, when one is set.
    #[must_use]
    pub fn time_to_live(mut self, duration: Duration) -> Self {
        self.time_to_live = Some(duration);
        self
    }

    /// Sets a name that may appear in moka's diagnostics.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the persistence options of the tier.
    #[must_use]
    pub fn options(mut self, options: TierOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the configured [`MemoryTier`].
    #[must_use]
    pub fn build(self) -> MemoryTier<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        MemoryTier::from_builder(self)
    }
}
