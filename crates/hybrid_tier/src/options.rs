// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-tier persistence options.

use std::{borrow::Cow, time::Duration};

/// Options a backend adapter applies when persisting values.
///
/// Options are built once, handed to an adapter at construction and never changed
/// afterwards. Each adapter receives its own copy; reuse one across tiers by cloning it.
///
/// # Examples
///
/// ```
/// use hybrid_tier::TierOptions;
/// use std::time::Duration;
///
/// let options = TierOptions::new()
///     .prefix("user")
///     .cache_empty(true)
///     .empty_ttl(Duration::from_secs(30));
///
/// assert_eq!(options.key("42"), "[user]42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierOptions {
    prefix: String,
    cache_empty: bool,
    empty_ttl: Option<Duration>,
}

/// What an adapter should do with a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    /// Do not persist the value.
    Skip,
    /// Persist the value with the given time-to-live, or without expiry for `None`.
    Store {
        /// Time-to-live of the stored value.
        ttl: Option<Duration>,
    },
}

impl TierOptions {
    /// Creates options with no prefix that do not cache empty results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix prepended to every key the adapter writes or reads.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets whether intentionally empty results are persisted.
    #[must_use]
    pub fn cache_empty(mut self, cache_empty: bool) -> Self {
        self.cache_empty = cache_empty;
        self
    }

    /// Sets the time-to-live of persisted empty results.
    ///
    /// A zero duration is ignored and the adapter's regular time-to-live applies.
    #[must_use]
    pub fn empty_ttl(mut self, ttl: Duration) -> Self {
        self.empty_ttl = Some(ttl);
        self
    }

    /// Returns the configured key prefix, empty if none.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if empty results are persisted.
    #[must_use]
    pub fn caches_empty(&self) -> bool {
        self.cache_empty
    }

    /// Returns the time-to-live of persisted empty results, if set.
    #[must_use]
    pub fn empty_result_ttl(&self) -> Option<Duration> {
        self.empty_ttl
    }

    /// Renders the storage key for `key`.
    ///
    /// With a prefix `p` the result is `[p]key`, otherwise `key` unchanged.
    #[must_use]
    pub fn key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.prefix.is_empty() {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(format!("[{}]{key}", self.prefix))
        }
    }

    /// Decides how a write should be persisted.
    ///
    /// `ttl` is the adapter's regular time-to-live. Empty writes are skipped unless
    /// [`cache_empty`](Self::cache_empty) is set, in which case they use the empty
    /// time-to-live when one is configured.
    #[must_use]
    pub fn plan_write(&self, is_empty: bool, ttl: Option<Duration>) -> WritePlan {
        if !is_empty {
            return WritePlan::Store { ttl };
        }
        if !self.cache_empty {
            return WritePlan::Skip;
        }
        match self.empty_ttl {
            Some(empty_ttl) if !empty_ttl.is_zero() => WritePlan::Store { ttl: Some(empty_ttl) },
            _ => WritePlan::Store { ttl },
        }
    }
}
