// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for cache storage backends.
//!
//! [`CacheTier`] is the three-operation contract that every tier of a hybrid cache
//! implements. The hybrid cache chains tiers together and layers cascading lookups,
//! backfill and broadcast deletion on top.

use crate::Error;

/// Trait for cache tier implementations.
///
/// A tier stores values of type `V` under string keys. How it stores them (in
/// process, over the network, with which eviction policy) is up to the
/// implementation; the hybrid cache only relies on these three operations.
///
/// All operations may be called concurrently on the same instance, which is why the
/// trait requires `Send + Sync`. The hybrid cache adds no synchronization of its own.
///
/// # Misses
///
/// A missing record is reported from [`get`](Self::get) either as `Ok(None)` or as an
/// error whose kind is [`ErrorKind::Miss`](crate::ErrorKind::Miss). Both are handled
/// identically by the cache; the second form is convenient for adapters whose
/// underlying client reports absence as an error.
#[cfg_attr(
    any(test, feature = "dynamic-tier"),
    dynosaur::dynosaur(pub(crate) DynCacheTier = dyn(box) CacheTier, bridge(none))
)]
pub trait CacheTier<V>: Send + Sync {
    /// Persists `value` under `key`.
    ///
    /// `is_empty` is `true` when `value` stands for an intentionally empty result
    /// rather than a real value. Tiers may store such values with a shorter
    /// time-to-live, or skip storing them altogether.
    fn set(&self, key: &str, value: V, is_empty: bool) -> impl Future<Output = Result<(), Error>> + Send;

    /// Gets the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<V>, Error>> + Send;

    /// Removes the value stored under `key`.
    ///
    /// Removing a key that is not present is not an error.
    fn del(&self, key: &str) -> impl Future<Output = Result<(), Error>> + Send;
}
