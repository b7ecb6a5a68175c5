// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dynamic cache tier wrapper for type erasure.

use std::{fmt::Debug, sync::Arc};

use crate::{CacheTier, Error, tier::DynCacheTier};

/// Extension trait for converting any `CacheTier` into a `DynamicTier`.
///
/// This trait is automatically implemented for all types that implement `CacheTier`.
///
/// # Examples
///
/// ```
/// use hybrid_tier::{CacheTier, DynamicTier, DynamicTierExt};
///
/// fn erase<T>(tier: T) -> DynamicTier<i32>
/// where
///     T: CacheTier<i32> + 'static,
/// {
///     tier.into_dynamic()
/// }
/// ```
pub trait DynamicTierExt<V>: Sized {
    /// Converts this cache tier into a `DynamicTier`.
    fn into_dynamic(self) -> DynamicTier<V>;
}

impl<V, T> DynamicTierExt<V> for T
where
    T: CacheTier<V> + 'static,
{
    fn into_dynamic(self) -> DynamicTier<V> {
        DynamicTier::new(self)
    }
}

/// A clonable cache tier with type erasure.
///
/// `DynamicTier` wraps a trait object in an `Arc` so that backends of different
/// concrete types can live in the same chain, and so that one backend can be shared
/// between a chain and the code that populated it.
pub struct DynamicTier<V>(Arc<DynCacheTier<'static, V>>);

impl<V> DynamicTier<V> {
    /// Creates a new dynamic tier from any `CacheTier` implementation.
    pub(crate) fn new<T>(tier: T) -> Self
    where
        T: CacheTier<V> + 'static,
    {
        Self(DynCacheTier::new_arc(tier))
    }
}

impl<V> Debug for DynamicTier<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicTier").finish()
    }
}

impl<V> Clone for DynamicTier<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V> CacheTier<V> for DynamicTier<V>
where
    V: Send,
{
    async fn set(&self, key: &str, value: V, is_empty: bool) -> Result<(), Error> {
        self.0.set(key, value, is_empty).await
    }

    async fn get(&self, key: &str) -> Result<Option<V>, Error> {
        self.0.get(key).await
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        self.0.del(key).await
    }
}
