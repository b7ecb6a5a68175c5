// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The multi-tier cache.

use hybrid_tier::Error;

use crate::{builder::HybridBuilder, layer::Layer};

/// A read-through, write-through cache over an ordered chain of tiers.
///
/// A lookup asks each tier in turn and stops at the first one holding the key. When
/// every tier misses, the compute function produces the value. On the way back up the
/// value is written into every tier that missed, so the next lookup is served by the
/// fastest tier.
///
/// A compute function may return [`Error::empty_data`] to report that the record
/// does not exist. The tiers then receive `V::default()` marked as empty, and whether
/// they keep it is up to their [`TierOptions`](hybrid_tier::TierOptions). The caller
/// still sees the `EmptyData` error; [`Hybrid::get_value`] folds it into the default
/// value instead.
///
/// The cache holds no state besides its tiers and adds no locking. Share it by
/// reference or behind an `Arc`.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "memory")]
/// # fn main() {
/// use hybrid::{Error, Hybrid, TierPolicy, memory::MemoryTier};
/// # futures::executor::block_on(async {
///
/// let cache = Hybrid::<Option<String>>::builder()
///     .tier(MemoryTier::<Option<String>>::with_capacity(1_000), TierPolicy::best_effort().named("local"))
///     .build()?;
///
/// let name = cache.get("user:1", || async { Ok(Some("Ada".to_string())) }).await?;
/// assert_eq!(name.as_deref(), Some("Ada"));
///
/// // Served by the local tier, the compute function is not called again.
/// let name = cache.get("user:1", || async { unreachable!() }).await?;
/// assert_eq!(name.as_deref(), Some("Ada"));
///
/// // An absent record.
/// let result = cache.get("user:2", || async { Err(Error::empty_data()) }).await;
/// assert!(result.is_err_and(|error| error.is_empty_data()));
/// # Ok::<(), Error>(())
/// # }).unwrap();
/// # }
/// # #[cfg(not(feature = "memory"))]
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct Hybrid<V> {
    head: Layer<V>,
}

impl<V> Hybrid<V> {
    pub(crate) fn new(head: Layer<V>) -> Self {
        Self { head }
    }

    fn layers(&self) -> impl Iterator<Item = &Layer<V>> {
        std::iter::successors(Some(&self.head), |layer| layer.next())
    }

    /// Creates a builder for assembling the tier chain.
    #[must_use]
    pub fn builder() -> HybridBuilder<V> {
        HybridBuilder::new()
    }

    /// Returns the names of the tiers, head first.
    #[must_use]
    pub fn tier_names(&self) -> Vec<&str> {
        self.layers().map(Layer::name).collect()
    }

    /// Returns the number of tiers in the chain.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.layers().count()
    }
}

impl<V> Hybrid<V>
where
    V: Clone + Default + Send + Sync + 'static,
{
    /// Returns the value for `key`, computing and caching it on a full miss.
    ///
    /// `compute` runs at most once, and only when no tier holds the key.
    ///
    /// # Errors
    ///
    /// - [`EmptyData`](hybrid_tier::ErrorKind::EmptyData) when `compute` reported an
    ///   absent record. The tiers were still backfilled with the empty value.
    /// - [`Backend`](hybrid_tier::ErrorKind::Backend) when an important tier failed to
    ///   read or to store the value. The message names the tier and the operation.
    /// - [`Compute`](hybrid_tier::ErrorKind::Compute) wrapping a
    ///   [`Miss`](hybrid_tier::ErrorKind::Miss) returned by `compute`. Misses are only
    ///   meaningful for tiers.
    /// - Any other error returned by `compute`, unchanged. Such errors are never cached.
    pub async fn get<F, Fut>(&self, key: &str, compute: F) -> Result<V, Error>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, Error>> + Send,
    {
        self.head.get(key, compute).await
    }

    /// Like [`get`](Self::get), but returns `V::default()` for an absent record.
    ///
    /// # Errors
    ///
    /// Returns every error [`get`](Self::get) returns except
    /// [`EmptyData`](hybrid_tier::ErrorKind::EmptyData).
    pub async fn get_value<F, Fut>(&self, key: &str, compute: F) -> Result<V, Error>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, Error>> + Send,
    {
        match self.get(key, compute).await {
            Err(error) if error.is_empty_data() => Ok(V::default()),
            result => result,
        }
    }

    /// Removes `key` from every tier.
    ///
    /// Every tier is attempted even when some fail, so the key may be gone from some
    /// tiers and still present in others.
    ///
    /// # Errors
    ///
    /// Returns the error of the last tier that failed.
    pub async fn del(&self, key: &str) -> Result<(), Error> {
        self.head.del(key).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hybrid_tier::testing::MockTier;

    use super::*;
    use crate::TierPolicy;

    fn block_on<F: Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn get_value_folds_empty_data_into_default() {
        let tier = MockTier::<Vec<u8>>::new();
        let cache = Hybrid::<Vec<u8>>::builder()
            .tier(tier.clone(), TierPolicy::best_effort())
            .build()
            .expect("build failed");

        let value = block_on(cache.get_value("k", || async { Err(Error::empty_data()) })).expect("get_value failed");

        assert!(value.is_empty());
        assert!(tier.contains_key("k"));
    }

    #[test]
    fn get_value_keeps_other_errors() {
        let cache = Hybrid::<i32>::builder()
            .tier(MockTier::<i32>::new(), TierPolicy::best_effort())
            .build()
            .expect("build failed");

        let error = block_on(cache.get_value("k", || async { Err(Error::compute("boom")) })).expect_err("expected failure");

        assert_eq!(error.kind(), hybrid_tier::ErrorKind::Compute);
    }

    #[test]
    fn tier_count_and_names_reflect_chain() {
        let cache = Hybrid::<i32>::builder()
            .tier(MockTier::<i32>::with_data(HashMap::new()), TierPolicy::best_effort().named("a"))
            .tier(MockTier::<i32>::new(), TierPolicy::important().named("b"))
            .build()
            .expect("build failed");

        assert_eq!(cache.tier_count(), 2);
        assert_eq!(cache.tier_names(), vec!["a", "b"]);
    }

    #[test]
    fn hybrid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Hybrid<String>>();
    }

    #[test]
    fn get_future_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        let cache = Hybrid::<i32>::builder()
            .tier(MockTier::<i32>::new(), TierPolicy::best_effort())
            .build()
            .expect("build failed");

        let future = cache.get("k", || async { Ok(1) });
        assert_send(&future);
        assert_eq!(block_on(future).expect("get failed"), 1);
    }
}
