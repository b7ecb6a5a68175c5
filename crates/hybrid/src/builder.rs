// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder types for assembling a tier chain.

use std::borrow::Cow;

use hybrid_tier::{CacheTier, DynamicTier, DynamicTierExt, Error};

use crate::{Hybrid, layer::Layer};

/// How a tier's failures affect the operation that hit them.
///
/// Failures of an important tier abort a lookup and surface to the caller. Failures
/// of a best-effort tier are logged, and the lookup continues as if the tier had
/// missed. Misses never count as failures.
///
/// There is no default policy, every tier states its own.
///
/// # Examples
///
/// ```
/// use hybrid::TierPolicy;
///
/// let local = TierPolicy::best_effort().named("local");
/// let store = TierPolicy::important().named("store");
///
/// assert!(!local.is_important());
/// assert!(store.is_important());
/// assert_eq!(store.name(), Some("store"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPolicy {
    name: Option<Cow<'static, str>>,
    important: bool,
}

impl TierPolicy {
    /// A tier whose failures abort the operation.
    #[must_use]
    pub fn important() -> Self {
        Self {
            name: None,
            important: true,
        }
    }

    /// A tier whose failures are logged and otherwise treated as misses.
    #[must_use]
    pub fn best_effort() -> Self {
        Self {
            name: None,
            important: false,
        }
    }

    /// Names the tier in logs and error messages.
    ///
    /// Unnamed tiers are called `tier-<index>`, counting from zero at the head.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if failures of this tier abort the operation.
    #[must_use]
    pub fn is_important(&self) -> bool {
        self.important
    }

    /// Returns the configured name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Builder for a [`Hybrid`] cache.
///
/// Tiers are consulted in the order they are added: the fastest tier first, the
/// most authoritative last. The compute function passed to [`Hybrid::get`] sits
/// below the last tier.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "memory")]
/// # fn main() {
/// use hybrid::{Hybrid, TierPolicy, memory::MemoryTier};
///
/// let cache = Hybrid::<String>::builder()
///     .tier(MemoryTier::<String>::with_capacity(1_000), TierPolicy::best_effort().named("local"))
///     .tier(MemoryTier::<String>::with_capacity(100_000), TierPolicy::important().named("shared"))
///     .build()
///     .unwrap();
///
/// assert_eq!(cache.tier_names(), vec!["local", "shared"]);
/// # }
/// # #[cfg(not(feature = "memory"))]
/// # fn main() {}
/// ```
pub struct HybridBuilder<V> {
    tiers: Vec<(TierPolicy, DynamicTier<V>)>,
}

impl<V> std::fmt::Debug for HybridBuilder<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridBuilder")
            .field("tiers", &self.tiers.iter().map(|(policy, _)| policy).collect::<Vec<_>>())
            .finish()
    }
}

impl<V> HybridBuilder<V> {
    pub(crate) fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Appends a tier below the tiers added so far.
    #[must_use]
    pub fn tier<T>(mut self, tier: T, policy: TierPolicy) -> Self
    where
        T: CacheTier<V> + 'static,
    {
        self.tiers.push((policy, tier.into_dynamic()));
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`Config`](hybrid_tier::ErrorKind::Config) when no
    /// tier was added.
    pub fn build(self) -> Result<Hybrid<V>, Error> {
        let head = self
            .tiers
            .into_iter()
            .enumerate()
            .rev()
            .fold(None, |next, (index, (policy, tier))| {
                let name = policy.name.unwrap_or_else(|| Cow::Owned(format!("tier-{index}")));
                Some(Box::new(Layer::new(name, policy.important, tier, next)))
            });

        match head {
            Some(head) => Ok(Hybrid::new(*head)),
            None => Err(Error::config("a hybrid cache needs at least one tier")),
        }
    }
}

#[cfg(test)]
mod tests {
    use hybrid_tier::{ErrorKind, testing::MockTier};

    use super::*;

    #[test]
    fn build_without_tiers_fails() {
        let error = HybridBuilder::<i32>::new().build().expect_err("empty chain must be rejected");

        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn unnamed_tiers_are_numbered_from_head() {
        let cache = HybridBuilder::<i32>::new()
            .tier(MockTier::<i32>::new(), TierPolicy::best_effort())
            .tier(MockTier::<i32>::new(), TierPolicy::important().named("store"))
            .tier(MockTier::<i32>::new(), TierPolicy::best_effort())
            .build()
            .expect("build failed");

        assert_eq!(cache.tier_names(), vec!["tier-0", "store", "tier-2"]);
        assert_eq!(cache.tier_count(), 3);
    }

    #[test]
    fn policy_accessors() {
        let policy = TierPolicy::important();
        assert!(policy.is_important());
        assert_eq!(policy.name(), None);

        let policy = TierPolicy::best_effort().named(String::from("owned"));
        assert!(!policy.is_important());
        assert_eq!(policy.name(), Some("owned"));
    }

    #[test]
    fn builder_debug_lists_policies() {
        let builder = HybridBuilder::<i32>::new().tier(MockTier::<i32>::new(), TierPolicy::important().named("store"));
        let debug = format!("{builder:?}");

        assert!(debug.contains("HybridBuilder"));
        assert!(debug.contains("store"));
    }
}
