// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The tier chain: cascading lookup with backfill, and fan-out delete.

use std::borrow::Cow;

use futures::future::BoxFuture;
use hybrid_tier::{CacheTier, DynamicTier, Error};
use ohno::EnrichableExt;

use crate::telemetry::{self, TierOperation};

/// One tier of the chain and everything below it.
pub(crate) struct Layer<V> {
    name: Cow<'static, str>,
    important: bool,
    tier: DynamicTier<V>,
    next: Option<Box<Self>>,
}

impl<V> std::fmt::Debug for Layer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("important", &self.important)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<V> Layer<V> {
    pub(crate) fn new(name: Cow<'static, str>, important: bool, tier: DynamicTier<V>, next: Option<Box<Self>>) -> Self {
        Self {
            name,
            important,
            tier,
            next,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }

    fn failed(&self, operation: TierOperation, error: Error) -> Error {
        error.enrich(format!("tier '{}' {} failed", self.name, operation.as_str()))
    }
}

impl<V> Layer<V>
where
    V: Clone + Default + Send + Sync + 'static,
{
    /// Looks `key` up in this tier, descending on a miss and backfilling on the way up.
    ///
    /// The future is boxed because each tier awaits the lookup of the tier below it.
    pub(crate) fn get<'a, F, Fut>(&'a self, key: &'a str, compute: F) -> BoxFuture<'a, Result<V, Error>>
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<V, Error>> + Send + 'a,
    {
        Box::pin(async move {
            match self.tier.get(key).await {
                Ok(Some(value)) => {
                    telemetry::hit(&self.name);
                    return Ok(value);
                }
                Ok(None) => {}
                Err(error) if error.is_miss() => {}
                Err(error) => {
                    let error = self.failed(TierOperation::Get, error);
                    if self.important {
                        return Err(error);
                    }
                    telemetry::tier_error(&self.name, TierOperation::Get, &error);
                }
            }

            let resolved = match &self.next {
                Some(next) => next.get(key, compute).await,
                None => {
                    telemetry::compute();
                    // Misses are tier-local. Reported by the compute function, one is a failure.
                    compute().await.map_err(|error| if error.is_miss() { Error::compute(error) } else { error })
                }
            };

            let backfill = match &resolved {
                Ok(value) => Some((value.clone(), false)),
                Err(error) if error.is_empty_data() => Some((V::default(), true)),
                Err(_) => None,
            };
            let Some((value, is_empty)) = backfill else {
                return resolved;
            };

            match self.tier.set(key, value, is_empty).await {
                Ok(()) => telemetry::backfill(&self.name, is_empty),
                Err(error) => {
                    let error = self.failed(TierOperation::Set, error);
                    if self.important {
                        return Err(error);
                    }
                    telemetry::tier_error(&self.name, TierOperation::Set, &error);
                }
            }

            resolved
        })
    }

    /// Deletes `key` from this tier and every tier below it.
    ///
    /// All tiers are attempted. The error of the deepest failing tier is returned.
    pub(crate) async fn del(&self, key: &str) -> Result<(), Error> {
        let mut last_error = None;
        let mut layer = Some(self);

        while let Some(current) = layer {
            if let Err(error) = current.tier.del(key).await {
                let error = current.failed(TierOperation::Del, error);
                telemetry::tier_error(&current.name, TierOperation::Del, &error);
                last_error = Some(error);
            }
            layer = current.next();
        }

        last_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hybrid_tier::{
        DynamicTierExt, ErrorKind,
        testing::{MockTier, TierOp},
    };

    use super::*;

    fn block_on<F: Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    fn chain(tiers: &[(&'static str, bool, MockTier<i32>)]) -> Layer<i32> {
        tiers.iter().rev().fold(None, |next, (name, important, tier)| {
            Some(Box::new(Layer::new(Cow::Borrowed(*name), *important, tier.clone().into_dynamic(), next)))
        })
        .map(|head| *head)
        .expect("chain needs at least one tier")
    }

    #[test]
    fn hit_in_head_does_not_descend() {
        let a = MockTier::with_data(HashMap::from([("k".to_string(), 1)]));
        let b = MockTier::new();
        let layer = chain(&[("a", false, a.clone()), ("b", false, b.clone())]);

        let value = block_on(layer.get("k", || async { Ok(99) })).expect("get failed");

        assert_eq!(value, 1);
        assert_eq!(a.operations(), vec![TierOp::Get("k".to_string())]);
        assert!(b.operations().is_empty());
    }

    #[test]
    fn compute_result_is_backfilled_into_every_tier() {
        let a = MockTier::new();
        let b = MockTier::new();
        let layer = chain(&[("a", false, a.clone()), ("b", false, b.clone())]);

        let value = block_on(layer.get("k", || async { Ok(7) })).expect("get failed");

        assert_eq!(value, 7);
        assert_eq!(a.peek("k"), Some(7));
        assert_eq!(b.peek("k"), Some(7));
    }

    #[test]
    fn miss_kind_descends_even_on_important_tier() {
        let layer = Layer::new(Cow::Borrowed("miss"), true, MissTier.into_dynamic(), None);

        let value = block_on(layer.get("k", || async { Ok(3) })).expect("a miss must not abort");

        assert_eq!(value, 3);
    }

    #[test]
    fn backend_error_on_important_tier_aborts() {
        let a = MockTier::new();
        a.fail_when(|op| matches!(op, TierOp::Get(_)));
        let layer = chain(&[("a", true, a.clone())]);

        let error = block_on(layer.get("k", || async { Ok(3) })).expect_err("backend error must abort");

        assert_eq!(error.kind(), ErrorKind::Backend);
        assert!(error.to_string().contains("tier 'a' get failed"), "got: {error}");
        assert_eq!(a.operations(), vec![TierOp::Get("k".to_string())]);
    }

    #[test]
    fn empty_data_backfills_default_and_is_returned() {
        let a = MockTier::new();
        let layer = chain(&[("a", false, a.clone())]);

        let error = block_on(layer.get("k", || async { Err(Error::empty_data()) })).expect_err("expected empty data");

        assert!(error.is_empty_data());
        assert_eq!(
            a.sets(),
            vec![TierOp::Set {
                key: "k".to_string(),
                value: 0,
                is_empty: true
            }]
        );
    }

    #[test]
    fn miss_from_compute_surfaces_as_compute_failure() {
        let a = MockTier::new();
        let layer = chain(&[("a", false, a.clone())]);

        let error = block_on(layer.get("k", || async { Err(Error::miss()) })).expect_err("expected failure");

        assert_eq!(error.kind(), ErrorKind::Compute);
        assert!(!error.is_miss());
        assert!(a.sets().is_empty());
    }

    #[test]
    fn compute_failure_is_not_backfilled() {
        let a = MockTier::new();
        let layer = chain(&[("a", false, a.clone())]);

        let error = block_on(layer.get("k", || async { Err(Error::compute("boom")) })).expect_err("expected failure");

        assert_eq!(error.kind(), ErrorKind::Compute);
        assert!(a.sets().is_empty());
    }

    #[test]
    fn failing_tier_is_named_in_error() {
        let a = MockTier::new();
        a.fail_when(|op| matches!(op, TierOp::Set { .. }));
        let layer = chain(&[("local", true, a)]);

        let error = block_on(layer.get("k", || async { Ok(1) })).expect_err("important set failure must surface");

        assert!(error.to_string().contains("tier 'local' set failed"), "got: {error}");
    }

    #[test]
    fn del_visits_all_tiers_and_returns_last_error() {
        let a = MockTier::with_data(HashMap::from([("k".to_string(), 1)]));
        let b = MockTier::with_data(HashMap::from([("k".to_string(), 1)]));
        let c = MockTier::with_data(HashMap::from([("k".to_string(), 1)]));
        a.fail_when(|op| matches!(op, TierOp::Del(_)));
        c.fail_when(|op| matches!(op, TierOp::Del(_)));
        let layer = chain(&[("a", false, a.clone()), ("b", false, b.clone()), ("c", false, c.clone())]);

        let error = block_on(layer.del("k")).expect_err("expected failure");

        assert!(error.to_string().contains("tier 'c' del failed"), "got: {error}");
        assert!(!b.contains_key("k"));
        assert_eq!(a.operations(), vec![TierOp::Del("k".to_string())]);
    }

    #[test]
    fn debug_lists_chain() {
        let layer = chain(&[("a", true, MockTier::new()), ("b", false, MockTier::new())]);
        let debug = format!("{layer:?}");

        assert!(debug.contains("\"a\""));
        assert!(debug.contains("\"b\""));
        assert_eq!(layer.name(), "a");
        assert_eq!(layer.next().map(Layer::name), Some("b"));
    }

    struct MissTier;

    impl CacheTier<i32> for MissTier {
        async fn set(&self, _key: &str, _value: i32, _is_empty: bool) -> Result<(), Error> {
            Ok(())
        }

        async fn get(&self, _key: &str) -> Result<Option<i32>, Error> {
            Err(Error::miss())
        }

        async fn del(&self, _key: &str) -> Result<(), Error> {
            Ok(())
        }
    }
}
