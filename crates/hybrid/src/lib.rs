// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A multi-tier read-through and write-through cache.
//!
//! A [`Hybrid`] cache chains backends such as an in-process tier and a shared
//! networked tier in front of a compute function:
//! - Lookups stop at the first tier holding the key
//! - Values found lower down, or computed on a full miss, are written back into the
//!   tiers above
//! - Absent records can be cached as empty values, so they do not reach the compute
//!   function on every lookup
//! - Each tier is either important, with failures surfacing to the caller, or
//!   best-effort, with failures logged and treated as misses
//! - Deletes reach every tier
//!
//! Backends implement [`CacheTier`]. The `memory` feature (enabled by default)
//! provides an in-process tier in `memory`, and the `redis` feature a Redis tier in
//! `redis`.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "memory")]
//! # fn main() {
//! use hybrid::{Hybrid, TierOptions, TierPolicy, memory::MemoryTier};
//! use std::time::Duration;
//! # futures::executor::block_on(async {
//!
//! let local = MemoryTier::<Option<String>>::builder()
//!     .max_capacity(1_000)
//!     .time_to_live(Duration::from_secs(60))
//!     .build();
//! let shared = MemoryTier::<Option<String>>::builder()
//!     .time_to_live(Duration::from_secs(600))
//!     .options(TierOptions::new().prefix("users").cache_empty(true))
//!     .build();
//!
//! let cache = Hybrid::<Option<String>>::builder()
//!     .tier(local, TierPolicy::best_effort().named("local"))
//!     .tier(shared, TierPolicy::important().named("shared"))
//!     .build()?;
//!
//! let user = cache.get_value("42", || async { Ok(Some("Ada".to_string())) }).await?;
//! assert_eq!(user.as_deref(), Some("Ada"));
//!
//! cache.del("42").await?;
//! # Ok::<(), hybrid::Error>(())
//! # }).unwrap();
//! # }
//! # #[cfg(not(feature = "memory"))]
//! # fn main() {}
//! ```
//!
//! # Logging
//!
//! With the `logs` feature (enabled by default) the cache emits `tracing` events:
//! `hybrid.tier_error` at warn level for tolerated tier failures, and `hybrid.hit`,
//! `hybrid.backfill` and `hybrid.compute` at debug level.

pub mod builder;
mod cache;
mod layer;
mod telemetry;

#[doc(inline)]
pub use builder::{HybridBuilder, TierPolicy};
#[doc(inline)]
pub use cache::Hybrid;
#[doc(inline)]
pub use hybrid_tier::{CacheTier, DynamicTier, DynamicTierExt, Error, ErrorKind, Result, TierOptions};

/// In-process tier backed by moka.
#[cfg(feature = "memory")]
pub use hybrid_memory as memory;

/// Redis tier storing JSON envelopes.
#[cfg(feature = "redis")]
pub use hybrid_redis as redis;

/// Recording, failure-injecting tiers for tests.
#[cfg(feature = "test-util")]
pub use hybrid_tier::testing;
