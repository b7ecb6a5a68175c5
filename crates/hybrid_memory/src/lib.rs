// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-process bounded cache tier backed by moka.
//!
//! This crate provides [`MemoryTier`], a concurrent in-memory [`CacheTier`](hybrid_tier::CacheTier)
//! for the fast end of a hybrid cache chain. Use [`MemoryTierBuilder`] to configure capacity,
//! time-to-live and the [`TierOptions`](hybrid_tier::TierOptions) that govern key prefixing and
//! the caching of empty results, without exposing moka types.
//!
//! # Quick Start
//!
//! ```
//! use hybrid_memory::MemoryTier;
//! use hybrid_tier::{CacheTier, TierOptions};
//! use std::time::Duration;
//!
//! # futures::executor::block_on(async {
//! let tier = MemoryTier::<i32>::builder()
//!     .max_capacity(1000)
//!     .time_to_live(Duration::from_secs(300))
//!     .options(TierOptions::new().prefix("numbers"))
//!     .build();
//!
//! tier.set("key", 42, false).await?;
//! assert_eq!(tier.get("key").await?, Some(42));
//! # Ok::<(), hybrid_tier::Error>(())
//! # });
//! ```
//!
//! # Empty Results
//!
//! Writes marked as empty are dropped unless the options enable
//! [`cache_empty`](hybrid_tier::TierOptions::cache_empty); when they are kept, they expire
//! after the options' empty time-to-live if one is set.

pub mod builder;
pub mod tier;

#[doc(inline)]
pub use builder::MemoryTierBuilder;
#[doc(inline)]
pub use tier::MemoryTier;
