// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Backend abstractions for the `hybrid` multi-tier cache.
//!
//! This crate defines the [`CacheTier`] trait every backend of a hybrid cache must
//! satisfy, the [`Error`] type whose [`ErrorKind`] separates a miss from an
//! intentionally empty result and from a genuine failure, and [`TierOptions`] that
//! backend adapters interpret when persisting values.
//!
//! # Implementing a Cache Tier
//!
//! ```
//! use hybrid_tier::{CacheTier, Error};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleTier<V>(RwLock<HashMap<String, V>>);
//!
//! impl<V> CacheTier<V> for SimpleTier<V>
//! where
//!     V: Clone + Send + Sync,
//! {
//!     async fn set(&self, key: &str, value: V, _is_empty: bool) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.to_string(), value);
//!         Ok(())
//!     }
//!
//!     async fn get(&self, key: &str) -> Result<Option<V>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn del(&self, key: &str) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! The `dynamic-tier` feature (enabled by default) provides [`DynamicTier`], a clonable
//! type-erased tier. A hybrid cache chains heterogeneous backends through it.
//!
//! # Envelope
//!
//! With the `serde` feature, [`Warp`] wraps values before serialization so that an
//! absent value survives a round trip as itself instead of turning into a missing key.

pub mod error;
mod options;
#[cfg(any(feature = "test-util", test))]
pub mod testing;
pub(crate) mod tier;
#[cfg(any(feature = "serde", test))]
mod warp;

#[cfg(any(test, feature = "dynamic-tier"))]
mod dynamic;

#[cfg(any(test, feature = "dynamic-tier"))]
#[doc(inline)]
pub use dynamic::{DynamicTier, DynamicTierExt};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use options::{TierOptions, WritePlan};
#[doc(inline)]
pub use tier::CacheTier;
#[cfg(any(feature = "serde", test))]
#[doc(inline)]
pub use warp::Warp;
