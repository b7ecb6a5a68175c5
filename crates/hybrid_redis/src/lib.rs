// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Redis-backed cache tier for the hybrid multi-tier cache.
//!
//! [`RedisTier`] stores every value as a JSON-encoded [`Warp`](hybrid_tier::Warp) envelope,
//! so absent values (`None`, empty collections, zeros) are read back as themselves
//! rather than as missing keys. Keys are rendered through the tier's
//! [`TierOptions`](hybrid_tier::TierOptions), which also decide whether empty results are
//! written and with which expiry.
//!
//! # Examples
//!
//! ```no_run
//! use hybrid_redis::RedisTier;
//! use hybrid_tier::{CacheTier, TierOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = redis::Client::open("redis://127.0.0.1/")?;
//! let connection = redis::aio::ConnectionManager::new(client).await?;
//!
//! let tier = RedisTier::<Option<String>>::new(
//!     connection,
//!     Duration::from_secs(600),
//!     TierOptions::new().prefix("users").cache_empty(true).empty_ttl(Duration::from_secs(30)),
//! );
//!
//! tier.set("42", Some("Ada".to_string()), false).await?;
//! assert_eq!(tier.get("42").await?, Some(Some("Ada".to_string())));
//! # Ok(())
//! # }
//! ```

mod codec;
pub mod tier;

#[doc(inline)]
pub use tier::RedisTier;
