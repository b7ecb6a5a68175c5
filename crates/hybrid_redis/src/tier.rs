// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Redis cache tier implementation.

use std::{marker::PhantomData, time::Duration};

use hybrid_tier::{CacheTier, Error, TierOptions, WritePlan};
use redis::{AsyncCommands, aio::ConnectionLike, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};

use crate::codec;

/// A cache tier stored in Redis.
///
/// Values are written as JSON-encoded [`Warp`](hybrid_tier::Warp) envelopes with
/// `SET key value EX seconds`. The regular time-to-live applies to real values; empty
/// results use [`TierOptions::empty_ttl`] when one is configured and are not written
/// at all unless [`TierOptions::cache_empty`] is enabled. A zero time-to-live stores
/// values without expiry.
///
/// The tier is generic over the connection so that any clonable async connection can
/// be used. [`ConnectionManager`] is the default since it reconnects on failure.
pub struct RedisTier<V, C = ConnectionManager> {
    connection: C,
    ttl: Duration,
    options: TierOptions,
    _value: PhantomData<fn() -> V>,
}

impl<V, C> Clone for RedisTier<V, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            ttl: self.ttl,
            options: self.options.clone(),
            _value: PhantomData,
        }
    }
}

impl<V, C> std::fmt::Debug for RedisTier<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTier")
            .field("ttl", &self.ttl)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<V, C> RedisTier<V, C>
where
    C: ConnectionLike + Clone + Send + Sync,
{
    /// Creates a tier over `connection` that keeps real values for `ttl`.
    #[must_use]
    pub fn new(connection: C, ttl: Duration, options: TierOptions) -> Self {
        Self {
            connection,
            ttl,
            options,
            _value: PhantomData,
        }
    }

    /// Returns the options this tier was built with.
    #[must_use]
    pub fn options(&self) -> &TierOptions {
        &self.options
    }

    /// Returns the time-to-live applied to real values.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V, C> CacheTier<V> for RedisTier<V, C>
where
    V: Serialize + DeserializeOwned + Send + Sync,
    C: ConnectionLike + Clone + Send + Sync,
{
    async fn set(&self, key: &str, value: V, is_empty: bool) -> Result<(), Error> {
        let WritePlan::Store { ttl } = self.options.plan_write(is_empty, Some(self.ttl)) else {
            return Ok(());
        };

        let key = self.options.key(key).into_owned();
        let payload = codec::encode(value)?;
        let mut connection = self.connection.clone();

        let written = match codec::expiry_secs(ttl) {
            Some(seconds) => connection.set_ex::<_, _, ()>(key, payload, seconds).await,
            None => connection.set::<_, _, ()>(key, payload).await,
        };
        written.map_err(Error::backend)
    }

    async fn get(&self, key: &str) -> Result<Option<V>, Error> {
        let key = self.options.key(key).into_owned();
        let mut connection = self.connection.clone();

        let payload: Option<Vec<u8>> = connection.get(key).await.map_err(Error::backend)?;
        payload.map(|bytes| codec::decode(&bytes)).transpose()
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        let key = self.options.key(key).into_owned();
        let mut connection = self.connection.clone();

        connection.del::<_, ()>(key).await.map_err(Error::backend)
    }
}
