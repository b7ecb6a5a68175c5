// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wire encoding of cached values.

use std::time::Duration;

use hybrid_tier::{Error, Warp};
use serde::{Serialize, de::DeserializeOwned};

pub(crate) fn encode<V>(value: V) -> Result<Vec<u8>, Error>
where
    V: Serialize,
{
    serde_json::to_vec(&Warp::new(value)).map_err(Error::backend)
}

pub(crate) fn decode<V>(bytes: &[u8]) -> Result<V, Error>
where
    V: DeserializeOwned,
{
    serde_json::from_slice::<Warp<V>>(bytes).map(Warp::into_inner).map_err(Error::backend)
}

/// Whole seconds for `SET .. EX`, which rejects zero.
///
/// Returns `None` for values that should be stored without expiry.
pub(crate) fn expiry_secs(ttl: Option<Duration>) -> Option<u64> {
    match ttl {
        Some(ttl) if !ttl.is_zero() => Some(ttl.as_secs().max(1)),
        _ => None,
    }
}
