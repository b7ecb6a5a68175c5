// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Serialization envelope for cached values.

use serde::{Deserialize, Serialize};

/// A single-field envelope around a cached value.
///
/// Serializing tiers encode `Warp { value }` instead of the bare value. The field is
/// always present in the encoded form, so an absent value (`None`, an empty
/// collection, zero) decodes back to itself and is never confused with a key that
/// was not cached.
///
/// # Examples
///
/// ```
/// use hybrid_tier::Warp;
///
/// let encoded = serde_json::to_string(&Warp::new(None::<String>)).unwrap();
/// assert_eq!(encoded, r#"{"value":null}"#);
///
/// let decoded: Warp<Option<String>> = serde_json::from_str(&encoded).unwrap();
/// assert_eq!(decoded.into_inner(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warp<T> {
    /// The wrapped value.
    pub value: T,
}

impl<T> Warp<T> {
    /// Wraps `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Consumes the envelope and returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> From<T> for Warp<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Record {
        w: String,
    }

    fn round_trip<T>(value: T, expected: &str)
    where
        T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug + Clone,
    {
        let encoded = serde_json::to_string(&Warp::new(value.clone())).expect("encode failed");
        assert_eq!(encoded, expected);

        let decoded: Warp<T> = serde_json::from_str(&encoded).expect("decode failed");
        assert_eq!(decoded.into_inner(), value);
    }

    #[test]
    fn warp_sequence() {
        round_trip(vec!["a".to_string(), "b".to_string(), "c".to_string()], r#"{"value":["a","b","c"]}"#);
    }

    #[test]
    fn warp_map() {
        let map = BTreeMap::from([("a".to_string(), "b".to_string()), ("c".to_string(), "d".to_string())]);
        round_trip(map, r#"{"value":{"a":"b","c":"d"}}"#);
    }

    #[test]
    fn warp_record() {
        round_trip(Record { w: "a".to_string() }, r#"{"value":{"w":"a"}}"#);
    }

    #[test]
    fn warp_present_reference() {
        round_trip(Some(Box::new(Record { w: "a".to_string() })), r#"{"value":{"w":"a"}}"#);
    }

    #[test]
    fn warp_absent_reference_is_explicit_null() {
        round_trip(None::<Box<Record>>, r#"{"value":null}"#);
    }

    #[test]
    fn warp_absent_reference_does_not_decode_to_default_record() {
        let decoded: Warp<Option<Record>> = serde_json::from_str(r#"{"value":null}"#).expect("decode failed");
        assert!(decoded.value.is_none());
    }

    #[test]
    fn warp_primitive() {
        round_trip(12, r#"{"value":12}"#);
    }

    #[test]
    fn warp_zero_values() {
        round_trip(0_i64, r#"{"value":0}"#);
        round_trip(String::new(), r#"{"value":""}"#);
        round_trip(Vec::<u8>::new(), r#"{"value":[]}"#);
    }

    #[test]
    fn missing_field_is_not_an_absent_value() {
        let result: Result<Warp<i32>, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn default_envelope_holds_default_value() {
        let warp = Warp::<Option<String>>::default();
        assert_eq!(warp, Warp::from(None));
    }
}
