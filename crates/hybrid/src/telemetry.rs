// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structured log events emitted by the tier chain.
//!
//! With the `logs` feature disabled every function here compiles to nothing.

use hybrid_tier::Error;

/// Backend operation a log event or an error enrichment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TierOperation {
    Get,
    Set,
    Del,
}

impl TierOperation {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Del => "del",
        }
    }
}

/// A tier failed and the failure did not abort the operation.
///
/// The event stays on one line: the error is logged by kind, with the first line of
/// every cause in its source chain joined into `cause`.
#[inline]
pub(crate) fn tier_error(tier: &str, operation: TierOperation, error: &Error) {
    #[cfg(feature = "logs")]
    tracing::warn!(
        tier,
        operation = operation.as_str(),
        error = error.kind().as_str(),
        cause = %cause_chain(error),
        "hybrid.tier_error"
    );
    #[cfg(not(feature = "logs"))]
    let _ = (tier, operation, error);
}

#[cfg(feature = "logs")]
fn cause_chain(error: &Error) -> String {
    let mut chain = String::new();
    let mut source = std::error::Error::source(error);

    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.is_empty() {
            chain.push_str(": ");
        }
        chain.push_str(text.lines().next().unwrap_or_default());
        source = cause.source();
    }

    chain
}

/// A tier served the value.
#[inline]
pub(crate) fn hit(tier: &str) {
    #[cfg(feature = "logs")]
    tracing::debug!(tier, "hybrid.hit");
    #[cfg(not(feature = "logs"))]
    let _ = tier;
}

/// A value resolved further down the chain was written into a tier.
#[inline]
pub(crate) fn backfill(tier: &str, is_empty: bool) {
    #[cfg(feature = "logs")]
    tracing::debug!(tier, is_empty, "hybrid.backfill");
    #[cfg(not(feature = "logs"))]
    let _ = (tier, is_empty);
}

/// Every tier missed and the compute function is invoked.
#[inline]
pub(crate) fn compute() {
    #[cfg(feature = "logs")]
    tracing::debug!("hybrid.compute");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names() {
        assert_eq!(TierOperation::Get.as_str(), "get");
        assert_eq!(TierOperation::Set.as_str(), "set");
        assert_eq!(TierOperation::Del.as_str(), "del");
    }

    #[cfg(feature = "logs")]
    #[test]
    #[tracing_test::traced_test]
    fn tier_error_is_logged_with_fields() {
        tier_error("redis", TierOperation::Set, &Error::backend("connection reset"));

        assert!(logs_contain("hybrid.tier_error"));
        assert!(logs_contain("tier=\"redis\""));
        assert!(logs_contain("operation=\"set\""));
        assert!(logs_contain("error=\"backend failure\""));
        assert!(logs_contain("cause=connection reset"));
        assert!(!logs_contain("Backtrace"));
    }

    #[cfg(feature = "logs")]
    #[test]
    fn cause_chain_is_single_line() {
        let inner = Error::backend("socket closed");
        let outer = Error::backend(inner);

        let chain = cause_chain(&outer);

        assert!(!chain.contains('\n'), "got: {chain}");
        assert!(chain.contains("socket closed"), "got: {chain}");
        assert_eq!(cause_chain(&Error::miss()), "");
    }

    #[cfg(feature = "logs")]
    #[test]
    #[tracing_test::traced_test]
    fn hits_and_backfills_are_debug_events() {
        hit("local");
        backfill("local", true);
        compute();

        assert!(logs_contain("DEBUG"));
        assert!(logs_contain("hybrid.hit"));
        assert!(logs_contain("hybrid.backfill"));
        assert!(logs_contain("is_empty=true"));
        assert!(logs_contain("hybrid.compute"));
    }
}
