// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for cache operations.

use std::fmt;

/// The category of an [`Error`].
///
/// Categories are what the hybrid cache reacts to. Always inspect them through
/// [`Error::kind`] rather than through the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No record exists for the key.
    Miss,
    /// The resolved value is intentionally empty and may be cached as such.
    EmptyData,
    /// A tier failed to serve the operation.
    Backend,
    /// The compute function failed.
    Compute,
    /// The cache was configured incorrectly.
    Config,
}

impl ErrorKind {
    /// Returns a short static name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miss => "not find cache",
            Self::EmptyData => "empty data",
            Self::Backend => "backend failure",
            Self::Compute => "compute failure",
            Self::Config => "invalid configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error from a cache operation.
///
/// The error carries an [`ErrorKind`] and, for failures, the underlying cause, which
/// stays reachable through [`std::error::Error::source()`] and
/// [`ohno::ErrorExt::find_source`].
///
/// # Examples
///
/// ```
/// use hybrid_tier::{Error, ErrorKind};
///
/// let error = Error::backend("connection refused");
/// assert_eq!(error.kind(), ErrorKind::Backend);
/// assert!(!error.is_miss());
/// ```
#[ohno::error]
#[display("hybrid cache: {kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Creates the error reporting that no record exists for a key.
    #[must_use]
    pub fn miss() -> Self {
        Self::new(ErrorKind::Miss)
    }

    /// Creates the error a compute function returns for an intentionally empty result.
    ///
    /// The hybrid cache backfills the tiers with the value type's default and marks
    /// the write as empty, so that repeated lookups of an absent record do not reach
    /// the compute function again.
    #[must_use]
    pub fn empty_data() -> Self {
        Self::new(ErrorKind::EmptyData)
    }

    /// Creates an error for a tier that failed to serve an operation.
    pub fn backend(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Backend, cause)
    }

    /// Creates an error for a failed compute function.
    pub fn compute(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Compute, cause)
    }

    /// Creates an error for an invalid cache configuration.
    pub fn config(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Config, cause)
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error reports a missing record.
    #[must_use]
    pub fn is_miss(&self) -> bool {
        self.kind == ErrorKind::Miss
    }

    /// Returns `true` if this error reports an intentionally empty result.
    #[must_use]
    pub fn is_empty_data(&self) -> bool {
        self.kind == ErrorKind::EmptyData
    }
}

/// A specialized [`Result`] type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::ErrorExt;

    #[test]
    fn sentinels_are_classified_by_kind() {
        assert!(Error::miss().is_miss());
        assert!(!Error::miss().is_empty_data());
        assert!(Error::empty_data().is_empty_data());
        assert!(!Error::empty_data().is_miss());
        assert_eq!(Error::compute("boom").kind(), ErrorKind::Compute);
        assert_eq!(Error::config("no tiers").kind(), ErrorKind::Config);
    }

    #[test]
    fn error_display_contains_kind_and_cause() {
        let error = Error::backend("connection reset");
        let display_str = format!("{error}");
        assert!(
            display_str.contains("backend failure"),
            "display output should contain the kind, got: {display_str}"
        );
        assert!(
            display_str.contains("connection reset"),
            "display output should contain the cause message, got: {display_str}"
        );
    }

    #[test]
    fn error_debug_contains_cause_message() {
        let error = Error::compute("database unavailable");
        let debug_str = format!("{error:?}");
        assert!(
            debug_str.contains("database unavailable"),
            "debug output should contain the cause message, got: {debug_str}"
        );
    }

    #[test]
    fn cause_is_reachable_through_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let error = Error::backend(io);

        let found = error.find_source::<std::io::Error>().expect("io error should be in the chain");
        assert_eq!(found.kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn result_type_alias_propagates_errors() {
        fn returns_err() -> Result<i32> {
            Err(Error::miss())
        }

        let err = returns_err().expect_err("should return an error");
        assert!(err.is_miss());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ErrorKind::Miss.to_string(), "not find cache");
        assert_eq!(ErrorKind::EmptyData.to_string(), "empty data");
        assert_eq!(ErrorKind::Backend.as_str(), "backend failure");
    }
}
