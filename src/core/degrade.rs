//! Graceful degradation for content API results.
//!
//! Every retrieval in the content service goes through one of these
//! combinators, so each call site names its fallback explicitly and every
//! failure is logged exactly once.

use tracing::warn;

use crate::adapters::FetchError;

/// Log a failed call that is about to be replaced by fallback data
pub fn log_degraded(operation: &str, error: &FetchError) {
    warn!(
        operation,
        kind = error.kind(),
        error = %error,
        "Content API call failed, using fallback"
    );
}

/// Turn a `Result<T, FetchError>` into a `T`
pub trait Degrade<T> {
    /// Return the value, or log and return `fallback()`
    fn unwrap_or_fallback(self, operation: &str, fallback: impl FnOnce() -> T) -> T;

    /// Return the value, or log and return `T::default()`
    fn unwrap_or_empty(self, operation: &str) -> T
    where
        T: Default;
}

impl<T> Degrade<T> for Result<T, FetchError> {
    fn unwrap_or_fallback(self, operation: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                log_degraded(operation, &e);
                fallback()
            }
        }
    }

    fn unwrap_or_empty(self, operation: &str) -> T
    where
        T: Default,
    {
        self.unwrap_or_fallback(operation, T::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_passes_through() {
        let result: Result<Vec<u32>, FetchError> = Ok(vec![1, 2]);
        assert_eq!(result.unwrap_or_fallback("op", || vec![9]), vec![1, 2]);
    }

    #[test]
    fn test_err_uses_fallback() {
        let result: Result<Vec<u32>, FetchError> =
            Err(FetchError::Unavailable("down".to_string()));
        assert_eq!(result.unwrap_or_fallback("op", || vec![9]), vec![9]);

        let result: Result<Vec<u32>, FetchError> = Err(FetchError::NotFound("x".to_string()));
        assert!(result.unwrap_or_empty("op").is_empty());
    }
}
