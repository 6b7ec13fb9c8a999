//! Filter pipeline errors.

use grasp_types::ErrorCode;
use thiserror::Error;

/// Errors from target filter mutations.
#[derive(Debug, Error)]
pub enum FilterError {
    /// An evaluator index was outside the chain.
    #[error("evaluator index {index} out of range (chain length {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The chain length at call time.
        len: usize,
    },
}

impl ErrorCode for FilterError {
    fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "FILTER_INDEX_OUT_OF_RANGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The caller passed a stale index; retrying with a valid one succeeds.
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_types::assert_error_codes;

    #[test]
    fn error_codes() {
        assert_error_codes(&[FilterError::IndexOutOfRange { index: 3, len: 1 }], "FILTER_");
    }

    #[test]
    fn recoverable() {
        assert!(FilterError::IndexOutOfRange { index: 0, len: 0 }.is_recoverable());
    }
}
