//! Unified error interface for GRASP.
//!
//! All GRASP error types implement [`ErrorCode`] to provide:
//!
//! - **Machine-readable codes**: For programmatic error handling
//! - **Recoverability info**: For callers deciding whether to retry
//!
//! # Example
//!
//! ```
//! use grasp_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotRegistered,
//!     Cycle,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotRegistered => "NOT_REGISTERED",
//!             Self::Cycle => "CYCLE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::NotRegistered)
//!     }
//! }
//!
//! assert_eq!(MyError::Cycle.code(), "CYCLE");
//! ```

/// Unified error code interface for GRASP errors.
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"REGISTRY_PENDING_CHANGES"`
/// - **Namespace-prefixed**: e.g., `"GROUP_"`, `"FILTER_"`, `"REGISTRY_"`
/// - **Stable**: Codes should not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable if the caller can take an action that makes
/// a retry succeed (flush pending changes, register the member first).
/// Structural violations such as containment cycles are not recoverable
/// by retrying the same call.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows GRASP conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use grasp_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Pending;
///
/// impl ErrorCode for Pending {
///     fn code(&self) -> &'static str { "REGISTRY_PENDING_CHANGES" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Pending, "REGISTRY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
