//! Unified error interface for the Cadence crates.
//!
//! Every error type in the workspace implements [`ErrorCode`] so that a
//! host embedding the core can handle failures uniformly:
//!
//! - **Machine-readable codes** for programmatic handling and logging
//! - **Recoverability info** for deciding whether a retry can ever help
//!
//! No error in the core is retried internally: every failing operation is
//! a synchronous state check that fails before mutating anything, so the
//! error always reaches the caller that holds the misconfiguration.
//!
//! # Example
//!
//! ```
//! use cadence_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum HostError {
//!     ArenaMissing,
//! }
//!
//! impl ErrorCode for HostError {
//!     fn code(&self) -> &'static str {
//!         "HOST_ARENA_MISSING"
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let err = HostError::ArenaMissing;
//! assert_eq!(err.code(), "HOST_ARENA_MISSING");
//! assert!(!err.is_recoverable());
//! ```

/// Unified error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"MODULE_NOT_INSTALLED"`
/// - **Prefixed by layer**: `MODULE_`, `FLOW_`, plus host-chosen prefixes
/// - **Stable**: codes are an API contract and must not change once defined
///
/// # Recoverability
///
/// Almost every core error is a caller logic bug (installing a capability
/// twice, building a scheduler with no session bound) and is therefore not
/// recoverable: retrying the same call will fail the same way. The
/// exception is failure reported *by* a host-supplied hook, where only the
/// host knows whether the underlying effect is transient.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// UPPER_SNAKE_CASE, prefixed with the owning layer, stable across
    /// versions.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// - `true`: retry may succeed, or the host can take corrective action
    /// - `false`: retry will not help; a code or configuration change is
    ///   required
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows the workspace conventions.
///
/// # Checks
///
/// 1. Code is not empty
/// 2. Code starts with the expected prefix
/// 3. Code is UPPER_SNAKE_CASE
///
/// # Panics
///
/// Panics with a descriptive message if validation fails. Intended for
/// tests covering every variant of an error enum.
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
/// Use this to verify all variants of an error enum in one test.
///
/// # Example
///
/// ```
/// use cadence_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum GateError { Closed, Missing }
///
/// impl ErrorCode for GateError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Closed => "GATE_CLOSED",
///             Self::Missing => "GATE_MISSING",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[GateError::Closed, GateError::Missing], "GATE_");
/// ```
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
