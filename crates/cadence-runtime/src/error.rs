//! Runtime errors.

use cadence_module::ModuleError;
use cadence_types::ErrorCode;
use thiserror::Error;

/// Errors from flow construction.
///
/// # Error Codes
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`SessionNotBound`](Self::SessionNotBound) | `FLOW_SESSION_NOT_BOUND` | No |
#[derive(Debug, Error)]
pub enum FlowError {
    /// The flow builder was finalized without a session.
    ///
    /// Normally [`Session::new`](crate::Session::new) binds the session;
    /// this only surfaces when building a [`FlowManager`](crate::FlowManager)
    /// standalone.
    #[error("flow built without a bound session")]
    SessionNotBound,
}

impl ErrorCode for FlowError {
    fn code(&self) -> &'static str {
        match self {
            Self::SessionNotBound => "FLOW_SESSION_NOT_BOUND",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Errors surfaced by session lifecycle operations.
///
/// Wraps the layer that actually failed; [`code`](ErrorCode::code) and
/// [`is_recoverable`](ErrorCode::is_recoverable) delegate to the wrapped
/// error, so hosts can match on codes without unwrapping.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Flow construction failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// A module lifecycle operation failed.
    #[error(transparent)]
    Module(#[from] ModuleError),
}

impl ErrorCode for SessionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Flow(err) => err.code(),
            Self::Module(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Flow(err) => err.is_recoverable(),
            Self::Module(err) => err.is_recoverable(),
        }
    }
}
