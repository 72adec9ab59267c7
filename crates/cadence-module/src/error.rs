//! Module lifecycle errors.

use cadence_types::{ErrorCode, ModuleKey};
use thiserror::Error;

/// Errors from module installation, ticking and removal.
///
/// # Error Codes
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`AlreadyInstalled`](Self::AlreadyInstalled) | `MODULE_ALREADY_INSTALLED` | No |
/// | [`NotInstalled`](Self::NotInstalled) | `MODULE_NOT_INSTALLED` | No |
/// | [`Busy`](Self::Busy) | `MODULE_BUSY` | No |
/// | [`Failed`](Self::Failed) | `MODULE_FAILED` | Yes |
///
/// Only [`Failed`](Self::Failed) is recoverable: it wraps a failure
/// reported by the module's own hook, and only the module knows whether
/// the underlying effect is transient. The other three are caller logic
/// bugs that will fail the same way on retry.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A module with this key is already installed in the session.
    #[error("module already installed: {0}")]
    AlreadyInstalled(ModuleKey),

    /// No module with this key is installed in the session.
    #[error("module not installed: {0}")]
    NotInstalled(ModuleKey),

    /// The module is currently executing one of its own hooks.
    ///
    /// Raised when a module is uninstalled from inside its own tick hook.
    /// Defer the removal to the host or to another module instead.
    #[error("module busy: {0}")]
    Busy(ModuleKey),

    /// A module hook reported failure.
    #[error("module hook failed: {0}")]
    Failed(String),
}

impl ErrorCode for ModuleError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInstalled(_) => "MODULE_ALREADY_INSTALLED",
            Self::NotInstalled(_) => "MODULE_NOT_INSTALLED",
            Self::Busy(_) => "MODULE_BUSY",
            Self::Failed(_) => "MODULE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_types::assert_error_codes;

    #[test]
    fn error_codes_follow_convention() {
        let key = ModuleKey::builtin("probe");
        assert_error_codes(
            &[
                ModuleError::AlreadyInstalled(key),
                ModuleError::NotInstalled(key),
                ModuleError::Busy(key),
                ModuleError::Failed("hook".into()),
            ],
            "MODULE_",
        );
    }

    #[test]
    fn only_hook_failure_is_recoverable() {
        let key = ModuleKey::builtin("probe");
        assert!(!ModuleError::AlreadyInstalled(key).is_recoverable());
        assert!(!ModuleError::NotInstalled(key).is_recoverable());
        assert!(!ModuleError::Busy(key).is_recoverable());
        assert!(ModuleError::Failed("transient".into()).is_recoverable());
    }

    #[test]
    fn display_names_the_key() {
        let key = ModuleKey::new("host", "scoreboard");
        let err = ModuleError::AlreadyInstalled(key);
        assert!(err.to_string().contains("host::scoreboard"));
    }
}
