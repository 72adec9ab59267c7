//! Test support: a module that records its hook invocations.
//!
//! Used by this crate's own tests and by downstream crates that need to
//! observe lifecycle ordering without writing a bespoke module each time.

use crate::context::SessionContext;
use crate::error::ModuleError;
use crate::module::Module;
use cadence_types::ModuleKey;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared invocation log, one entry per hook call.
///
/// Entries are `"install:{key}"`, `"tick:{key}"` and `"uninstall:{key}"`
/// in the order the hooks ran.
pub type ProbeLog = Rc<RefCell<Vec<String>>>;

/// Creates an empty [`ProbeLog`].
#[must_use]
pub fn probe_log() -> ProbeLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A module that appends to a shared log whenever a hook runs.
///
/// Hooks can be made to fail for exercising error paths; a failing hook
/// still logs its invocation first.
///
/// # Example
///
/// ```
/// use cadence_module::testing::{probe_log, ProbeModule};
/// use cadence_module::SessionContext;
/// use cadence_types::{ModuleKey, SessionId};
///
/// let log = probe_log();
/// let mut ctx = SessionContext::new(SessionId::new());
///
/// ctx.install(ProbeModule::new(ModuleKey::new("test", "probe"), &log))?;
/// ctx.tick_modules()?;
///
/// assert_eq!(*log.borrow(), vec!["install:test::probe", "tick:test::probe"]);
/// # Ok::<(), cadence_module::ModuleError>(())
/// ```
pub struct ProbeModule {
    key: ModuleKey,
    log: ProbeLog,
    fail_install: bool,
    fail_tick: bool,
    fail_uninstall: bool,
}

impl ProbeModule {
    /// Creates a probe with the given key, logging to `log`.
    #[must_use]
    pub fn new(key: ModuleKey, log: &ProbeLog) -> Self {
        Self {
            key,
            log: Rc::clone(log),
            fail_install: false,
            fail_tick: false,
            fail_uninstall: false,
        }
    }

    /// Makes the install hook fail.
    #[must_use]
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Makes every tick hook fail.
    #[must_use]
    pub fn failing_tick(mut self) -> Self {
        self.fail_tick = true;
        self
    }

    /// Makes the uninstall hook fail.
    #[must_use]
    pub fn failing_uninstall(mut self) -> Self {
        self.fail_uninstall = true;
        self
    }

    fn record(&self, hook: &str, fail: bool) -> Result<(), ModuleError> {
        self.log.borrow_mut().push(format!("{hook}:{}", self.key));
        if fail {
            Err(ModuleError::Failed(format!("{hook} probe failure")))
        } else {
            Ok(())
        }
    }
}

impl Module for ProbeModule {
    fn key(&self) -> ModuleKey {
        self.key
    }

    fn on_install(&mut self, _ctx: &mut SessionContext) -> Result<(), ModuleError> {
        self.record("install", self.fail_install)
    }

    fn on_tick(&mut self, _ctx: &mut SessionContext) -> Result<(), ModuleError> {
        self.record("tick", self.fail_tick)
    }

    fn on_uninstall(&mut self, _ctx: &mut SessionContext) -> Result<(), ModuleError> {
        self.record("uninstall", self.fail_uninstall)
    }
}
