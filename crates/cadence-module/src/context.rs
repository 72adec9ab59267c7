//! SessionContext - the mutable state every hook runs against.

use crate::error::ModuleError;
use crate::module::Module;
use crate::registry::ModuleRegistry;
use crate::roster::Roster;
use cadence_event::EventBus;
use cadence_types::{ModuleKey, SessionId};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Shared state of one session, threaded through every module hook.
///
/// The context owns the session's bus, roster and module registry. It is
/// handed to hooks as `&mut`, so a hook can publish notifications, mutate
/// the roster, and install or uninstall modules while it runs.
///
/// # Tick Pass
///
/// [`tick_modules`](Self::tick_modules) visits a snapshot of the registry
/// in installation order. Modules installed during the pass are first
/// visited on the next pass; modules uninstalled during the pass still
/// receive their tick for the pass in flight.
pub struct SessionContext {
    session: SessionId,
    /// The session's notification bus.
    pub bus: EventBus,
    /// Participants tracked by this session.
    pub roster: Roster,
    modules: ModuleRegistry,
}

impl SessionContext {
    /// Creates a context for the given session with an empty registry,
    /// roster and bus.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            bus: EventBus::new(session),
            roster: Roster::new(),
            modules: ModuleRegistry::new(),
        }
    }

    /// Returns the id of the session this context belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns read access to the installed modules.
    #[must_use]
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Installs a module and runs its install hook.
    ///
    /// The module is visible in the registry while its own
    /// [`on_install`](Module::on_install) runs. If the hook fails, the
    /// module is removed again and the hook's error is returned.
    ///
    /// # Errors
    ///
    /// - [`ModuleError::AlreadyInstalled`] if a module with the same key
    ///   is live in this session
    /// - any error returned by the module's install hook
    pub fn install<M: Module + 'static>(&mut self, module: M) -> Result<(), ModuleError> {
        let key = module.key();
        if self.modules.has(key) {
            return Err(ModuleError::AlreadyInstalled(key));
        }

        let cell: Rc<RefCell<dyn Module>> = Rc::new(RefCell::new(module));
        self.modules.insert(key, Rc::clone(&cell));

        let result = cell
            .try_borrow_mut()
            .map_err(|_| ModuleError::Busy(key))
            .and_then(|mut module| module.on_install(self));

        if let Err(err) = result {
            self.modules.remove(key);
            return Err(err);
        }

        debug!(session = %self.session, module = %key, "module installed");
        Ok(())
    }

    /// Uninstalls the module with the given key after running its
    /// uninstall hook.
    ///
    /// If the hook fails the module stays installed.
    ///
    /// # Errors
    ///
    /// - [`ModuleError::NotInstalled`] if no module with this key is live
    /// - [`ModuleError::Busy`] if the module is inside one of its own
    ///   hooks, which is what a self-uninstall from `on_tick` looks like
    /// - any error returned by the module's uninstall hook
    pub fn uninstall(&mut self, key: ModuleKey) -> Result<(), ModuleError> {
        let cell = self
            .modules
            .get(key)
            .ok_or(ModuleError::NotInstalled(key))?;

        cell.try_borrow_mut()
            .map_err(|_| ModuleError::Busy(key))?
            .on_uninstall(self)?;

        self.modules.remove(key);
        debug!(session = %self.session, module = %key, "module uninstalled");
        Ok(())
    }

    /// Uninstalls every module, in installation order.
    ///
    /// Modules already removed by an earlier hook in the same sweep are
    /// skipped. Stops at the first hook failure.
    pub fn uninstall_all(&mut self) -> Result<(), ModuleError> {
        for key in self.modules.keys() {
            if self.modules.has(key) {
                self.uninstall(key)?;
            }
        }
        Ok(())
    }

    /// Runs one tick pass over all installed modules.
    ///
    /// Visits a snapshot of the registry in installation order and calls
    /// each module's [`on_tick`](Module::on_tick). Stops at the first
    /// hook failure; modules later in the order are not ticked that pass.
    pub fn tick_modules(&mut self) -> Result<(), ModuleError> {
        for (key, cell) in self.modules.snapshot() {
            cell.try_borrow_mut()
                .map_err(|_| ModuleError::Busy(key))?
                .on_tick(self)?;
        }
        Ok(())
    }
}
