//! Keyed module storage.

use crate::module::Module;
use cadence_types::ModuleKey;
use std::cell::RefCell;
use std::rc::Rc;

/// Ordered, singleton-per-key store of installed modules.
///
/// The registry records insertion order, which is the order the tick pass
/// visits modules in. Mutation goes through
/// [`SessionContext`](crate::SessionContext) so that lifecycle hooks
/// always run; the registry itself only exposes read access.
pub struct ModuleRegistry {
    entries: Vec<(ModuleKey, Rc<RefCell<dyn Module>>)>,
}

impl ModuleRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns `true` if a module with this key is installed.
    #[must_use]
    pub fn has(&self, key: ModuleKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Returns a handle to the installed module with this key.
    ///
    /// The handle stays valid across registry changes; borrowing it while
    /// the module is executing one of its own hooks fails.
    #[must_use]
    pub fn get(&self, key: ModuleKey) -> Option<Rc<RefCell<dyn Module>>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| Rc::clone(m))
    }

    /// Returns installed keys in installation order.
    #[must_use]
    pub fn keys(&self) -> Vec<ModuleKey> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    /// Returns the number of installed modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no modules are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots the current entries in installation order.
    ///
    /// The tick pass iterates a snapshot so that installs and uninstalls
    /// performed by hooks do not affect the pass already in flight.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(ModuleKey, Rc<RefCell<dyn Module>>)> {
        self.entries
            .iter()
            .map(|(k, m)| (*k, Rc::clone(m)))
            .collect()
    }

    pub(crate) fn insert(&mut self, key: ModuleKey, module: Rc<RefCell<dyn Module>>) {
        self.entries.push((key, module));
    }

    pub(crate) fn remove(&mut self, key: ModuleKey) {
        self.entries.retain(|(k, _)| *k != key);
    }
}
