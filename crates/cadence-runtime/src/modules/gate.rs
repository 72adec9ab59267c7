//! Stage gate: host-controlled hold on flow advancement.

use cadence_module::Module;
use cadence_types::ModuleKey;
use std::cell::Cell;
use std::rc::Rc;

/// Cloneable handle to a gate's open flag.
///
/// Cheap to clone; all clones observe the same flag. The host keeps one
/// clone and calls [`open`](Self::open) when its external condition is
/// met (an admin command, enough participants, a vote passing).
#[derive(Clone, Default)]
pub struct GateHandle(Rc<Cell<bool>>);

impl GateHandle {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate, letting the gated phase finish its wait.
    pub fn open(&self) {
        self.0.set(true);
    }

    /// Closes the gate again.
    ///
    /// [`gated_phase`](crate::gated_phase) does this as the phase ends,
    /// so the gate is re-armed for the next round.
    pub fn close(&self) {
        self.0.set(false);
    }

    /// Returns whether the gate is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.0.get()
    }
}

/// Marker module installed while a gated phase is waiting.
///
/// Lets the rest of the session observe "the flow is holding at a gate"
/// through the registry. Installed by the gated phase's start and removed
/// by its end; it has no hooks of its own.
pub struct GateModule {
    gate: GateHandle,
}

impl GateModule {
    /// Registration key for the gate marker.
    pub const KEY: ModuleKey = ModuleKey::builtin("gate");

    /// Creates the marker over the gate it represents.
    #[must_use]
    pub fn new(gate: GateHandle) -> Self {
        Self { gate }
    }

    /// Returns a handle to the gate this marker represents.
    #[must_use]
    pub fn handle(&self) -> GateHandle {
        self.gate.clone()
    }
}

impl Module for GateModule {
    fn key(&self) -> ModuleKey {
        Self::KEY
    }
}
