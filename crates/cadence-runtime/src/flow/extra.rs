//! Prefabricated phases.

use super::phase::Phase;
use crate::modules::{GateHandle, GateModule};

/// A phase holding the flow at a gate, plus the handle that opens it.
pub struct GatedPhase {
    /// The phase to place into a flow.
    pub phase: Phase,
    /// Opens the gate; clone freely.
    pub gate: GateHandle,
}

/// Builds a phase that holds its stage until the returned gate opens.
///
/// While the phase waits, a [`GateModule`] marker is installed so other
/// modules can see the hold; the phase removes the marker and re-closes
/// the gate as it ends, so the same phase gates again next round.
///
/// # Example
///
/// ```
/// use cadence_module::SessionContext;
/// use cadence_runtime::{gated_phase, FlowManager, GateModule};
/// use cadence_types::SessionId;
///
/// let session = SessionId::new();
/// let mut ctx = SessionContext::new(session);
///
/// let gated = gated_phase();
/// let gate = gated.gate.clone();
/// let mut flow = FlowManager::builder()
///     .session(session)
///     .phase(0, gated.phase)
///     .build()?;
///
/// flow.tick(&mut ctx)?; // phase starts, marker installed
/// flow.tick(&mut ctx)?; // holding
/// assert!(ctx.modules().has(GateModule::KEY));
///
/// gate.open();
/// while !flow.is_complete() {
///     flow.tick(&mut ctx)?;
/// }
/// assert!(!ctx.modules().has(GateModule::KEY));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn gated_phase() -> GatedPhase {
    let gate = GateHandle::new();
    let marker_gate = gate.clone();
    let wait_gate = gate.clone();
    let end_gate = gate.clone();

    let phase = Phase::builder()
        .with_start(move |ctx| ctx.install(GateModule::new(marker_gate.clone())))
        .with_tick(move |_ctx| Ok(wait_gate.is_open()))
        .with_end(move |ctx| {
            ctx.uninstall(GateModule::KEY)?;
            end_gate.close();
            Ok(())
        })
        .build();

    GatedPhase { phase, gate }
}
