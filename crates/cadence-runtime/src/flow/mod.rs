//! Phases and the stage scheduler.

mod extra;
mod manager;
mod phase;

pub use extra::{gated_phase, GatedPhase};
pub use manager::{FlowManager, FlowManagerBuilder, StageAdvanced};
pub use phase::{Phase, PhaseBuilder};
