//! Runtime layer: phases, the stage scheduler, and the session that
//! composes them with the capability registry and the event bus.
//!
//! # Architecture
//!
//! ```text
//!              host tick loop
//!                    │ tick()
//!                    ▼
//! ┌──────────────────────────────────────────────┐
//! │ Session                                      │
//! │  ├─ SessionContext (bus, roster, modules)    │
//! │  │     └─ FlowTickModule ──┐                 │
//! │  └─ FlowManager ◄──────────┘ tick            │
//! │       ├─ stage 0: [Phase, Phase]             │
//! │       ├─ stage 2: [Phase]                    │
//! │       └─ stage 5: [Phase]                    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The host owns the clock: it calls [`Session::tick`] at whatever cadence
//! it likes, and everything else is pulled along. One session tick runs
//! one pass over the installed modules; the bundled [`FlowTickModule`]
//! forwards its tick to the [`FlowManager`], which ticks every phase of
//! the current stage and advances the stage pointer when they all finish.
//!
//! # Example
//!
//! ```
//! use cadence_runtime::{FlowManager, Phase, Session};
//!
//! let flow = FlowManager::builder()
//!     .phase(0, Phase::builder().with_tick(Phase::delay(2)).build())
//!     .phase(1, Phase::builder().build());
//!
//! let mut session = Session::new(flow)?;
//! session.init()?;
//!
//! while !session.is_flow_complete() {
//!     session.tick()?;
//! }
//!
//! session.destroy()?;
//! # Ok::<(), cadence_runtime::SessionError>(())
//! ```

mod error;
mod flow;
mod modules;
mod session;

pub use error::{FlowError, SessionError};
pub use flow::{
    gated_phase, FlowManager, FlowManagerBuilder, GatedPhase, Phase, PhaseBuilder, StageAdvanced,
};
pub use modules::{FlowTickModule, GateHandle, GateModule};
pub use session::Session;
