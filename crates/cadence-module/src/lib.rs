//! Capability layer: the [`Module`] trait, its registry, and the
//! [`SessionContext`] that hooks run against.
//!
//! A module is a unit of session behavior with a lifecycle: it is
//! installed into a session, ticked while installed, and uninstalled when
//! no longer needed. The registry enforces at most one live module per
//! [`ModuleKey`](cadence_types::ModuleKey).
//!
//! # Lifecycle
//!
//! ```text
//!              install(m)            host tick            uninstall(key)
//! ┌─────────┐ ──────────► ┌────────┐ ─────────► ┌───────┐ ─────────────► ┌──────┐
//! │ (none)  │  on_install │ live   │  on_tick   │ live  │  on_uninstall  │(none)│
//! └─────────┘             └────────┘  (repeats) └───────┘                └──────┘
//! ```
//!
//! Hooks receive `&mut SessionContext`, giving them the bus, the roster,
//! and install/uninstall access. Installing during a tick pass is allowed;
//! the newcomer first ticks on the next pass. A module uninstalling itself
//! from inside its own tick hook gets [`ModuleError::Busy`].
//!
//! # Example
//!
//! ```
//! use cadence_module::{Module, ModuleError, SessionContext};
//! use cadence_types::{ModuleKey, SessionId};
//!
//! struct Countdown {
//!     remaining: u64,
//! }
//!
//! impl Countdown {
//!     pub const KEY: ModuleKey = ModuleKey::new("demo", "countdown");
//! }
//!
//! impl Module for Countdown {
//!     fn key(&self) -> ModuleKey {
//!         Self::KEY
//!     }
//!
//!     fn on_tick(&mut self, _ctx: &mut SessionContext) -> Result<(), ModuleError> {
//!         self.remaining = self.remaining.saturating_sub(1);
//!         Ok(())
//!     }
//! }
//!
//! let mut ctx = SessionContext::new(SessionId::new());
//! ctx.install(Countdown { remaining: 3 })?;
//! ctx.tick_modules()?;
//! assert!(ctx.modules().has(Countdown::KEY));
//! # Ok::<(), ModuleError>(())
//! ```

mod context;
mod error;
mod module;
mod registry;
mod roster;
pub mod testing;

pub use context::SessionContext;
pub use error::ModuleError;
pub use module::Module;
pub use registry::ModuleRegistry;
pub use roster::{Presence, Roster};
