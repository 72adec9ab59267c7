//! The [`Module`] trait.

use crate::context::SessionContext;
use crate::error::ModuleError;
use cadence_types::ModuleKey;

/// A unit of session behavior with an install/tick/uninstall lifecycle.
///
/// Implementations declare a constant [`ModuleKey`] on the type and return
/// it from [`key`](Self::key); the registry uses the key to enforce at
/// most one live module per kind. All three hooks default to no-ops, so a
/// module only implements the phases of the lifecycle it cares about.
///
/// # Hook Contract
///
/// - [`on_install`](Self::on_install) runs once, after the module has
///   been added to the registry. Typical work: subscribe to the bus,
///   seed state from the roster. A failure here rolls the install back.
/// - [`on_tick`](Self::on_tick) runs once per tick pass while installed.
///   A failure aborts the current pass and reaches the host.
/// - [`on_uninstall`](Self::on_uninstall) runs before removal. Typical
///   work: unsubscribe from the bus. A failure leaves the module
///   installed.
///
/// Hooks must not uninstall their own module from inside
/// [`on_tick`](Self::on_tick); doing so yields [`ModuleError::Busy`].
///
/// # Example
///
/// ```
/// use cadence_module::{Module, ModuleError, SessionContext};
/// use cadence_types::{ModuleKey, SubscriberId};
///
/// struct Announcer {
///     subscriber: SubscriberId,
/// }
///
/// impl Announcer {
///     pub const KEY: ModuleKey = ModuleKey::new("host", "announcer");
/// }
///
/// impl Module for Announcer {
///     fn key(&self) -> ModuleKey {
///         Self::KEY
///     }
///
///     fn on_uninstall(&mut self, ctx: &mut SessionContext) -> Result<(), ModuleError> {
///         ctx.bus.unsubscribe(&self.subscriber);
///         Ok(())
///     }
/// }
/// ```
pub trait Module {
    /// Returns this module's registration key.
    ///
    /// Must be constant for the type: every instance of a kind reports
    /// the same key.
    fn key(&self) -> ModuleKey;

    /// Called once when the module is installed into a session.
    fn on_install(&mut self, ctx: &mut SessionContext) -> Result<(), ModuleError> {
        let _ = ctx;
        Ok(())
    }

    /// Called on every tick pass while the module is installed.
    fn on_tick(&mut self, ctx: &mut SessionContext) -> Result<(), ModuleError> {
        let _ = ctx;
        Ok(())
    }

    /// Called once when the module is uninstalled from a session.
    fn on_uninstall(&mut self, ctx: &mut SessionContext) -> Result<(), ModuleError> {
        let _ = ctx;
        Ok(())
    }
}
