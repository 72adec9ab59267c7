//! The module that forwards session ticks to the flow.

use crate::flow::FlowManager;
use cadence_module::{Module, ModuleError, SessionContext};
use cadence_types::ModuleKey;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Bridges the session's tick pass to [`FlowManager::tick`].
///
/// Installed by [`Session::init`](crate::Session::init); the session and
/// this module share the flow. Once the flow parks, the module keeps
/// ticking as a no-op until the session is destroyed.
pub struct FlowTickModule {
    flow: Rc<RefCell<FlowManager>>,
}

impl FlowTickModule {
    /// Registration key for the flow ticker.
    pub const KEY: ModuleKey = ModuleKey::builtin("flow-tick");

    /// Creates the module over a shared flow.
    #[must_use]
    pub fn new(flow: Rc<RefCell<FlowManager>>) -> Self {
        Self { flow }
    }
}

impl Module for FlowTickModule {
    fn key(&self) -> ModuleKey {
        Self::KEY
    }

    fn on_tick(&mut self, ctx: &mut SessionContext) -> Result<(), ModuleError> {
        let advanced = self
            .flow
            .try_borrow_mut()
            .map_err(|_| ModuleError::Busy(Self::KEY))?
            .tick(ctx)?;
        trace!(session = %ctx.session(), advanced, "flow ticked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Phase;
    use cadence_types::SessionId;

    #[test]
    fn module_drives_the_flow_through_tick_passes() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);

        let flow = FlowManager::builder()
            .session(session)
            .phase(0, Phase::builder().build())
            .build()
            .unwrap();
        let flow = Rc::new(RefCell::new(flow));

        ctx.install(FlowTickModule::new(Rc::clone(&flow))).unwrap();

        // start, tick, end, then the finishing pass parks the flow.
        for _ in 0..4 {
            ctx.tick_modules().unwrap();
        }
        assert!(flow.borrow().is_complete());

        // Parked flow: further passes are harmless.
        ctx.tick_modules().unwrap();
    }
}
