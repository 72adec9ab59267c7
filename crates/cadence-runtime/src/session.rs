//! Session - the composition root.

use crate::error::SessionError;
use crate::flow::{FlowManager, FlowManagerBuilder};
use crate::modules::FlowTickModule;
use cadence_module::SessionContext;
use cadence_types::{Reusable, SessionId};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// One round of the orchestrated process.
///
/// A session owns the flow, the module registry, the event bus and the
/// roster, and is driven entirely by the host's clock:
///
/// 1. [`new`](Self::new) mints a [`SessionId`] and binds the flow to it
/// 2. [`init`](Self::init) arms the flow and installs the flow ticker
/// 3. [`tick`](Self::tick), repeatedly, until the flow completes
/// 4. [`destroy`](Self::destroy) tears everything down
///
/// One session is one round. A destroyed session is done; construct a
/// fresh one for the next round so every round gets a clean registry,
/// bus, roster and id.
///
/// # Example
///
/// ```
/// use cadence_runtime::{FlowManager, Phase, Session};
///
/// let mut session = Session::new(
///     FlowManager::builder().phase(0, Phase::builder().build()),
/// )?;
///
/// session.init()?;
/// while !session.is_flow_complete() {
///     session.tick()?;
/// }
/// session.destroy()?;
/// # Ok::<(), cadence_runtime::SessionError>(())
/// ```
pub struct Session {
    flow: Rc<RefCell<FlowManager>>,
    ctx: SessionContext,
}

impl Session {
    /// Creates a session, minting a fresh id and binding the flow to it.
    ///
    /// Any session previously bound on the builder is replaced; the flow
    /// always belongs to the session that runs it.
    ///
    /// # Errors
    ///
    /// Returns the flow builder's error, wrapped.
    pub fn new(flow: FlowManagerBuilder) -> Result<Self, SessionError> {
        let id = SessionId::new();
        let flow = flow.session(id).build()?;
        info!(session = %id, stages = ?flow.stages(), "session created");

        Ok(Self {
            flow: Rc::new(RefCell::new(flow)),
            ctx: SessionContext::new(id),
        })
    }

    /// Returns this session's id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.ctx.session()
    }

    /// Returns the session's shared state (bus, roster, modules).
    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Mutable access to the session's shared state.
    ///
    /// This is how the host subscribes handlers, installs its own
    /// modules, and manages the roster.
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.ctx
    }

    /// Returns the flow's current stage.
    #[must_use]
    pub fn stage(&self) -> u32 {
        self.flow.borrow().pointer()
    }

    /// Returns `true` once the flow has run every stage.
    #[must_use]
    pub fn is_flow_complete(&self) -> bool {
        self.flow.borrow().is_complete()
    }

    /// Arms the session for its round.
    ///
    /// Rewinds the flow and installs the [`FlowTickModule`] so tick
    /// passes reach it. Call once, after construction.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::AlreadyInstalled`](cadence_module::ModuleError::AlreadyInstalled)
    /// if the session is already initialized.
    pub fn init(&mut self) -> Result<(), SessionError> {
        self.flow.borrow_mut().init();
        self.ctx
            .install(FlowTickModule::new(Rc::clone(&self.flow)))?;
        info!(session = %self.id(), stage = self.stage(), "session initialized");
        Ok(())
    }

    /// Runs one tick: a single pass over the installed modules.
    ///
    /// The flow advances through the flow ticker like any other module.
    ///
    /// # Errors
    ///
    /// The first module hook failure aborts the pass and is returned.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        self.ctx.tick_modules()?;
        Ok(())
    }

    /// Tears the session down.
    ///
    /// Parks the flow, uninstalls every module in installation order,
    /// then clears the bus and the roster. The session is finished
    /// afterwards; the next round gets a fresh one.
    ///
    /// # Errors
    ///
    /// A failing uninstall hook stops the sweep; the bus and roster are
    /// not cleared in that case, so the host can retry.
    pub fn destroy(&mut self) -> Result<(), SessionError> {
        self.flow.borrow_mut().destroy();
        self.ctx.uninstall_all()?;
        self.ctx.bus.unsubscribe_all();
        self.ctx.roster.clear();
        info!(session = %self.id(), "session destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Phase, StageAdvanced};
    use cadence_module::testing::{probe_log, ProbeModule};
    use cadence_types::{ErrorCode, ModuleKey, ParticipantId, SubscriberId};

    fn two_stage_flow() -> FlowManagerBuilder {
        FlowManager::builder()
            .phase(0, Phase::builder().build())
            .phase(3, Phase::builder().build())
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let a = Session::new(FlowManager::builder()).unwrap();
        let b = Session::new(FlowManager::builder()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn init_installs_the_flow_ticker() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        assert!(!session.context().modules().has(FlowTickModule::KEY));

        session.init().unwrap();
        assert!(session.context().modules().has(FlowTickModule::KEY));
        assert_eq!(session.stage(), 0);
    }

    #[test]
    fn double_init_is_rejected() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        session.init().unwrap();

        let err = session.init().unwrap_err();
        assert_eq!(err.code(), "MODULE_ALREADY_INSTALLED");
    }

    #[test]
    fn ticks_drive_the_flow_to_completion() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        session.init().unwrap();

        let mut ticks = 0;
        while !session.is_flow_complete() {
            session.tick().unwrap();
            ticks += 1;
        }

        // Two default phases at three transitions each; the pass that
        // finishes the second stage also parks the flow.
        assert_eq!(ticks, 6);
        assert_eq!(session.stage(), 3);
    }

    #[test]
    fn stage_advancement_reaches_bus_subscribers() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            session
                .context_mut()
                .bus
                .subscribe(SubscriberId::new(), move |n: &mut StageAdvanced| {
                    seen.borrow_mut().push((n.from, n.to));
                });
        }

        session.init().unwrap();
        while !session.is_flow_complete() {
            session.tick().unwrap();
        }

        assert_eq!(*seen.borrow(), vec![(0, 3)]);
    }

    #[test]
    fn host_modules_tick_alongside_the_flow() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        session.init().unwrap();

        let log = probe_log();
        session
            .context_mut()
            .install(ProbeModule::new(ModuleKey::new("host", "probe"), &log))
            .unwrap();

        session.tick().unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["install:host::probe", "tick:host::probe"]
        );
    }

    #[test]
    fn destroy_clears_modules_bus_and_roster() {
        let mut session = Session::new(two_stage_flow()).unwrap();
        session.init().unwrap();

        let log = probe_log();
        session
            .context_mut()
            .install(ProbeModule::new(ModuleKey::new("host", "probe"), &log))
            .unwrap();
        session
            .context_mut()
            .bus
            .subscribe(SubscriberId::new(), |_: &mut StageAdvanced| {});
        session.context_mut().roster.add(ParticipantId::new());

        session.destroy().unwrap();

        let ctx = session.context();
        assert!(ctx.modules().is_empty());
        assert!(ctx.bus.is_empty());
        assert!(ctx.roster.is_empty());
        assert!(session.is_flow_complete());
        assert!(log.borrow().iter().any(|e| e == "uninstall:host::probe"));
    }
}
