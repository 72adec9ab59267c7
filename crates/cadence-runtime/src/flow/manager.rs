//! FlowManager - the stage scheduler.

use super::phase::Phase;
use crate::error::FlowError;
use cadence_event::Notification;
use cadence_module::{ModuleError, SessionContext};
use cadence_types::{Reusable, SessionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;
use tracing::debug;

/// Published when the stage pointer moves to the next stage.
///
/// Informational: by the time handlers run, the pointer already points at
/// `to`. Completion of the final stage publishes nothing; observe it
/// through [`FlowManager::is_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAdvanced {
    /// The session whose flow advanced.
    pub session: SessionId,
    /// Stage the flow left.
    pub from: u32,
    /// Stage the flow entered.
    pub to: u32,
}

impl Notification for StageAdvanced {
    fn session(&self) -> SessionId {
        self.session
    }
}

/// Schedules phases across integer-priority stages.
///
/// Stages run in ascending numeric order. Every phase of the current
/// stage is ticked each pass; once all of them are finished the pointer
/// advances to the next configured stage, skipping gaps. When the last
/// stage finishes the flow parks: further ticks do nothing.
///
/// ```text
/// stage 0 ──all finished──► stage 2 ──► stage 5 ──► parked
///   │ tick every phase        │            │
///   ▼ each pass               ▼            ▼
/// [Phase, Phase]            [Phase]      [Phase]
/// ```
///
/// The pointer is monotonic within a round; re-running the flow for
/// another round goes through [`Reusable::init`], which rewinds every
/// phase and the pointer together.
///
/// # Example
///
/// ```
/// use cadence_module::SessionContext;
/// use cadence_runtime::{FlowManager, Phase};
/// use cadence_types::SessionId;
///
/// let session = SessionId::new();
/// let mut ctx = SessionContext::new(session);
///
/// let mut flow = FlowManager::builder()
///     .session(session)
///     .phase(0, Phase::builder().build())
///     .phase(3, Phase::builder().build())
///     .build()?;
///
/// while !flow.is_complete() {
///     flow.tick(&mut ctx)?;
/// }
/// assert_eq!(flow.pointer(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FlowManager {
    session: SessionId,
    flows: BTreeMap<u32, Vec<Phase>>,
    pointer: u32,
    complete: bool,
}

impl FlowManager {
    /// Returns a builder with no stages configured.
    #[must_use]
    pub fn builder() -> FlowManagerBuilder {
        FlowManagerBuilder::new()
    }

    /// Returns the session this flow belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the current stage pointer.
    ///
    /// After the flow parks, the pointer stays on the last stage it ran.
    #[must_use]
    pub fn pointer(&self) -> u32 {
        self.pointer
    }

    /// Returns `true` once every stage has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the configured stages in ascending order.
    #[must_use]
    pub fn stages(&self) -> Vec<u32> {
        self.flows.keys().copied().collect()
    }

    /// Runs one scheduling pass.
    ///
    /// Ticks every phase of the current stage; if they all report
    /// finished, advances the pointer to the next configured stage
    /// (publishing [`StageAdvanced`] on the session bus) or parks the
    /// flow after the last one. A stage with no phases finishes
    /// immediately.
    ///
    /// Returns `true` if the pass advanced the pointer; entering the
    /// parked state after the final stage counts as an advancement.
    /// Returns `false` while the current stage is still running, and on
    /// every pass after the flow parks.
    ///
    /// # Errors
    ///
    /// Propagates the first phase callback failure. The pass stops there
    /// and the pointer does not advance, so the next tick resumes at the
    /// failed transition.
    pub fn tick(&mut self, ctx: &mut SessionContext) -> Result<bool, ModuleError> {
        if self.complete {
            return Ok(false);
        }

        let finished = match self.flows.get_mut(&self.pointer) {
            Some(phases) => {
                let mut all_finished = true;
                for phase in phases.iter_mut() {
                    if !phase.tick(ctx)? {
                        all_finished = false;
                    }
                }
                all_finished
            }
            None => true,
        };

        if finished {
            self.advance(ctx);
        }
        Ok(finished)
    }

    /// Moves the pointer past the current stage.
    fn advance(&mut self, ctx: &mut SessionContext) {
        let from = self.pointer;
        let next = self
            .flows
            .range((Bound::Excluded(from), Bound::Unbounded))
            .next()
            .map(|(stage, _)| *stage);

        match next {
            Some(to) => {
                self.pointer = to;
                debug!(session = %self.session, from, to, "stage advanced");
                ctx.bus.publish(StageAdvanced {
                    session: self.session,
                    from,
                    to,
                });
            }
            None => {
                self.complete = true;
                debug!(session = %self.session, stage = from, "flow complete");
            }
        }
    }
}

impl Reusable for FlowManager {
    /// Rewinds every phase and the pointer for another round.
    fn init(&mut self) {
        for phases in self.flows.values_mut() {
            for phase in phases.iter_mut() {
                phase.init();
            }
        }
        self.pointer = self.flows.keys().next().copied().unwrap_or(0);
        self.complete = false;
    }

    /// Destroys every phase and parks the flow so stray ticks do nothing.
    fn destroy(&mut self) {
        for phases in self.flows.values_mut() {
            for phase in phases.iter_mut() {
                phase.destroy();
            }
        }
        self.complete = true;
    }
}

/// Builder for [`FlowManager`].
///
/// Normally handed to [`Session::new`](crate::Session::new), which binds
/// the session id itself; call [`session`](Self::session) only when
/// building a flow standalone.
pub struct FlowManagerBuilder {
    session: Option<SessionId>,
    flows: BTreeMap<u32, Vec<Phase>>,
}

impl FlowManagerBuilder {
    fn new() -> Self {
        Self {
            session: None,
            flows: BTreeMap::new(),
        }
    }

    /// Binds the flow to a session.
    #[must_use]
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Appends a phase to the given stage, creating the stage if needed.
    ///
    /// Phases within a stage tick in the order they were added.
    #[must_use]
    pub fn phase(mut self, stage: u32, phase: Phase) -> Self {
        self.flows.entry(stage).or_default().push(phase);
        self
    }

    /// Appends several phases to the given stage, in iteration order.
    #[must_use]
    pub fn phases<I>(mut self, stage: u32, phases: I) -> Self
    where
        I: IntoIterator<Item = Phase>,
    {
        self.flows.entry(stage).or_default().extend(phases);
        self
    }

    /// Finalizes the flow, pointing at the lowest configured stage.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::SessionNotBound`] if no session was bound.
    pub fn build(self) -> Result<FlowManager, FlowError> {
        let session = self.session.ok_or(FlowError::SessionNotBound)?;
        let pointer = self.flows.keys().next().copied().unwrap_or(0);
        Ok(FlowManager {
            session,
            flows: self.flows,
            pointer,
            complete: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_types::{ErrorCode, SubscriberId};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A phase already past its end transition.
    fn finished_phase(ctx: &mut SessionContext) -> Phase {
        let mut phase = Phase::builder().build();
        while !phase.tick(ctx).unwrap() {}
        phase
    }

    #[test]
    fn build_without_session_errors() {
        let Err(err) = FlowManager::builder().build() else {
            panic!("building without a session must fail");
        };
        assert_eq!(err.code(), "FLOW_SESSION_NOT_BOUND");
    }

    #[test]
    fn sparse_stages_advance_in_ascending_order() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);

        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, finished_phase(&mut ctx))
            .phase(2, finished_phase(&mut ctx))
            .phase(5, finished_phase(&mut ctx))
            .build()
            .unwrap();

        assert_eq!(flow.stages(), vec![0, 2, 5]);
        assert_eq!(flow.pointer(), 0);

        // One finishing pass per stage, each reporting an advancement.
        assert!(flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 2);
        assert!(flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 5);
        assert!(flow.tick(&mut ctx).unwrap());
        assert!(flow.is_complete());

        // Parked: pointer holds, ticks are no-ops.
        assert!(!flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 5);
    }

    #[test]
    fn advancement_publishes_stage_advanced() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            ctx.bus
                .subscribe(SubscriberId::new(), move |n: &mut StageAdvanced| {
                    seen.borrow_mut().push((n.from, n.to));
                });
        }

        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, finished_phase(&mut ctx))
            .phase(2, finished_phase(&mut ctx))
            .phase(5, finished_phase(&mut ctx))
            .build()
            .unwrap();

        while flow.tick(&mut ctx).unwrap() {}

        // Two advancements; parking after the last stage publishes nothing.
        assert_eq!(*seen.borrow(), vec![(0, 2), (2, 5)]);
    }

    #[test]
    fn single_stage_flow_parks_after_one_finishing_pass() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, finished_phase(&mut ctx))
            .build()
            .unwrap();

        assert!(flow.tick(&mut ctx).unwrap());
        assert!(flow.is_complete());
        assert!(!flow.tick(&mut ctx).unwrap());
    }

    #[test]
    fn unfinished_phase_holds_the_stage() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, Phase::builder().build())
            .phase(1, finished_phase(&mut ctx))
            .build()
            .unwrap();

        // Default phase needs three transitions before the stage finishes;
        // only the finishing pass reports an advancement.
        assert!(!flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 0);
        assert!(!flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 0);
        assert!(flow.tick(&mut ctx).unwrap());
        assert_eq!(flow.pointer(), 1);
    }

    #[test]
    fn stage_waits_for_all_of_its_phases() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, finished_phase(&mut ctx))
            .phase(0, Phase::builder().with_tick(Phase::delay(2)).build())
            .build()
            .unwrap();

        // The delayed sibling keeps the stage open.
        assert!(!flow.tick(&mut ctx).unwrap()); // start
        assert_eq!(flow.pointer(), 0);
        assert!(!flow.tick(&mut ctx).unwrap()); // delay 2 -> 1
        assert!(!flow.tick(&mut ctx).unwrap()); // delay satisfied
        assert!(!flow.is_complete());
        assert!(flow.tick(&mut ctx).unwrap()); // end, stage finishes
        assert!(flow.is_complete());
    }

    #[test]
    fn phase_failure_stops_the_pass_without_advancing() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut fail_once = true;
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(
                0,
                Phase::builder()
                    .with_start(move |_| {
                        if fail_once {
                            fail_once = false;
                            Err(ModuleError::Failed("transient".into()))
                        } else {
                            Ok(())
                        }
                    })
                    .build(),
            )
            .build()
            .unwrap();

        assert!(flow.tick(&mut ctx).is_err());
        assert_eq!(flow.pointer(), 0);

        // Retry succeeds and the flow runs to completion.
        while !flow.is_complete() {
            flow.tick(&mut ctx).unwrap();
        }
    }

    #[test]
    fn init_reruns_the_flow_identically() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(1, Phase::builder().with_tick(Phase::delay(2)).build())
            .phase(4, Phase::builder().build())
            .build()
            .unwrap();

        let run = |flow: &mut FlowManager, ctx: &mut SessionContext| {
            let mut advancements = Vec::new();
            while !flow.is_complete() {
                advancements.push(flow.tick(ctx).unwrap());
            }
            advancements
        };

        let first = run(&mut flow, &mut ctx);
        assert_eq!(flow.pointer(), 4);

        flow.init();
        assert_eq!(flow.pointer(), 1);
        assert!(!flow.is_complete());

        let second = run(&mut flow, &mut ctx);
        assert_eq!(first, second);
        assert_eq!(flow.pointer(), 4);
    }

    #[test]
    fn destroy_parks_the_flow() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder()
            .session(session)
            .phase(0, Phase::builder().build())
            .build()
            .unwrap();

        flow.destroy();
        assert!(!flow.tick(&mut ctx).unwrap());
    }

    #[test]
    fn empty_flow_parks_immediately() {
        let session = SessionId::new();
        let mut ctx = SessionContext::new(session);
        let mut flow = FlowManager::builder().session(session).build().unwrap();

        assert!(flow.tick(&mut ctx).unwrap());
        assert!(flow.is_complete());
        assert!(!flow.tick(&mut ctx).unwrap());
    }
}
