//! Phase - one resettable unit of staged work.

use cadence_module::{ModuleError, SessionContext};
use cadence_types::Reusable;
use std::time::Duration;

type HookFn = Box<dyn FnMut(&mut SessionContext) -> Result<(), ModuleError>>;
type TickFn = Box<dyn FnMut(&mut SessionContext) -> Result<bool, ModuleError>>;

/// A unit of work that starts, ticks until done, then ends.
///
/// A phase moves through three one-way transitions, at most one per tick:
///
/// ```text
/// tick 1        tick 2..n           tick n+1       tick n+2..
/// on_start ──► on_tick until true ──► on_end ──► finished (no-op)
/// ```
///
/// The minimum lifetime is three ticks even when every callback is a
/// default: the start, the first (immediately satisfied) tick, and the
/// end each consume one call. [`tick`](Self::tick) returns `true` from
/// the call that runs `on_end` onward.
///
/// Phases are [`Reusable`]: `init` rewinds the transitions so the same
/// phase can run again next round.
///
/// # Example
///
/// ```
/// use cadence_module::SessionContext;
/// use cadence_runtime::Phase;
/// use cadence_types::SessionId;
///
/// let mut ctx = SessionContext::new(SessionId::new());
/// let mut phase = Phase::builder().with_tick(Phase::delay(2)).build();
///
/// let mut ticks = 0;
/// while !phase.tick(&mut ctx)? {
///     ticks += 1;
/// }
/// assert_eq!(ticks, 3); // start + two delay ticks, finished on the 4th
/// # Ok::<(), cadence_module::ModuleError>(())
/// ```
pub struct Phase {
    on_start: HookFn,
    on_tick: TickFn,
    on_end: HookFn,
    start_done: bool,
    tick_done: bool,
    end_done: bool,
}

impl Phase {
    /// Returns a builder with defaulted callbacks.
    ///
    /// Defaults: start and end do nothing, the tick condition is
    /// immediately satisfied.
    #[must_use]
    pub fn builder() -> PhaseBuilder {
        PhaseBuilder::new()
    }

    /// A tick condition satisfied after the given number of ticks.
    ///
    /// Re-arms itself once satisfied, so a delayed phase stays delayed
    /// when its flow is re-initialized for another round. `delay(0)` is
    /// satisfied on the first tick.
    pub fn delay(ticks: u64) -> impl FnMut(&mut SessionContext) -> Result<bool, ModuleError> {
        let mut remaining = ticks;
        move |_ctx| {
            remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                remaining = ticks;
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }

    /// [`delay`](Self::delay) expressed as wall time at the conventional
    /// 20 Hz host cadence.
    pub fn delay_for(
        duration: Duration,
    ) -> impl FnMut(&mut SessionContext) -> Result<bool, ModuleError> {
        Self::delay(cadence_types::tick::to_ticks(duration))
    }

    /// Advances the phase by at most one transition.
    ///
    /// Returns `true` once the phase has ended; ticking a finished phase
    /// is a no-op that keeps returning `true`.
    ///
    /// # Errors
    ///
    /// Propagates the callback's error. The transition the callback
    /// belonged to is not marked done, so the next tick retries it.
    pub fn tick(&mut self, ctx: &mut SessionContext) -> Result<bool, ModuleError> {
        if self.end_done {
            return Ok(true);
        }

        if !self.start_done {
            (self.on_start)(ctx)?;
            self.start_done = true;
            return Ok(false);
        }

        if !self.tick_done {
            if (self.on_tick)(ctx)? {
                self.tick_done = true;
            }
            return Ok(false);
        }

        (self.on_end)(ctx)?;
        self.end_done = true;
        Ok(true)
    }

    /// Returns `true` if the phase has run its end callback.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_done
    }
}

impl Reusable for Phase {
    fn init(&mut self) {
        self.start_done = false;
        self.tick_done = false;
        self.end_done = false;
    }

    fn destroy(&mut self) {}
}

/// Builder for [`Phase`]. Every callback is optional.
pub struct PhaseBuilder {
    on_start: HookFn,
    on_tick: TickFn,
    on_end: HookFn,
}

impl PhaseBuilder {
    fn new() -> Self {
        Self {
            on_start: Box::new(|_| Ok(())),
            on_tick: Box::new(|_| Ok(true)),
            on_end: Box::new(|_| Ok(())),
        }
    }

    /// Sets the callback run when the phase starts.
    #[must_use]
    pub fn with_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SessionContext) -> Result<(), ModuleError> + 'static,
    {
        self.on_start = Box::new(f);
        self
    }

    /// Sets the tick condition. The phase keeps ticking until it returns
    /// `true`.
    #[must_use]
    pub fn with_tick<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SessionContext) -> Result<bool, ModuleError> + 'static,
    {
        self.on_tick = Box::new(f);
        self
    }

    /// Sets the callback run when the phase ends.
    #[must_use]
    pub fn with_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SessionContext) -> Result<(), ModuleError> + 'static,
    {
        self.on_end = Box::new(f);
        self
    }

    /// Finalizes the phase.
    #[must_use]
    pub fn build(self) -> Phase {
        Phase {
            on_start: self.on_start,
            on_tick: self.on_tick,
            on_end: self.on_end,
            start_done: false,
            tick_done: false,
            end_done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_types::SessionId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx() -> SessionContext {
        SessionContext::new(SessionId::new())
    }

    #[test]
    fn minimal_phase_takes_three_ticks() {
        let mut ctx = ctx();
        let mut phase = Phase::builder().build();

        assert!(!phase.tick(&mut ctx).unwrap()); // start
        assert!(!phase.tick(&mut ctx).unwrap()); // tick condition satisfied
        assert!(phase.tick(&mut ctx).unwrap()); // end
        assert!(phase.tick(&mut ctx).unwrap()); // finished, no-op
        assert!(phase.is_finished());
    }

    #[test]
    fn callbacks_run_in_lifecycle_order() {
        let mut ctx = ctx();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));

        let mut phase = Phase::builder()
            .with_start(move |_| {
                l1.borrow_mut().push("start");
                Ok(())
            })
            .with_tick(move |_| {
                l2.borrow_mut().push("tick");
                Ok(true)
            })
            .with_end(move |_| {
                l3.borrow_mut().push("end");
                Ok(())
            })
            .build();

        while !phase.tick(&mut ctx).unwrap() {}
        assert_eq!(*log.borrow(), vec!["start", "tick", "end"]);

        // Finished phases never re-run callbacks.
        phase.tick(&mut ctx).unwrap();
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn unsatisfied_tick_condition_holds_the_phase() {
        let mut ctx = ctx();
        let mut phase = Phase::builder().with_tick(Phase::delay(3)).build();

        // start, then three delay ticks before the condition holds
        for _ in 0..4 {
            assert!(!phase.tick(&mut ctx).unwrap());
        }
        assert!(phase.tick(&mut ctx).unwrap()); // end
    }

    #[test]
    fn failing_transition_is_retried_next_tick() {
        let mut ctx = ctx();
        let mut attempts = 0;
        let mut phase = Phase::builder()
            .with_start(move |_| {
                attempts += 1;
                if attempts == 1 {
                    Err(ModuleError::Failed("transient".into()))
                } else {
                    Ok(())
                }
            })
            .build();

        assert!(phase.tick(&mut ctx).is_err());
        assert!(!phase.tick(&mut ctx).unwrap()); // start retried, succeeds
        assert!(!phase.tick(&mut ctx).unwrap());
        assert!(phase.tick(&mut ctx).unwrap());
    }

    #[test]
    fn init_rewinds_a_finished_phase() {
        let mut ctx = ctx();
        let runs = Rc::new(RefCell::new(0));
        let r = Rc::clone(&runs);
        let mut phase = Phase::builder()
            .with_end(move |_| {
                *r.borrow_mut() += 1;
                Ok(())
            })
            .build();

        while !phase.tick(&mut ctx).unwrap() {}
        assert_eq!(*runs.borrow(), 1);

        phase.init();
        assert!(!phase.is_finished());
        while !phase.tick(&mut ctx).unwrap() {}
        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn delay_rearms_across_rounds() {
        let mut ctx = ctx();
        let mut phase = Phase::builder().with_tick(Phase::delay(2)).build();

        let count = |phase: &mut Phase, ctx: &mut SessionContext| {
            let mut ticks = 0;
            while !phase.tick(ctx).unwrap() {
                ticks += 1;
            }
            ticks
        };

        let first = count(&mut phase, &mut ctx);
        phase.init();
        let second = count(&mut phase, &mut ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn delay_for_converts_at_host_cadence() {
        let mut ctx = ctx();
        let mut phase = Phase::builder()
            .with_tick(Phase::delay_for(std::time::Duration::from_millis(100)))
            .build();

        // start + 2 ticks of delay, ends on the 4th.
        assert!(!phase.tick(&mut ctx).unwrap());
        assert!(!phase.tick(&mut ctx).unwrap());
        assert!(!phase.tick(&mut ctx).unwrap());
        assert!(phase.tick(&mut ctx).unwrap());
    }
}
