//! Reusable lifecycle contract.
//!
//! Phases and flow managers are constructed once and reused across rounds:
//! `init` re-arms internal state, `destroy` releases it. The session layer
//! drives these at round boundaries.

/// An artifact that can be re-armed and torn down across rounds.
///
/// # Contract
///
/// - [`init`](Self::init) puts the artifact back into its pre-run state.
///   It must be safe to call after a completed run (that is what makes the
///   artifact reusable) and before the first run.
/// - [`destroy`](Self::destroy) releases whatever the artifact holds. For
///   stateless artifacts this is a no-op hook.
/// - [`reload`](Self::reload) is destroy-then-init.
///
/// # Example
///
/// ```
/// use cadence_types::Reusable;
///
/// struct Countdown {
///     remaining: u64,
///     length: u64,
/// }
///
/// impl Reusable for Countdown {
///     fn init(&mut self) {
///         self.remaining = self.length;
///     }
///
///     fn destroy(&mut self) {}
/// }
///
/// let mut c = Countdown { remaining: 0, length: 100 };
/// c.init();
/// assert_eq!(c.remaining, 100);
/// ```
pub trait Reusable {
    /// Re-arms the artifact into its pre-run state.
    fn init(&mut self);

    /// Tears the artifact down.
    fn destroy(&mut self);

    /// Destroys then re-initializes the artifact.
    fn reload(&mut self) {
        self.destroy();
        self.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tracker {
        inits: u32,
        destroys: u32,
    }

    impl Reusable for Tracker {
        fn init(&mut self) {
            self.inits += 1;
        }

        fn destroy(&mut self) {
            self.destroys += 1;
        }
    }

    #[test]
    fn reload_is_destroy_then_init() {
        let mut t = Tracker {
            inits: 0,
            destroys: 0,
        };
        t.reload();
        assert_eq!(t.inits, 1);
        assert_eq!(t.destroys, 1);
    }
}
