//! Notification traits.
//!
//! A notification is a plain value that carries the id of the session it
//! belongs to. Cancellable notifications additionally carry a veto flag
//! that handlers flip and publishers read after dispatch.

use cadence_types::SessionId;

/// A value that can be published on a session's event bus.
///
/// Notifications are owned data, not references into the session: the
/// publisher constructs one, the bus lends it mutably to each handler in
/// turn, and the publisher gets it back when dispatch completes.
///
/// # Session Affinity
///
/// Every notification names the session it concerns. When several
/// sessions run in one process, [`can_handle`](Self::can_handle) is the
/// check that keeps one round's notifications from leaking into another
/// round's handlers; the bus applies it before dispatching.
pub trait Notification: 'static {
    /// Returns the id of the session this notification concerns.
    fn session(&self) -> SessionId;

    /// Returns `true` if this notification concerns the given session.
    fn can_handle(&self, session: SessionId) -> bool {
        self.session() == session
    }
}

/// A notification whose effect can be vetoed by handlers.
///
/// Handlers flip the cancelled flag during dispatch; the publisher reads
/// it off the value returned by `publish` and skips the effect if set.
/// The bus itself never looks at the flag, and dispatch always runs every
/// handler regardless of what earlier handlers decided, so later handlers
/// can un-cancel.
///
/// # Default Cancellation
///
/// The initial flag is chosen by the type's constructor. Most types start
/// not cancelled; opt-in flows (for example admitting a late joiner only
/// when some handler approves) start cancelled so that silence means no.
pub trait Cancellable: Notification {
    /// Returns whether the notification is currently cancelled.
    fn is_cancelled(&self) -> bool;

    /// Sets the cancelled flag.
    fn set_cancelled(&mut self, cancelled: bool);
}
