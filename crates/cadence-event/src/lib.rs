//! Notification types and the per-session event bus.
//!
//! This crate defines how parts of a session talk to each other without
//! holding references to one another: a publisher hands a notification
//! value to the session's [`EventBus`], the bus runs every registered
//! handler for that concrete type, and hands the (possibly mutated) value
//! back to the publisher.
//!
//! # Notification Flow
//!
//! ```text
//! ┌───────────┐  publish(n)   ┌───────────┐  &mut n   ┌────────────┐
//! │ Publisher │ ────────────► │  EventBus │ ────────► │ Handlers   │
//! │           │ ◄──────────── │ (session) │           │ (in order) │
//! └───────────┘   returns n   └───────────┘           └────────────┘
//! ```
//!
//! # Design
//!
//! - **Per-session**: each session owns one bus. Handlers registered on
//!   one session's bus never observe another session's notifications.
//! - **Synchronous**: `publish` runs every handler before returning, so
//!   the publisher can read handler decisions (cancellation, edits) off
//!   the returned value immediately.
//! - **Exact-type dispatch**: a handler registered for `N` runs only for
//!   notifications published as `N`. There is no supertype matching.
//!
//! # Example
//!
//! ```
//! use cadence_event::{Cancellable, EventBus, Notification};
//! use cadence_types::{SessionId, SubscriberId};
//!
//! struct JoinAttempt {
//!     session: SessionId,
//!     cancelled: bool,
//! }
//!
//! impl Notification for JoinAttempt {
//!     fn session(&self) -> SessionId {
//!         self.session
//!     }
//! }
//!
//! impl Cancellable for JoinAttempt {
//!     fn is_cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//!     fn set_cancelled(&mut self, cancelled: bool) {
//!         self.cancelled = cancelled;
//!     }
//! }
//!
//! let session = SessionId::new();
//! let mut bus = EventBus::new(session);
//!
//! bus.subscribe(SubscriberId::new(), |n: &mut JoinAttempt| {
//!     n.set_cancelled(true);
//! });
//!
//! let result = bus.publish(JoinAttempt { session, cancelled: false });
//! assert!(result.is_cancelled());
//! ```

mod bus;
mod notification;

pub use bus::EventBus;
pub use notification::{Cancellable, Notification};
