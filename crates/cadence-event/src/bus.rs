//! EventBus - synchronous per-session notification dispatch.
//!
//! One bus per session. Handlers are registered under a [`SubscriberId`]
//! and keyed by the concrete notification type; publishing a value runs
//! every matching handler in registration order and returns the value to
//! the publisher.
//!
//! # Dispatch Rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Ordering | Handlers run in registration order |
//! | Typing | Exact concrete type only, no supertype matching |
//! | Affinity | Notifications for another session are not dispatched |
//! | Mutation | Each handler sees all earlier handlers' mutations |
//! | No handlers | Value is returned unchanged |

use crate::notification::Notification;
use cadence_types::{SessionId, SubscriberId};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// One registered handler, tagged with the subscriber that owns it.
struct Registration {
    subscriber: SubscriberId,
    handler: Box<dyn FnMut(&mut dyn Any)>,
}

/// Synchronous notification bus scoped to a single session.
///
/// The bus is the only coupling point between a session's parts: phases,
/// capabilities, and the host all talk through it without holding
/// references to each other. A capability typically subscribes during its
/// install hook and calls [`unsubscribe`](Self::unsubscribe) with its own
/// [`SubscriberId`] during uninstall.
///
/// # Example
///
/// ```
/// use cadence_event::{EventBus, Notification};
/// use cadence_types::{SessionId, SubscriberId};
///
/// struct ScoreChanged {
///     session: SessionId,
///     delta: i32,
/// }
///
/// impl Notification for ScoreChanged {
///     fn session(&self) -> SessionId {
///         self.session
///     }
/// }
///
/// let session = SessionId::new();
/// let mut bus = EventBus::new(session);
///
/// bus.subscribe(SubscriberId::new(), |n: &mut ScoreChanged| {
///     n.delta *= 2;
/// });
///
/// let seen = bus.publish(ScoreChanged { session, delta: 5 });
/// assert_eq!(seen.delta, 10);
/// ```
pub struct EventBus {
    session: SessionId,
    /// Registration order within each type's vec is dispatch order.
    handlers: HashMap<TypeId, Vec<Registration>>,
}

impl EventBus {
    /// Creates a bus for the given session.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            handlers: HashMap::new(),
        }
    }

    /// Returns the session this bus belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Registers a handler for notifications of type `N`.
    ///
    /// Multiple handlers may be registered for the same type, by the same
    /// or different subscribers; they run in registration order. One
    /// subscriber may register handlers for any number of types and
    /// detach them all at once with [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<N, F>(&mut self, subscriber: SubscriberId, mut handler: F)
    where
        N: Notification,
        F: FnMut(&mut N) + 'static,
    {
        debug!(
            session = %self.session,
            subscriber = %subscriber,
            notification = std::any::type_name::<N>(),
            "handler subscribed"
        );

        self.handlers
            .entry(TypeId::of::<N>())
            .or_default()
            .push(Registration {
                subscriber,
                handler: Box::new(move |any: &mut dyn Any| {
                    if let Some(n) = any.downcast_mut::<N>() {
                        handler(n);
                    }
                }),
            });
    }

    /// Publishes a notification and returns it after dispatch.
    ///
    /// Runs every handler registered for the concrete type `N`, in
    /// registration order, each seeing the mutations of those before it.
    /// The returned value carries whatever the handlers did to it; for
    /// cancellable notifications this is where the publisher reads the
    /// verdict.
    ///
    /// A notification for a different session is returned unchanged
    /// without dispatching, as is one with no registered handlers.
    pub fn publish<N: Notification>(&mut self, mut notification: N) -> N {
        if !notification.can_handle(self.session) {
            trace!(
                session = %self.session,
                notification_session = %notification.session(),
                notification = std::any::type_name::<N>(),
                "notification for another session, skipping dispatch"
            );
            return notification;
        }

        if let Some(registrations) = self.handlers.get_mut(&TypeId::of::<N>()) {
            trace!(
                session = %self.session,
                notification = std::any::type_name::<N>(),
                handlers = registrations.len(),
                "dispatching notification"
            );

            let any: &mut dyn Any = &mut notification;
            for registration in registrations.iter_mut() {
                (registration.handler)(any);
            }
        }

        notification
    }

    /// Removes every handler registered under the given subscriber.
    ///
    /// No-op if the subscriber never registered anything.
    pub fn unsubscribe(&mut self, subscriber: &SubscriberId) {
        for registrations in self.handlers.values_mut() {
            registrations.retain(|r| r.subscriber != *subscriber);
        }
        self.handlers.retain(|_, v| !v.is_empty());

        debug!(session = %self.session, subscriber = %subscriber, "subscriber detached");
    }

    /// Removes all handlers. Called during session teardown.
    pub fn unsubscribe_all(&mut self) {
        self.handlers.clear();
        debug!(session = %self.session, "all subscribers detached");
    }

    /// Returns the number of handlers registered for type `N`.
    #[must_use]
    pub fn handler_count<N: Notification>(&self) -> usize {
        self.handlers
            .get(&TypeId::of::<N>())
            .map_or(0, Vec::len)
    }

    /// Returns `true` if no handlers are registered for any type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
