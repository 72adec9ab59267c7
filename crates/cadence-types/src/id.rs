//! Identifier types for the Cadence core.
//!
//! Session-scoped identifiers are UUID-based; capability identity is a
//! constant registration key declared by each capability kind.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one session (one run of the orchestrated process).
///
/// A session is a single round of the staged flow: it is constructed,
/// initialized, ticked by the host until its flow completes, then
/// destroyed. Every notification published on a session's bus carries the
/// session's id so that subscribers can reject notifications leaked from
/// another session sharing the same process.
///
/// # Example
///
/// ```
/// use cadence_types::SessionId;
///
/// let a = SessionId::new();
/// let b = SessionId::new();
///
/// assert_ne!(a, b);  // every round gets a fresh identity
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl SessionId {
    /// Creates a new [`SessionId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: SessionId intentionally does NOT implement Default.
// A defaulted id would not belong to any constructed session; ids are
// minted by Session construction (or explicitly by tests).

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// Stable opaque identifier for a tracked participant.
///
/// The core never resolves what a participant *is* — the host maps this id
/// to its own player/user handle and answers online/offline queries through
/// the `Presence` seam in `cadence-module`.
///
/// # Example
///
/// ```
/// use cadence_types::ParticipantId;
///
/// let p = ParticipantId::new();
/// println!("tracked: {p}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Creates a new [`ParticipantId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

/// Identity of one bus subscriber.
///
/// A subscriber (typically a capability) registers handlers for any number
/// of notification types under a single [`SubscriberId`]; unsubscribing by
/// id removes all of them at once, which is how a capability detaches from
/// the bus during its uninstall hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Creates a new [`SubscriberId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscriber:{}", self.0)
    }
}

/// Registration key for a capability kind.
///
/// A capability registry holds at most one live capability per key; two
/// instances of the same kind share the same key and are "the same
/// capability" as far as the registry is concerned. Keys are declared as
/// constants by each capability kind, so singleton enforcement is a value
/// comparison — no runtime type introspection.
///
/// # Declaring a key
///
/// ```
/// use cadence_types::ModuleKey;
///
/// struct ScoreboardModule;
///
/// impl ScoreboardModule {
///     pub const KEY: ModuleKey = ModuleKey::new("host", "scoreboard");
/// }
///
/// assert_eq!(ScoreboardModule::KEY.fqn(), "host::scoreboard");
/// assert!(!ScoreboardModule::KEY.is_builtin());
/// ```
///
/// # Namespaces
///
/// - `builtin` — capabilities bundled with the runtime (e.g. the flow
///   ticker, the stage gate)
/// - anything else — host-defined capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleKey {
    /// Namespace (e.g. "builtin", or a host-chosen prefix).
    pub namespace: &'static str,
    /// Capability name within the namespace.
    pub name: &'static str,
}

impl ModuleKey {
    /// Creates a key in an arbitrary namespace.
    ///
    /// Declare these as `const` on the capability type so every instance
    /// of the kind reports the same key.
    #[must_use]
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }

    /// Creates a key in the `builtin` namespace.
    ///
    /// # Example
    ///
    /// ```
    /// use cadence_types::ModuleKey;
    ///
    /// let key = ModuleKey::builtin("flow-tick");
    /// assert!(key.is_builtin());
    /// ```
    #[must_use]
    pub const fn builtin(name: &'static str) -> Self {
        Self {
            namespace: "builtin",
            name,
        }
    }

    /// Returns the fully qualified name in `namespace::name` format.
    #[must_use]
    pub fn fqn(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    /// Returns `true` if this key lives in the `builtin` namespace.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.namespace == "builtin"
    }

    /// Checks if this key matches the given namespace and name.
    #[must_use]
    pub fn matches(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }
}

impl std::fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_display_prefix() {
        let id = SessionId::new();
        assert!(id.to_string().starts_with("session:"));
    }

    #[test]
    fn participant_id_roundtrips_uuid() {
        let id = ParticipantId::new();
        assert_eq!(id.uuid(), id.0);
    }

    #[test]
    fn subscriber_ids_are_unique() {
        assert_ne!(SubscriberId::new(), SubscriberId::new());
    }

    #[test]
    fn module_key_equality_is_by_value() {
        const A: ModuleKey = ModuleKey::builtin("flow-tick");
        let b = ModuleKey::builtin("flow-tick");
        let c = ModuleKey::new("host", "flow-tick");

        assert_eq!(A, b);
        assert_ne!(A, c);
    }

    #[test]
    fn module_key_fqn_and_namespace() {
        let key = ModuleKey::new("host", "scoreboard");
        assert_eq!(key.fqn(), "host::scoreboard");
        assert!(!key.is_builtin());
        assert!(key.matches("host", "scoreboard"));
        assert!(!key.matches("builtin", "scoreboard"));
    }

    #[test]
    fn module_key_display_matches_fqn() {
        let key = ModuleKey::builtin("gate");
        assert_eq!(key.to_string(), key.fqn());
    }
}
