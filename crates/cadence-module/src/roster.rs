//! Participant tracking.

use cadence_types::ParticipantId;

/// Host-side answer to "is this participant currently reachable".
///
/// The core never knows what a participant is; the host implements this
/// seam over its own connection or player state. Used by
/// [`Roster::online`] to filter the tracked set.
pub trait Presence {
    /// Returns `true` if the participant is currently online.
    fn is_online(&self, participant: ParticipantId) -> bool;
}

/// The set of participants tracked by one session.
///
/// Insertion-ordered and duplicate-free. The roster tracks identity only;
/// whether a tracked participant is reachable is the host's call through
/// the [`Presence`] seam.
#[derive(Default)]
pub struct Roster {
    participants: Vec<ParticipantId>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant. Returns `false` if already tracked.
    pub fn add(&mut self, participant: ParticipantId) -> bool {
        if self.contains(participant) {
            return false;
        }
        self.participants.push(participant);
        true
    }

    /// Removes a participant. Returns `false` if not tracked.
    pub fn remove(&mut self, participant: ParticipantId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| *p != participant);
        self.participants.len() != before
    }

    /// Returns `true` if the participant is tracked.
    #[must_use]
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&participant)
    }

    /// Returns tracked participants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().copied()
    }

    /// Returns tracked participants the host reports as online.
    #[must_use]
    pub fn online(&self, presence: &dyn Presence) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .copied()
            .filter(|p| presence.is_online(*p))
            .collect()
    }

    /// Returns the number of tracked participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns `true` if no participants are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Removes all participants. Called during session teardown.
    pub fn clear(&mut self) {
        self.participants.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedPresence(HashSet<ParticipantId>);

    impl Presence for FixedPresence {
        fn is_online(&self, participant: ParticipantId) -> bool {
            self.0.contains(&participant)
        }
    }

    #[test]
    fn add_deduplicates() {
        let mut roster = Roster::new();
        let p = ParticipantId::new();

        assert!(roster.add(p));
        assert!(!roster.add(p));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn remove_untracked_is_noop() {
        let mut roster = Roster::new();
        assert!(!roster.remove(ParticipantId::new()));
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let mut roster = Roster::new();
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        roster.add(a);
        roster.add(b);

        let order: Vec<_> = roster.iter().collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn online_filters_through_presence() {
        let mut roster = Roster::new();
        let here = ParticipantId::new();
        let gone = ParticipantId::new();
        roster.add(here);
        roster.add(gone);

        let presence = FixedPresence(HashSet::from([here]));
        assert_eq!(roster.online(&presence), vec![here]);
    }

    #[test]
    fn clear_empties_the_roster() {
        let mut roster = Roster::new();
        roster.add(ParticipantId::new());
        roster.clear();
        assert!(roster.is_empty());
    }
}
