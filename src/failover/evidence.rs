use crate::roster::PeerId;
use crate::transport::PeerCommand;
use std::collections::BTreeSet;

/// EvidenceSet is what we heard from other HADs since the last state evaluation.
#[derive(Debug, Default)]
pub(super) struct EvidenceSet {
    received_alive: BTreeSet<PeerId>,
    received_ballot: BTreeSet<PeerId>,
}

impl EvidenceSet {
    pub(super) fn record(&mut self, command: PeerCommand, sender: PeerId) {
        match command {
            PeerCommand::Alive => self.received_alive.insert(sender),
            PeerCommand::SendId => self.received_ballot.insert(sender),
        };
    }

    pub(super) fn has_alive(&self) -> bool {
        !self.received_alive.is_empty()
    }

    /// Is there a leader that outranks `self_id`?
    pub(super) fn has_alive_above(&self, self_id: PeerId) -> bool {
        self.received_alive.iter().any(|id| *id > self_id)
    }

    /// Is there a candidate that outranks `self_id`?
    pub(super) fn has_ballot_above(&self, self_id: PeerId) -> bool {
        self.received_ballot.iter().any(|id| *id > self_id)
    }

    pub(super) fn clear(&mut self) {
        self.received_alive = BTreeSet::new();
        self.received_ballot = BTreeSet::new();
    }

    #[cfg(test)]
    pub(super) fn is_empty(&self) -> bool {
        self.received_alive.is_empty() && self.received_ballot.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outranking_is_strict() {
        let mut evidence = EvidenceSet::default();
        evidence.record(PeerCommand::Alive, PeerId::new(1));
        evidence.record(PeerCommand::SendId, PeerId::new(0));

        assert!(evidence.has_alive());
        assert!(!evidence.has_alive_above(PeerId::new(1)));
        assert!(evidence.has_alive_above(PeerId::new(0)));
        assert!(!evidence.has_ballot_above(PeerId::new(0)));
        assert!(evidence.has_ballot_above(PeerId::new(-1)));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut evidence = EvidenceSet::default();
        evidence.record(PeerCommand::Alive, PeerId::new(2));
        evidence.record(PeerCommand::SendId, PeerId::new(2));
        assert!(!evidence.is_empty());

        evidence.clear();
        assert!(evidence.is_empty());
        assert!(!evidence.has_alive_above(PeerId::new(0)));
    }
}
