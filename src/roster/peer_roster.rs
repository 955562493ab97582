use crate::roster::{ConfigurationError, PeerAddress};
use std::convert::TryFrom;
use std::fmt;

/// PeerId is a peer's rank in the configured peer list. The first configured entry gets the
/// highest id, so a statically designated primary (always the first entry) outranks everyone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PeerId(i32);

impl PeerId {
    pub fn new(id: i32) -> Self {
        PeerId(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PeerRoster {
    self_id: PeerId,
    is_primary: bool,
    other_peers: Vec<PeerAddress>,
    all_peers: Vec<PeerAddress>,
}

impl PeerRoster {
    pub(crate) fn self_id(&self) -> PeerId {
        self.self_id
    }

    pub(crate) fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub(crate) fn other_peers(&self) -> &[PeerAddress] {
        &self.other_peers
    }

    pub(crate) fn all_peers(&self) -> &[PeerAddress] {
        &self.all_peers
    }

    /// Position of this node in the configured list.
    pub(crate) fn index(&self) -> i32 {
        self.all_peers.len() as i32 - 1 - self.self_id.as_i32()
    }

    /// The comma separated canonical peer list. Peers compare fingerprints to notice a
    /// configuration rollout that hasn't reached everyone yet.
    pub(crate) fn fingerprint(&self) -> String {
        fingerprint_of(&self.all_peers)
    }
}

pub(crate) fn fingerprint_of(peers: &[PeerAddress]) -> String {
    peers.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",")
}

/// `compute_roster()` assigns ids by reverse position and locates this node in the list. Exactly one
/// entry must point at `my_address`, otherwise our identity is ambiguous and we refuse to run.
pub(crate) fn compute_roster(
    peer_list: &[PeerAddress],
    my_address: &PeerAddress,
    use_primary: bool,
) -> Result<PeerRoster, ConfigurationError> {
    if peer_list.is_empty() {
        return Err(ConfigurationError::MissingPeerList);
    }
    let count = i32::try_from(peer_list.len())
        .map_err(|_| ConfigurationError::IllegalOptions("peer list is absurdly long".to_string()))?;

    let mut self_id = None;
    let mut is_primary = false;
    let mut other_peers = Vec::with_capacity(peer_list.len() - 1);

    for (position, address) in peer_list.iter().enumerate() {
        let id = PeerId::new(count - 1 - position as i32);

        if address.points_to(my_address) {
            if self_id.is_some() {
                return Err(ConfigurationError::SelfListedMultipleTimes {
                    my_address: my_address.to_string(),
                    peer_list: fingerprint_of(peer_list),
                });
            }
            self_id = Some(id);
            is_primary = use_primary && position == 0;
        } else {
            other_peers.push(address.clone());
        }
    }

    let self_id = self_id.ok_or_else(|| ConfigurationError::SelfNotInPeerList {
        my_address: my_address.to_string(),
        peer_list: fingerprint_of(peer_list),
    })?;

    Ok(PeerRoster {
        self_id,
        is_primary,
        other_peers,
        all_peers: peer_list.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn addr(s: &str) -> PeerAddress {
        PeerAddress::new(s.parse::<SocketAddr>().unwrap(), None)
    }

    fn abc() -> Vec<PeerAddress> {
        vec![addr("10.0.0.1:9618"), addr("10.0.0.2:9618"), addr("10.0.0.3:9618")]
    }

    #[test]
    fn ids_are_reverse_positions() {
        let peers = abc();

        let a = compute_roster(&peers, &peers[0], false).unwrap();
        let b = compute_roster(&peers, &peers[1], false).unwrap();
        let c = compute_roster(&peers, &peers[2], false).unwrap();

        assert_eq!(a.self_id(), PeerId::new(2));
        assert_eq!(b.self_id(), PeerId::new(1));
        assert_eq!(c.self_id(), PeerId::new(0));

        assert_eq!(a.index(), 0);
        assert_eq!(c.index(), 2);

        assert_eq!(b.other_peers(), &[peers[0].clone(), peers[2].clone()][..]);
        assert_eq!(b.all_peers(), &peers[..]);
    }

    #[test]
    fn primary_is_first_entry_only() {
        let peers = abc();

        assert!(compute_roster(&peers, &peers[0], true).unwrap().is_primary());
        assert!(!compute_roster(&peers, &peers[1], true).unwrap().is_primary());
        assert!(!compute_roster(&peers, &peers[0], false).unwrap().is_primary());
    }

    #[test]
    fn identity_must_be_unambiguous() {
        let peers = abc();

        match compute_roster(&peers, &addr("10.0.0.9:9618"), false) {
            Err(ConfigurationError::SelfNotInPeerList { .. }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }

        let duplicated = vec![peers[0].clone(), peers[1].clone(), peers[0].clone()];
        match compute_roster(&duplicated, &peers[0], false) {
            Err(ConfigurationError::SelfListedMultipleTimes { .. }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }

        match compute_roster(&[], &peers[0], false) {
            Err(ConfigurationError::MissingPeerList) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fingerprint_is_ordered() {
        let peers = abc();
        let roster = compute_roster(&peers, &peers[1], false).unwrap();
        assert_eq!(
            roster.fingerprint(),
            "<10.0.0.1:9618>,<10.0.0.2:9618>,<10.0.0.3:9618>"
        );
    }
}
