use crate::roster::{PeerAddress, PeerId, PeerRoster};
use std::convert::TryFrom;
use std::time::Duration;

/// How many times per election interval the cycle timer fires. Transitions are evaluated once per
/// interval, messages are (re)sent on every firing.
pub(crate) const MESSAGES_PER_INTERVAL_FACTOR: u32 = 2;

/// connect + start command, per peer.
const TIMEOUTS_PER_SEND: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no HAD peer list in configuration")]
    MissingPeerList,
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("my address '{my_address}' is not present in HAD list '{peer_list}'")]
    SelfNotInPeerList { my_address: String, peer_list: String },
    #[error("my address '{my_address}' appears more than once in HAD list '{peer_list}'")]
    SelfListedMultipleTimes { my_address: String, peer_list: String },
    #[error("illegal options: {0}")]
    IllegalOptions(String),
    #[error("failed to read configuration file '{path}': {reason}")]
    Unreadable { path: String, reason: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ControlleeTarget {
    Master(PeerAddress),
    /// Debug mode: nothing is actually started or stopped.
    StandAlone,
}

/// Configuration is one generation of resolved HAD configuration. It is replaced wholesale on
/// reconfiguration, never patched.
#[derive(Clone, Debug)]
pub(crate) struct Configuration {
    pub my_address: PeerAddress,
    pub name: String,
    pub roster: PeerRoster,
    pub use_primary: bool,
    pub controllee_name: String,
    pub connection_timeout: Duration,
    pub interval_safety: Duration,
    pub update_interval: Duration,
    /// `None` means replication is disabled for this generation.
    pub replication_peer: Option<PeerAddress>,
    pub controllee_target: ControlleeTarget,
    pub collectors: Vec<PeerAddress>,
}

impl Configuration {
    /// The interval is sized so that every peer plus the master can time out within one interval.
    pub(crate) fn election_interval(&self) -> Duration {
        let receivers = u32::try_from(self.roster.other_peers().len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        let time_to_send_all = self
            .connection_timeout
            .saturating_mul(TIMEOUTS_PER_SEND)
            .saturating_mul(receivers);
        time_to_send_all
            .saturating_add(self.interval_safety)
            .saturating_mul(MESSAGES_PER_INTERVAL_FACTOR)
    }

    pub(crate) fn cycle_period(&self) -> Duration {
        self.election_interval() / MESSAGES_PER_INTERVAL_FACTOR
    }

    pub(crate) fn self_id(&self) -> PeerId {
        self.roster.self_id()
    }

    /// `needs_hard_reset()` is true when `self` could change who wins an election compared to the
    /// `running` configuration. Anything else is a soft change.
    pub(crate) fn needs_hard_reset(&self, running: &Configuration) -> bool {
        !self.controllee_name.eq_ignore_ascii_case(&running.controllee_name)
            || self.use_primary != running.use_primary
            || self.roster.self_id() != running.roster.self_id()
            || self.roster.all_peers() != running.roster.all_peers()
    }

    pub(crate) fn log_parameters(&self, logger: &slog::Logger) {
        slog::info!(logger, "** HAD_ID:                 {}", self.roster.self_id());
        slog::info!(logger, "** HAD_CONTROLLEE:         {}", self.controllee_name);
        slog::info!(logger, "** HAD_CYCLE_INTERVAL:     {:?}", self.election_interval());
        slog::info!(logger, "** HAD_CONNECTION_TIMEOUT: {:?}", self.connection_timeout);
        slog::info!(logger, "** HAD_USE_PRIMARY:        {}", self.use_primary);
        slog::info!(logger, "** AM I PRIMARY:           {}", self.roster.is_primary());
        slog::info!(logger, "** HAD_UPDATE_INTERVAL:    {:?}", self.update_interval);
        match &self.replication_peer {
            Some(peer) => slog::info!(logger, "** Replication:            {}", peer),
            None => slog::info!(logger, "** Replication:            off"),
        }
        match &self.controllee_target {
            ControlleeTarget::Master(master) => slog::info!(logger, "** Master:                 {}", master),
            ControlleeTarget::StandAlone => slog::info!(logger, "** Master:                 none (stand alone)"),
        }
        slog::info!(logger, "** HAD_LIST(others only)");
        for peer in self.roster.other_peers() {
            slog::info!(logger, "**    {}", peer);
        }
    }
}

/// `resolve_replication_peer()` picks the replication daemon that sits at our position in the
/// replication list (same reverse-index scheme as the HAD list) and lives on our host. Any failure
/// to find one switches replication off instead of failing the daemon.
pub(crate) fn resolve_replication_peer(
    logger: &slog::Logger,
    replication_list: &[PeerAddress],
    my_address: &PeerAddress,
    self_id: PeerId,
) -> Option<PeerAddress> {
    let count = replication_list.len() as i32;
    let at_my_position = replication_list
        .iter()
        .enumerate()
        .find(|(position, _)| count - 1 - *position as i32 == self_id.as_i32())
        .map(|(_, address)| address);

    match at_my_position {
        Some(candidate) if candidate.same_host(my_address) => {
            slog::info!(logger, "Corresponding replication daemon: {}", candidate);
            Some(candidate.clone())
        }
        Some(candidate) => {
            slog::warn!(
                logger,
                "Host of replication daemon {} does not match my address {}, switching replication off",
                candidate,
                my_address
            );
            None
        }
        None => {
            slog::warn!(
                logger,
                "Local replication daemon not found in replication list, switching replication off"
            );
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::roster::compute_roster;
    use std::net::SocketAddr;

    pub(crate) fn addr(s: &str) -> PeerAddress {
        PeerAddress::new(s.parse::<SocketAddr>().unwrap(), None)
    }

    pub(crate) fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    pub(crate) fn config_for(peers: &[PeerAddress], me: usize, use_primary: bool) -> Configuration {
        Configuration {
            my_address: peers[me].clone(),
            name: format!("had@{}", peers[me]),
            roster: compute_roster(peers, &peers[me], use_primary).unwrap(),
            use_primary,
            controllee_name: "NEGOTIATOR".to_string(),
            connection_timeout: Duration::from_secs(5),
            interval_safety: Duration::from_secs(1),
            update_interval: Duration::from_secs(300),
            replication_peer: None,
            controllee_target: ControlleeTarget::Master(addr("127.0.0.1:9999")),
            collectors: vec![],
        }
    }

    fn abc() -> Vec<PeerAddress> {
        vec![addr("10.0.0.1:9618"), addr("10.0.0.2:9618"), addr("10.0.0.3:9618")]
    }

    #[test]
    fn election_interval() {
        let config = config_for(&abc(), 0, false);
        // (5s * 2 * (2 others + master) + 1s) * 2
        assert_eq!(config.election_interval(), Duration::from_secs(62));
        assert_eq!(config.cycle_period(), Duration::from_secs(31));
    }

    #[test]
    fn election_interval_saturates() {
        let mut config = config_for(&abc(), 0, false);
        config.connection_timeout = Duration::MAX;
        assert_eq!(config.election_interval(), Duration::MAX);
        assert_eq!(config.cycle_period(), Duration::MAX / 2);
    }

    #[test]
    fn identical_configuration_is_soft() {
        let running = config_for(&abc(), 1, true);
        let same = config_for(&abc(), 1, true);
        assert!(!same.needs_hard_reset(&running));
    }

    #[test]
    fn timing_changes_are_soft() {
        let running = config_for(&abc(), 1, false);

        let mut new = config_for(&abc(), 1, false);
        new.connection_timeout = Duration::from_secs(1);
        new.update_interval = Duration::from_secs(10);
        new.replication_peer = Some(addr("10.0.0.2:9620"));
        new.controllee_name = "negotiator".to_string();
        assert!(!new.needs_hard_reset(&running));
    }

    #[test]
    fn identity_changes_are_hard() {
        let running = config_for(&abc(), 1, false);

        let mut controllee = config_for(&abc(), 1, false);
        controllee.controllee_name = "SCHEDD".to_string();
        assert!(controllee.needs_hard_reset(&running));

        let primary = config_for(&abc(), 1, true);
        assert!(primary.needs_hard_reset(&running));

        let mut reordered = abc();
        reordered.swap(0, 2);
        let reordered = config_for(&reordered, 1, false);
        assert_eq!(reordered.self_id(), running.self_id());
        assert!(reordered.needs_hard_reset(&running));

        let mut grown = abc();
        grown.push(addr("10.0.0.4:9618"));
        assert!(config_for(&grown, 1, false).needs_hard_reset(&running));
    }

    #[test]
    fn replication_peer_at_my_position() {
        let logger = test_logger();
        let my_address = addr("10.0.0.2:9618");
        let replication = vec![addr("10.0.0.1:9620"), addr("10.0.0.2:9620"), addr("10.0.0.3:9620")];

        assert_eq!(
            resolve_replication_peer(&logger, &replication, &my_address, PeerId::new(1)),
            Some(addr("10.0.0.2:9620"))
        );
        // Position exists, wrong host.
        assert_eq!(
            resolve_replication_peer(&logger, &replication, &my_address, PeerId::new(2)),
            None
        );
        // List too short for my position.
        assert_eq!(
            resolve_replication_peer(&logger, &replication[..1], &my_address, PeerId::new(1)),
            None
        );
    }

    #[test]
    fn replication_peer_behind_wildcard_listener() {
        let logger = test_logger();
        let my_address = addr("0.0.0.0:9618");
        let replication = vec![addr("127.0.0.1:9620")];

        assert_eq!(
            resolve_replication_peer(&logger, &replication, &my_address, PeerId::new(0)),
            Some(addr("127.0.0.1:9620"))
        );
    }
}
