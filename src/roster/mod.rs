mod configuration;
mod peer_roster;
mod sinful;

pub(crate) use configuration::resolve_replication_peer;
pub(crate) use configuration::Configuration;
pub(crate) use configuration::ControlleeTarget;
pub(crate) use configuration::MESSAGES_PER_INTERVAL_FACTOR;
pub use configuration::ConfigurationError;
pub(crate) use peer_roster::compute_roster;
pub(crate) use peer_roster::PeerRoster;
pub use peer_roster::PeerId;
pub use sinful::PeerAddress;
pub(crate) use sinful::SinfulAddress;

#[cfg(test)]
pub(crate) use configuration::tests;
