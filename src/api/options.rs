use crate::roster::{
    compute_roster, resolve_replication_peer, Configuration, ConfigurationError, ControlleeTarget, PeerAddress,
    SinfulAddress,
};
use std::convert::TryFrom;
use tokio::time::Duration;

const DEFAULT_CONTROLLEE: &str = "NEGOTIATOR";
// Longer periods are configuration mistakes, and timer arithmetic stays far from overflow.
const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// HadOptions is one reading of the HAD configuration. Unset values get defaults.
#[derive(Clone, Debug, Default)]
pub struct HadOptions {
    /// Ordered HAD peer list, this daemon included. The first entry gets the highest id.
    pub had_list: Vec<String>,
    pub use_primary: bool,
    pub controllee: Option<String>,
    pub connection_timeout: Option<Duration>,
    pub interval_safety: Option<Duration>,
    pub update_interval: Option<Duration>,
    pub use_replication: bool,
    pub replication_list: Vec<String>,
    pub master_address: Option<String>,
    pub collectors: Vec<String>,
    pub name: Option<String>,
    /// Debug mode: there's no master, starting and stopping the controllee always succeeds.
    pub stand_alone: bool,
}

pub(super) struct HadOptionsValidated {
    had_list: Vec<SinfulAddress>,
    use_primary: bool,
    controllee: String,
    connection_timeout: Duration,
    interval_safety: Duration,
    update_interval: Duration,
    replication_list: Option<Vec<SinfulAddress>>,
    master_address: Option<SinfulAddress>,
    collectors: Vec<SinfulAddress>,
    name: Option<String>,
}

impl HadOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.controllee.trim().is_empty() {
            return Err("Controllee name must not be empty");
        }
        if self.connection_timeout == Duration::from_secs(0) {
            return Err("Connection timeout must be positive");
        }
        if self.update_interval == Duration::from_secs(0) {
            return Err("Status update interval must be positive");
        }
        if self.connection_timeout > MAX_DURATION
            || self.interval_safety > MAX_DURATION
            || self.update_interval > MAX_DURATION
        {
            return Err("Timeouts and intervals must not exceed a day");
        }
        if let Some(list) = &self.replication_list {
            if list.is_empty() {
                return Err("Replication is enabled but the replication list is empty");
            }
        }

        Ok(())
    }

    /// `resolve()` turns the options into a Configuration as seen from `my_address`. Name lookups
    /// happen here, so this is the only async part of configuring.
    pub(super) async fn resolve(
        self,
        logger: &slog::Logger,
        my_address: &PeerAddress,
    ) -> Result<Configuration, ConfigurationError> {
        let all_peers = resolve_all(&self.had_list).await?;
        let roster = compute_roster(&all_peers, my_address, self.use_primary)?;

        let replication_peer = match &self.replication_list {
            Some(list) => {
                let list = resolve_all(list).await?;
                resolve_replication_peer(logger, &list, my_address, roster.self_id())
            }
            None => None,
        };

        let controllee_target = match &self.master_address {
            Some(master) => ControlleeTarget::Master(master.resolve().await?),
            None => ControlleeTarget::StandAlone,
        };

        let name = self.name.unwrap_or_else(|| default_name(my_address));

        Ok(Configuration {
            my_address: my_address.clone(),
            name,
            roster,
            use_primary: self.use_primary,
            controllee_name: self.controllee,
            connection_timeout: self.connection_timeout,
            interval_safety: self.interval_safety,
            update_interval: self.update_interval,
            replication_peer,
            controllee_target,
            collectors: resolve_all(&self.collectors).await?,
        })
    }
}

impl TryFrom<HadOptions> for HadOptionsValidated {
    type Error = ConfigurationError;

    fn try_from(options: HadOptions) -> Result<Self, Self::Error> {
        if options.had_list.is_empty() {
            return Err(ConfigurationError::MissingPeerList);
        }

        let master_address = match (options.stand_alone, &options.master_address) {
            (true, _) => None,
            (false, Some(master)) => Some(SinfulAddress::parse(master)?),
            (false, None) => {
                return Err(ConfigurationError::IllegalOptions(
                    "Master address is required unless running stand alone".to_string(),
                ))
            }
        };

        let replication_list = if options.use_replication {
            Some(parse_all(&options.replication_list)?)
        } else {
            None
        };

        let values = HadOptionsValidated {
            had_list: parse_all(&options.had_list)?,
            use_primary: options.use_primary,
            controllee: options.controllee.unwrap_or_else(|| DEFAULT_CONTROLLEE.to_string()),
            connection_timeout: options.connection_timeout.unwrap_or(Duration::from_secs(5)),
            interval_safety: options.interval_safety.unwrap_or(Duration::from_secs(1)),
            update_interval: options.update_interval.unwrap_or(Duration::from_secs(5 * 60)),
            replication_list,
            master_address,
            collectors: parse_all(&options.collectors)?,
            name: options.name,
        };

        values
            .validate()
            .map_err(|e| ConfigurationError::IllegalOptions(e.to_string()))?;
        Ok(values)
    }
}

fn parse_all(raw: &[String]) -> Result<Vec<SinfulAddress>, ConfigurationError> {
    raw.iter().map(|address| SinfulAddress::parse(address)).collect()
}

async fn resolve_all(addresses: &[SinfulAddress]) -> Result<Vec<PeerAddress>, ConfigurationError> {
    let mut resolved = Vec::with_capacity(addresses.len());
    for address in addresses {
        resolved.push(address.resolve().await?);
    }
    Ok(resolved)
}

fn default_name(my_address: &PeerAddress) -> String {
    let user = std::env::var("USER").unwrap_or_else(|_| "UNKNOWN".to_string());
    format!("{}@{}", user, my_address.socket_addr().ip())
}
