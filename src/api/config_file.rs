use crate::api::options::HadOptions;
use crate::roster::ConfigurationError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tokio::time::Duration;

/// HadConfigFile is the on-disk TOML form of [`HadOptions`]. Durations are in (fractional)
/// seconds.
///
/// ```toml
/// had_list = ["<node1.example.com:51450>", "<node2.example.com:51450>"]
/// use_primary = true
/// master_address = "127.0.0.1:9618"
/// collectors = ["cm.example.com:9618"]
/// connection_timeout_secs = 2
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HadConfigFile {
    pub had_list: Vec<String>,
    pub use_primary: bool,
    pub controllee: Option<String>,
    pub connection_timeout_secs: Option<f64>,
    pub interval_safety_secs: Option<f64>,
    pub update_interval_secs: Option<f64>,
    pub use_replication: bool,
    pub replication_list: Vec<String>,
    pub master_address: Option<String>,
    pub collectors: Vec<String>,
    pub name: Option<String>,
    pub stand_alone: bool,
}

impl HadConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigurationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse(&text).map_err(|e| match e {
            ConfigurationError::Unreadable { reason, .. } => ConfigurationError::Unreadable {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(text).map_err(|e| ConfigurationError::Unreadable {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn into_options(self) -> Result<HadOptions, ConfigurationError> {
        Ok(HadOptions {
            had_list: self.had_list,
            use_primary: self.use_primary,
            controllee: self.controllee,
            connection_timeout: seconds("connection_timeout_secs", self.connection_timeout_secs)?,
            interval_safety: seconds("interval_safety_secs", self.interval_safety_secs)?,
            update_interval: seconds("update_interval_secs", self.update_interval_secs)?,
            use_replication: self.use_replication,
            replication_list: self.replication_list,
            master_address: self.master_address,
            collectors: self.collectors,
            name: self.name,
            stand_alone: self.stand_alone,
        })
    }
}

fn seconds(key: &str, value: Option<f64>) -> Result<Option<Duration>, ConfigurationError> {
    match value {
        None => Ok(None),
        Some(secs) if secs.is_finite() && secs >= 0.0 => Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|e| ConfigurationError::IllegalOptions(format!("{} is out of range: {}", key, e))),
        Some(secs) => Err(ConfigurationError::IllegalOptions(format!(
            "{} must be a non-negative number of seconds, got {}",
            key, secs
        ))),
    }
}
