//! This mod is meant to hold most of the code for the library's client-facing API.
mod config_file;
mod daemon;
mod event_bus;
mod options;
mod wiring;

pub use config_file::HadConfigFile;
pub use daemon::HadDaemon;
pub use daemon::HadError;
pub use event_bus::HadEventListener;
pub use options::HadOptions;
pub use wiring::try_create_had_daemon;
pub use wiring::HadDaemonConfig;
