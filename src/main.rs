use clap::{Parser, ValueEnum};
use had::{HadConfigFile, HadDaemonConfig, HadOptions};
use slog::Drain;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::signal::unix::{signal, SignalKind};

#[derive(Parser, Debug, Clone)]
#[clap(name = "condor_had", about = "High availability daemon: keeps exactly one controllee running")]
struct Opts {
    /// HAD configuration file (TOML). Re-read on SIGHUP.
    #[clap(long = "config", env = "CONDOR_HAD_CONFIG")]
    config: PathBuf,
    /// This daemon's command address, e.g. "<10.0.0.1:51450>". Must appear in the HAD list.
    #[clap(long = "address", env = "CONDOR_HAD_ADDRESS")]
    address: String,
    #[clap(long = "log-level", value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for slog::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical => slog::Level::Critical,
            LogLevel::Error => slog::Level::Error,
            LogLevel::Warning => slog::Level::Warning,
            LogLevel::Info => slog::Level::Info,
            LogLevel::Debug => slog::Level::Debug,
            LogLevel::Trace => slog::Level::Trace,
        }
    }
}

enum Signal {
    Terminate,
    Reconfigure,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let opts = Opts::parse();
    let logger = create_root_logger_for_stderr(opts.log_level.into());

    let exit_code = match run(&opts, &logger).await {
        Ok(()) => 0,
        Err(e) => {
            slog::crit!(logger, "HAD exiting: {}", e);
            1
        }
    };

    drop(logger);
    std::process::exit(exit_code);
}

async fn run(opts: &Opts, logger: &slog::Logger) -> Result<(), Box<dyn Error>> {
    let options = load_options(&opts.config)?;
    let mut daemon = had::try_create_had_daemon(HadDaemonConfig {
        my_address: opts.address.clone(),
        options,
        info_logger: logger.clone(),
    })
    .await?;

    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminate = signal(SignalKind::terminate())?;

    loop {
        let signal = tokio::select! {
            exit = daemon.wait_for_exit() => return exit.map_err(Into::into),
            _ = tokio::signal::ctrl_c() => Signal::Terminate,
            _ = terminate.recv() => Signal::Terminate,
            _ = hangup.recv() => Signal::Reconfigure,
        };

        match signal {
            Signal::Terminate => {
                slog::info!(logger, "Shutdown requested");
                daemon.shutdown().await?;
                return daemon.wait_for_exit().await.map_err(Into::into);
            }
            Signal::Reconfigure => {
                slog::info!(logger, "Reconfiguring from '{}'", opts.config.display());
                let reconfigured = match load_options(&opts.config) {
                    Ok(options) => daemon.reconfigure(options).await,
                    Err(e) => Err(e.into()),
                };
                match reconfigured {
                    Ok(kind) => slog::info!(logger, "Reconfigured ({:?})", kind),
                    Err(e) => {
                        // Bad configuration is fatal: we might no longer know who we are.
                        let _ = daemon.shutdown().await;
                        return Err(e.into());
                    }
                }
            }
        }
    }
}

fn load_options(path: &Path) -> Result<HadOptions, had::ConfigurationError> {
    HadConfigFile::load(path)?.into_options()
}

fn create_root_logger_for_stderr(level: slog::Level) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("Daemon" => "HAD"))
}
