use crate::actor::{ActorClient, ActorExited, ActorFailure};
use crate::api::event_bus::HadEventListener;
use crate::api::options::{HadOptions, HadOptionsValidated};
use crate::failover::ReconfigureKind;
use crate::roster::{ConfigurationError, PeerAddress};
use crate::transport::ControlleeActionFailed;
use std::convert::TryFrom;
use tokio::sync::oneshot;

#[derive(Debug, thiserror::Error)]
pub enum HadError {
    #[error("HAD configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("HAD controllee error: {0}")]
    ControlleeActionFailed(#[from] ControlleeActionFailed),
    #[error("cannot listen for HAD peers on {address}: {source}")]
    PeerServerUnavailable { address: String, source: std::io::Error },
    #[error("HAD peer server failed: {0}")]
    PeerServerFailed(String),
    #[error("HAD has exited")]
    ActorExited,
}

impl From<ActorExited> for HadError {
    fn from(_: ActorExited) -> Self {
        HadError::ActorExited
    }
}

impl From<ActorFailure> for HadError {
    fn from(failure: ActorFailure) -> Self {
        match failure {
            ActorFailure::ControlleeActionFailed(e) => HadError::ControlleeActionFailed(e),
            ActorFailure::PeerServerFailed(reason) => HadError::PeerServerFailed(reason),
        }
    }
}

/// HadDaemon is a running HAD: state machine, timers and peer server. Dropping it shuts the
/// daemon down.
pub struct HadDaemon {
    logger: slog::Logger,
    my_address: PeerAddress,
    actor_client: ActorClient,
    event_listener: HadEventListener,
    exit: Option<oneshot::Receiver<Result<(), ActorFailure>>>,
}

impl HadDaemon {
    pub(crate) fn new(
        logger: slog::Logger,
        my_address: PeerAddress,
        actor_client: ActorClient,
        event_listener: HadEventListener,
        exit: oneshot::Receiver<Result<(), ActorFailure>>,
    ) -> Self {
        HadDaemon {
            logger,
            my_address,
            actor_client,
            event_listener,
            exit: Some(exit),
        }
    }

    pub fn my_address(&self) -> &PeerAddress {
        &self.my_address
    }

    pub fn event_listener(&self) -> HadEventListener {
        self.event_listener.clone()
    }

    /// `reconfigure()` applies a new reading of the configuration. Invalid options leave the
    /// running configuration untouched.
    pub async fn reconfigure(&self, options: HadOptions) -> Result<ReconfigureKind, HadError> {
        let config = HadOptionsValidated::try_from(options)?
            .resolve(&self.logger, &self.my_address)
            .await?;

        let kind = self.actor_client.reconfigure(config).await??;
        Ok(kind)
    }

    /// `shutdown()` stops the controllee, withdraws the status record and stops serving peers.
    pub async fn shutdown(&self) -> Result<(), HadError> {
        self.actor_client.shutdown().await?;
        Ok(())
    }

    /// `wait_for_exit()` resolves when the daemon stops, with the fatal error if there was one. It
    /// is safe to cancel. Once it has resolved, later calls return `HadError::ActorExited`.
    pub async fn wait_for_exit(&mut self) -> Result<(), HadError> {
        let exit = self.exit.as_mut().ok_or(HadError::ActorExited)?;
        let result = exit.await;
        self.exit = None;

        match result {
            Ok(actor_result) => Ok(actor_result?),
            Err(_) => Err(HadError::ActorExited),
        }
    }
}
