use crate::grpc::grpc_master_client::GrpcMasterClient;
use crate::grpc::ProtoChildCommand;
use crate::roster::{ControlleeTarget, PeerAddress};
use crate::transport::{connect, with_timeout, TransportError};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MasterCommand {
    ChildOn,
    ChildOffFast,
}

/// Kept cloneable so the same failure can answer a pending reconfiguration and end the daemon.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unable to send {command:?} for '{controllee_name}' to master: {reason}")]
pub struct ControlleeActionFailed {
    pub(crate) command: MasterCommand,
    pub(crate) controllee_name: String,
    pub(crate) reason: String,
}

#[async_trait::async_trait]
pub(crate) trait MasterTransport: Send {
    async fn send(
        &mut self,
        master: &PeerAddress,
        command: MasterCommand,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), TransportError>;
}

/// ControlleeClient asks the local master to turn the controllee on or off.
pub(crate) struct ControlleeClient {
    logger: slog::Logger,
    transport: Box<dyn MasterTransport>,
}

impl ControlleeClient {
    pub(crate) fn new(logger: slog::Logger, transport: Box<dyn MasterTransport>) -> Self {
        ControlleeClient { logger, transport }
    }

    pub(crate) async fn start(
        &mut self,
        target: &ControlleeTarget,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), ControlleeActionFailed> {
        self.send(target, MasterCommand::ChildOn, controllee_name, timeout).await
    }

    /// Idempotent: stopping a controllee that isn't running is fine.
    pub(crate) async fn stop_fast(
        &mut self,
        target: &ControlleeTarget,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), ControlleeActionFailed> {
        self.send(target, MasterCommand::ChildOffFast, controllee_name, timeout)
            .await
    }

    async fn send(
        &mut self,
        target: &ControlleeTarget,
        command: MasterCommand,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), ControlleeActionFailed> {
        let master = match target {
            ControlleeTarget::Master(master) => master,
            ControlleeTarget::StandAlone => {
                slog::info!(self.logger, "Stand alone mode, not sending {:?} [{}]", command, controllee_name);
                return Ok(());
            }
        };

        slog::debug!(
            self.logger,
            "Send command {:?} [{}] to master {}",
            command,
            controllee_name,
            master
        );
        self.transport
            .send(master, command, controllee_name, timeout)
            .await
            .map_err(|e| ControlleeActionFailed {
                command,
                controllee_name: controllee_name.to_string(),
                reason: e.to_string(),
            })
    }
}

pub(crate) struct GrpcMasterTransport;

#[async_trait::async_trait]
impl MasterTransport for GrpcMasterTransport {
    async fn send(
        &mut self,
        master: &PeerAddress,
        command: MasterCommand,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let request = ProtoChildCommand {
            controllee_name: controllee_name.to_string(),
        };

        with_timeout(timeout, async move {
            let mut client = GrpcMasterClient::new(connect(master).await?);
            match command {
                MasterCommand::ChildOn => client.child_on(request).await?,
                MasterCommand::ChildOffFast => client.child_off_fast(request).await?,
            };
            Ok::<(), TransportError>(())
        })
        .await
    }
}
