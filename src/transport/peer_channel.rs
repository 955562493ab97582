use crate::grpc::grpc_had_peer_client::GrpcHadPeerClient;
use crate::grpc::ProtoPeerMessage;
use crate::roster::{Configuration, PeerAddress, PeerId};
use crate::transport::{connect, with_timeout, TransportError};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum PeerCommand {
    /// Heartbeat, sent by a leader.
    Alive,
    /// Ballot, sent while in election.
    SendId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PeerMessage {
    pub sender_id: PeerId,
    pub controllee_name: String,
    pub peer_list: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProtocolMismatch {
    #[error("controllee different me='{mine}' other='{theirs}'")]
    ControlleeName { mine: String, theirs: String },
}

#[async_trait::async_trait]
pub(crate) trait PeerTransport: Send {
    async fn send(
        &mut self,
        peer: &PeerAddress,
        command: PeerCommand,
        message: PeerMessage,
        timeout: Duration,
    ) -> Result<(), TransportError>;
}

/// MessageChannel sends HAD control messages to other HADs and vets the ones we receive.
pub(crate) struct MessageChannel {
    logger: slog::Logger,
    transport: Box<dyn PeerTransport>,
}

impl MessageChannel {
    pub(crate) fn new(logger: slog::Logger, transport: Box<dyn PeerTransport>) -> Self {
        MessageChannel { logger, transport }
    }

    pub(crate) async fn send(
        &mut self,
        peer: &PeerAddress,
        command: PeerCommand,
        message: PeerMessage,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        slog::debug!(self.logger, "Send command {:?} to {}", command, peer);
        self.transport.send(peer, command, message, timeout).await
    }

    /// `broadcast()` sends to each peer in turn and returns how many deliveries succeeded. An
    /// unreachable peer just contributes no evidence this round.
    pub(crate) async fn broadcast(&mut self, config: &Configuration, command: PeerCommand) -> usize {
        let message = PeerMessage {
            sender_id: config.self_id(),
            controllee_name: config.controllee_name.clone(),
            peer_list: config.roster.fingerprint(),
        };

        let mut delivered = 0;
        for peer in config.roster.other_peers() {
            match self
                .send(peer, command, message.clone(), config.connection_timeout)
                .await
            {
                Ok(()) => delivered += 1,
                Err(e) => slog::debug!(self.logger, "Cannot send {:?} to {}: {}", command, peer, e),
            }
        }

        delivered
    }

    /// `receive()` decides whether an inbound message counts as evidence. A different controllee
    /// means the sender is in another HAD group entirely. A different peer list usually means a
    /// rollout in progress, so we only complain about it.
    pub(crate) fn receive(
        logger: &slog::Logger,
        config: &Configuration,
        command: PeerCommand,
        message: &PeerMessage,
    ) -> Result<(PeerId, PeerCommand), ProtocolMismatch> {
        slog::debug!(
            logger,
            "Received {:?} with id {} from HAD peer",
            command,
            message.sender_id
        );

        if !message.controllee_name.eq_ignore_ascii_case(&config.controllee_name) {
            return Err(ProtocolMismatch::ControlleeName {
                mine: config.controllee_name.clone(),
                theirs: message.controllee_name.clone(),
            });
        }

        let my_list = config.roster.fingerprint();
        if message.peer_list != my_list {
            slog::warn!(
                logger,
                "HAD peer list different! me='{}' other='{}'",
                my_list,
                message.peer_list
            );
        }

        Ok((message.sender_id, command))
    }
}

pub(crate) struct GrpcPeerTransport;

#[async_trait::async_trait]
impl PeerTransport for GrpcPeerTransport {
    async fn send(
        &mut self,
        peer: &PeerAddress,
        command: PeerCommand,
        message: PeerMessage,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let request = ProtoPeerMessage::from(message);

        with_timeout(timeout, async move {
            let mut client = GrpcHadPeerClient::new(connect(peer).await?);
            match command {
                PeerCommand::Alive => client.alive(request).await?,
                PeerCommand::SendId => client.send_id(request).await?,
            };
            Ok::<(), TransportError>(())
        })
        .await
    }
}

impl From<PeerMessage> for ProtoPeerMessage {
    fn from(message: PeerMessage) -> Self {
        ProtoPeerMessage {
            sender_id: message.sender_id.as_i32(),
            controllee_name: message.controllee_name,
            peer_list: message.peer_list,
        }
    }
}

impl From<ProtoPeerMessage> for PeerMessage {
    fn from(proto: ProtoPeerMessage) -> Self {
        PeerMessage {
            sender_id: PeerId::new(proto.sender_id),
            controllee_name: proto.controllee_name,
            peer_list: proto.peer_list,
        }
    }
}
