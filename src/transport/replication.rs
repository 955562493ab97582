use crate::grpc::grpc_replication_client::GrpcReplicationClient;
use crate::grpc::ProtoReplicationNotice;
use crate::roster::PeerAddress;
use crate::transport::{connect, with_timeout, TransportError};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ReplicationCommand {
    AfterElection,
    AfterLeader,
    InLeader,
}

#[async_trait::async_trait]
pub(crate) trait ReplicationTransport: Send {
    async fn send(
        &mut self,
        replication_daemon: &PeerAddress,
        command: ReplicationCommand,
        my_address: &PeerAddress,
        timeout: Duration,
    ) -> Result<(), TransportError>;
}

/// ReplicationClient tells the co-located replication daemon about election outcomes. It's best
/// effort: once the replication daemon can't be reached, replication stays off until the next
/// reconfiguration hands us a target again.
pub(crate) struct ReplicationClient {
    logger: slog::Logger,
    transport: Box<dyn ReplicationTransport>,
    target: Option<PeerAddress>,
}

impl ReplicationClient {
    pub(crate) fn new(
        logger: slog::Logger,
        transport: Box<dyn ReplicationTransport>,
        target: Option<PeerAddress>,
    ) -> Self {
        ReplicationClient {
            logger,
            transport,
            target,
        }
    }

    pub(crate) fn set_target(&mut self, target: Option<PeerAddress>) {
        self.target = target;
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Returns false if replication is off or the notification didn't go through.
    pub(crate) async fn notify(
        &mut self,
        command: ReplicationCommand,
        my_address: &PeerAddress,
        timeout: Duration,
    ) -> bool {
        let target = match &self.target {
            Some(target) => target,
            None => return false,
        };

        slog::debug!(self.logger, "Send command {:?} to replication daemon {}", command, target);
        match self.transport.send(target, command, my_address, timeout).await {
            Ok(()) => true,
            Err(e) => {
                slog::warn!(
                    self.logger,
                    "Cannot send {:?} to replication daemon {}: {}. Switching replication off",
                    command,
                    target,
                    e
                );
                self.target = None;
                false
            }
        }
    }
}

pub(crate) struct GrpcReplicationTransport;

#[async_trait::async_trait]
impl ReplicationTransport for GrpcReplicationTransport {
    async fn send(
        &mut self,
        replication_daemon: &PeerAddress,
        command: ReplicationCommand,
        my_address: &PeerAddress,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let request = ProtoReplicationNotice {
            had_address: my_address.to_string(),
        };

        with_timeout(timeout, async move {
            let mut client = GrpcReplicationClient::new(connect(replication_daemon).await?);
            match command {
                ReplicationCommand::AfterElection => client.after_election(request).await?,
                ReplicationCommand::AfterLeader => client.after_leader(request).await?,
                ReplicationCommand::InLeader => client.in_leader(request).await?,
            };
            Ok::<(), TransportError>(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::{addr, test_logger};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FlakyReplication {
        fail: bool,
        sent: Arc<Mutex<Vec<ReplicationCommand>>>,
    }

    #[async_trait::async_trait]
    impl ReplicationTransport for FlakyReplication {
        async fn send(
            &mut self,
            _replication_daemon: &PeerAddress,
            command: ReplicationCommand,
            _my_address: &PeerAddress,
            timeout: Duration,
        ) -> Result<(), TransportError> {
            if self.fail {
                return Err(TransportError::Timeout(timeout));
            }
            self.sent.lock().unwrap().push(command);
            Ok(())
        }
    }

    #[tokio::test]
    async fn disabled_client_sends_nothing() {
        let transport = FlakyReplication::default();
        let mut client = ReplicationClient::new(test_logger(), Box::new(transport.clone()), None);

        assert!(!client.is_enabled());
        assert!(
            !client
                .notify(ReplicationCommand::InLeader, &addr("10.0.0.1:9618"), Duration::from_secs(1))
                .await
        );
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_switches_replication_off() {
        let transport = FlakyReplication {
            fail: true,
            ..FlakyReplication::default()
        };
        let mut client = ReplicationClient::new(
            test_logger(),
            Box::new(transport),
            Some(addr("10.0.0.1:9620")),
        );

        assert!(client.is_enabled());
        assert!(
            !client
                .notify(ReplicationCommand::AfterElection, &addr("10.0.0.1:9618"), Duration::from_secs(1))
                .await
        );
        assert!(!client.is_enabled());

        client.set_target(Some(addr("10.0.0.1:9620")));
        assert!(client.is_enabled());
    }
}
