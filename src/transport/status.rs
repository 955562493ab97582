use crate::grpc::grpc_collector_client::GrpcCollectorClient;
use crate::grpc::{ProtoInvalidateRecord, ProtoStatusRecord};
use crate::roster::{Configuration, PeerAddress};
use crate::transport::{connect, with_timeout, TransportError};
use std::time::Duration;

/// StatusRecord is what the collectors know about this HAD. Only `is_active` changes between
/// configurations, everything else is rebuilt from scratch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StatusRecord {
    pub name: String,
    pub my_address: String,
    pub is_active: bool,
    pub peer_list: String,
    pub controllee_name: String,
    pub index: i32,
    pub self_id: i32,
    pub daemon_start_time: i64,
}

impl StatusRecord {
    fn from_config(config: &Configuration, daemon_start_time: i64, is_active: bool) -> Self {
        let peer_list = if config.roster.all_peers().is_empty() {
            "unknown".to_string()
        } else {
            config.roster.fingerprint()
        };

        StatusRecord {
            name: config.name.clone(),
            my_address: config.my_address.to_string(),
            is_active,
            peer_list,
            controllee_name: config.controllee_name.clone(),
            index: config.roster.index(),
            self_id: config.self_id().as_i32(),
            daemon_start_time,
        }
    }

    fn to_proto(&self, current_time: i64) -> ProtoStatusRecord {
        ProtoStatusRecord {
            name: self.name.clone(),
            my_address: self.my_address.clone(),
            is_active: self.is_active,
            peer_list: self.peer_list.clone(),
            controllee_name: self.controllee_name.clone(),
            index: self.index,
            self_id: self.self_id,
            daemon_start_time: self.daemon_start_time,
            current_time,
        }
    }
}

#[async_trait::async_trait]
pub(crate) trait CollectorTransport: Send {
    async fn update(
        &mut self,
        collector: &PeerAddress,
        record: ProtoStatusRecord,
        timeout: Duration,
    ) -> Result<(), TransportError>;

    async fn invalidate(&mut self, collector: &PeerAddress, name: &str, timeout: Duration)
        -> Result<(), TransportError>;
}

pub(crate) struct StatusPublisher {
    logger: slog::Logger,
    transport: Box<dyn CollectorTransport>,
    daemon_start_time: i64,
    collectors: Vec<PeerAddress>,
    timeout: Duration,
    record: StatusRecord,
}

impl StatusPublisher {
    pub(crate) fn new(logger: slog::Logger, transport: Box<dyn CollectorTransport>, config: &Configuration) -> Self {
        let daemon_start_time = chrono::Utc::now().timestamp();

        StatusPublisher {
            logger,
            transport,
            daemon_start_time,
            collectors: config.collectors.clone(),
            timeout: config.connection_timeout,
            record: StatusRecord::from_config(config, daemon_start_time, false),
        }
    }

    #[cfg(test)]
    pub(crate) fn record(&self) -> &StatusRecord {
        &self.record
    }

    /// `rebuild()` regenerates the record for a new configuration generation.
    pub(crate) fn rebuild(&mut self, config: &Configuration, is_active: bool) {
        self.collectors = config.collectors.clone();
        self.timeout = config.connection_timeout;
        self.record = StatusRecord::from_config(config, self.daemon_start_time, is_active);
    }

    pub(crate) async fn publish(&mut self, is_active: bool) -> usize {
        self.record.is_active = is_active;
        self.republish().await
    }

    /// Sends the current record to every collector, returns how many accepted it.
    pub(crate) async fn republish(&mut self) -> usize {
        let current_time = chrono::Utc::now().timestamp();
        let mut delivered = 0;

        for collector in &self.collectors {
            let proto = self.record.to_proto(current_time);
            match self.transport.update(collector, proto, self.timeout).await {
                Ok(()) => delivered += 1,
                Err(e) => slog::info!(self.logger, "Cannot update status at collector {}: {}", collector, e),
            }
        }

        slog::debug!(
            self.logger,
            "Published status (active={}) to {}/{} collectors",
            self.record.is_active,
            delivered,
            self.collectors.len()
        );
        delivered
    }

    pub(crate) async fn withdraw(&mut self) -> usize {
        let mut delivered = 0;

        for collector in &self.collectors {
            match self.transport.invalidate(collector, &self.record.name, self.timeout).await {
                Ok(()) => delivered += 1,
                Err(e) => slog::info!(self.logger, "Cannot invalidate status at collector {}: {}", collector, e),
            }
        }

        slog::info!(self.logger, "Withdrew status '{}' from {} collectors", self.record.name, delivered);
        delivered
    }
}

pub(crate) struct GrpcCollectorTransport;

#[async_trait::async_trait]
impl CollectorTransport for GrpcCollectorTransport {
    async fn update(
        &mut self,
        collector: &PeerAddress,
        record: ProtoStatusRecord,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        with_timeout(timeout, async move {
            let mut client = GrpcCollectorClient::new(connect(collector).await?);
            client.update_ad(record).await?;
            Ok::<(), TransportError>(())
        })
        .await
    }

    async fn invalidate(
        &mut self,
        collector: &PeerAddress,
        name: &str,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let request = ProtoInvalidateRecord { name: name.to_string() };

        with_timeout(timeout, async move {
            let mut client = GrpcCollectorClient::new(connect(collector).await?);
            client.invalidate_ad(request).await?;
            Ok::<(), TransportError>(())
        })
        .await
    }
}
