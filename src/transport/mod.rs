//! Outbound side of every protocol HAD speaks. Each protocol gets a transport trait (the seam tests
//! mock out) and a client that layers HAD semantics on top of it.
mod controllee;
mod peer_channel;
mod replication;
mod status;

pub use controllee::ControlleeActionFailed;
pub(crate) use controllee::ControlleeClient;
pub(crate) use controllee::GrpcMasterTransport;
pub(crate) use controllee::MasterTransport;
pub(crate) use peer_channel::GrpcPeerTransport;
pub(crate) use peer_channel::MessageChannel;
pub(crate) use peer_channel::PeerCommand;
pub(crate) use peer_channel::PeerMessage;
pub(crate) use peer_channel::PeerTransport;
pub(crate) use replication::GrpcReplicationTransport;
pub(crate) use replication::ReplicationClient;
pub(crate) use replication::ReplicationCommand;
pub(crate) use replication::ReplicationTransport;
pub(crate) use status::CollectorTransport;
pub(crate) use status::GrpcCollectorTransport;
pub(crate) use status::StatusPublisher;

#[cfg(test)]
pub(crate) use controllee::MasterCommand;

use crate::roster::PeerAddress;
use std::future::Future;
use std::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};

/// Everything that can go wrong while delivering one message to one endpoint. None of these are
/// fatal by themselves; callers decide what a failed delivery means.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid endpoint uri: {0}")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("connect failure: {0}")]
    Connect(#[from] tonic::transport::Error),
    #[error("rpc failure: {0}")]
    Rpc(#[from] tonic::Status),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

async fn connect(address: &PeerAddress) -> Result<Channel, TransportError> {
    let endpoint = Endpoint::from_shared(address.grpc_url())?;
    let channel = endpoint.connect().await?;
    Ok(channel)
}

/// One connection, one message. The whole exchange is bounded by `timeout`.
async fn with_timeout<F, T>(timeout: Duration, call: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(TransportError::Timeout(timeout)),
    }
}
