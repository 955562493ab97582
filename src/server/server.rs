use crate::actor::{DeliveryError, WeakActorClient};
use crate::grpc::grpc_had_peer_server::{GrpcHadPeer, GrpcHadPeerServer};
use crate::grpc::{ProtoPeerAck, ProtoPeerMessage};
use crate::server::RpcServerShutdownSignal;
use crate::transport::{PeerCommand, PeerMessage};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the HAD peer gRPC interface. It acks as soon as a message
/// is in the actor's mailbox; whether it counts as evidence is decided later.
pub(crate) struct RpcServer {
    logger: slog::Logger,
    local_had: WeakActorClient,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, local_had: WeakActorClient) -> Self {
        RpcServer { logger, local_had }
    }

    /// `run()` serves peers on an already bound `listener` until the shutdown signal fires. If the
    /// server stops any other way, the actor is told so it doesn't carry on deaf.
    pub(crate) async fn run(self, listener: TcpListener, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        let local_had = self.local_had.clone();
        match listener.local_addr() {
            Ok(socket_addr) => slog::info!(logger, "Listening on '{:?}'", socket_addr),
            Err(e) => slog::warn!(logger, "Listening on unknown address: {}", e),
        }

        let result = Server::builder()
            .add_service(GrpcHadPeerServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        match result {
            Ok(()) => slog::info!(logger, "Server run() has exited"),
            Err(e) => {
                slog::crit!(logger, "Server run() has failed: {}", e);
                let _ = local_had.peer_server_failed(e.to_string()).await;
            }
        }
    }

    fn handle_message(&self, command: PeerCommand, rpc_request: ProtoPeerMessage) -> Result<ProtoPeerAck, Status> {
        let message = PeerMessage::from(rpc_request);

        match self.local_had.deliver_peer_message(command, message) {
            Ok(()) => Ok(ProtoPeerAck {}),
            Err(DeliveryError::Full) => {
                slog::warn!(self.logger, "Mailbox full, dropping {:?}", command);
                Err(Status::resource_exhausted("HAD is busy"))
            }
            Err(DeliveryError::Exited) => Err(Status::unavailable("HAD is shutting down")),
        }
    }
}

#[async_trait::async_trait]
impl GrpcHadPeer for RpcServer {
    async fn alive(&self, rpc_request_wrapped: Request<ProtoPeerMessage>) -> Result<Response<ProtoPeerAck>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - Alive {:?}", rpc_request);
        self.handle_message(PeerCommand::Alive, rpc_request).map(Response::new)
    }

    async fn send_id(&self, rpc_request_wrapped: Request<ProtoPeerMessage>) -> Result<Response<ProtoPeerAck>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - SendId {:?}", rpc_request);
        self.handle_message(PeerCommand::SendId, rpc_request).map(Response::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorClient, Event};
    use crate::grpc::grpc_had_peer_client::GrpcHadPeerClient;
    use crate::roster::tests::test_logger;

    fn proto(sender_id: i32) -> ProtoPeerMessage {
        ProtoPeerMessage {
            sender_id,
            controllee_name: "NEGOTIATOR".to_string(),
            peer_list: "<127.0.0.1:9618>".to_string(),
        }
    }

    #[tokio::test]
    async fn messages_land_in_mailbox() {
        let (client, mut rx) = ActorClient::new(10);
        let server = RpcServer::new(test_logger(), client.weak());

        server.alive(Request::new(proto(3))).await.unwrap();
        server.send_id(Request::new(proto(4))).await.unwrap();

        match rx.recv().await {
            Some(Event::PeerMessage(PeerCommand::Alive, message)) => assert_eq!(message.sender_id.as_i32(), 3),
            other => panic!("Unexpected event {:?}", other),
        }
        match rx.recv().await {
            Some(Event::PeerMessage(PeerCommand::SendId, message)) => assert_eq!(message.sender_id.as_i32(), 4),
            other => panic!("Unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn serves_until_shutdown() {
        let (client, mut rx) = ActorClient::new(10);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let socket_addr = listener.local_addr().unwrap();
        let (shutdown_handle, shutdown_signal) = crate::server::shutdown_signal();
        let server_task = tokio::spawn(RpcServer::new(test_logger(), client.weak()).run(listener, shutdown_signal));

        let mut peer = GrpcHadPeerClient::connect(format!("http://{}", socket_addr)).await.unwrap();
        peer.send_id(Request::new(proto(2))).await.unwrap();
        match rx.recv().await {
            Some(Event::PeerMessage(PeerCommand::SendId, message)) => assert_eq!(message.sender_id.as_i32(), 2),
            other => panic!("Unexpected event {:?}", other),
        }

        drop(shutdown_handle);
        tokio::time::timeout(std::time::Duration::from_secs(5), server_task)
            .await
            .expect("Server should stop on shutdown")
            .unwrap();
        // A requested stop isn't a failure.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn rejects_when_had_is_gone() {
        let (client, rx) = ActorClient::new(10);
        let server = RpcServer::new(test_logger(), client.weak());
        drop(client);
        drop(rx);

        let status = server.alive(Request::new(proto(1))).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unavailable);
    }
}
