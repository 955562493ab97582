use crate::actor::{ActorClient, HadActor};
use crate::api::daemon::{HadDaemon, HadError};
use crate::api::event_bus::HadEventListener;
use crate::api::options::{HadOptions, HadOptionsValidated};
use crate::failover::{Collaborators, FailoverStateMachine};
use crate::roster::SinfulAddress;
use crate::server;
use crate::server::RpcServer;
use std::convert::TryFrom;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

// Peers send at most a couple of messages per cycle each.
const MAILBOX_SIZE: usize = 64;

pub struct HadDaemonConfig {
    /// This daemon's command address, in sinful form. The peer server listens on it, and it must
    /// appear exactly once in the HAD list.
    pub my_address: String,
    pub options: HadOptions,
    pub info_logger: slog::Logger,
}

/// `try_create_had_daemon()` validates the configuration and starts the daemon on the current
/// tokio runtime.
pub async fn try_create_had_daemon(config: HadDaemonConfig) -> Result<HadDaemon, HadError> {
    let root_logger = config.info_logger;

    let my_address = SinfulAddress::parse(&config.my_address)?.resolve().await?;
    let configuration = HadOptionsValidated::try_from(config.options)?
        .resolve(&root_logger, &my_address)
        .await?;

    // A HAD that can't hear its peers would elect itself, so failing to listen is fatal up front.
    let listener = TcpListener::bind(my_address.socket_addr())
        .await
        .map_err(|source| HadError::PeerServerUnavailable {
            address: my_address.to_string(),
            source,
        })?;

    let (actor_client, actor_queue_rx) = ActorClient::new(MAILBOX_SIZE);
    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();

    let (fsm, state_listener) = FailoverStateMachine::create(root_logger.clone(), configuration, Collaborators::grpc());
    let had_actor = HadActor::new(
        root_logger.clone(),
        actor_queue_rx,
        actor_client.weak(),
        fsm,
        server_shutdown_handle,
    );

    let had_rpc_server = RpcServer::new(root_logger.clone(), actor_client.weak());
    tokio::spawn(had_rpc_server.run(listener, server_shutdown_signal));

    let (exit_tx, exit_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = exit_tx.send(had_actor.run_event_loop().await);
    });

    Ok(HadDaemon::new(
        root_logger,
        my_address,
        actor_client,
        HadEventListener::new(state_listener),
        exit_rx,
    ))
}
