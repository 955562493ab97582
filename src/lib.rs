mod actor;
mod api;
mod failover;
mod roster;
mod server;
mod transport;
mod grpc {
    include!("../generated/had.rs");
}

pub use api::try_create_had_daemon;
pub use api::HadConfigFile;
pub use api::HadDaemon;
pub use api::HadDaemonConfig;
pub use api::HadError;
pub use api::HadEventListener;
pub use api::HadOptions;
pub use failover::FsmState;
pub use failover::ReconfigureKind;
pub use roster::ConfigurationError;
pub use roster::PeerAddress;
pub use roster::PeerId;
pub use transport::ControlleeActionFailed;
pub use transport::TransportError;

// The services HAD talks to. Exported so co-resident daemons can implement them.
pub use grpc::grpc_collector_server::{GrpcCollector, GrpcCollectorServer};
pub use grpc::grpc_master_server::{GrpcMaster, GrpcMasterServer};
pub use grpc::grpc_replication_server::{GrpcReplication, GrpcReplicationServer};
pub use grpc::{
    ProtoChildCommand, ProtoCollectorAck, ProtoInvalidateRecord, ProtoMasterAck, ProtoReplicationAck,
    ProtoReplicationNotice, ProtoStatusRecord,
};
