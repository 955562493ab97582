use crate::failover::evidence::EvidenceSet;
use crate::failover::state_change_listener;
use crate::failover::state_change_listener::{FsmStateChangeListener, FsmStateChangeNotifier};
use crate::roster::{Configuration, MESSAGES_PER_INTERVAL_FACTOR};
use crate::transport::{
    CollectorTransport, ControlleeActionFailed, ControlleeClient, GrpcCollectorTransport, GrpcMasterTransport,
    GrpcPeerTransport, GrpcReplicationTransport, MasterTransport, MessageChannel, PeerCommand, PeerMessage,
    PeerTransport, ReplicationClient, ReplicationCommand, ReplicationTransport, StatusPublisher,
};
use std::time::Duration;

/// The state of the local HAD.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FsmState {
    /// Just started or hard reconfigured, nothing known yet.
    Pre,
    /// Someone else is leader, or we're waiting to find out.
    Passive,
    /// No leader heard from, competing for leadership.
    Election,
    /// We run the controllee.
    Leader,
}

/// How a new configuration was applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReconfigureKind {
    /// Election outcome could change: state machine restarted from PRE.
    Hard,
    /// Only timing/publishing changed: state machine left as is.
    Soft,
}

/// The outbound seams of the state machine.
pub(crate) struct Collaborators {
    pub peers: Box<dyn PeerTransport>,
    pub master: Box<dyn MasterTransport>,
    pub replication: Box<dyn ReplicationTransport>,
    pub collectors: Box<dyn CollectorTransport>,
}

impl Collaborators {
    pub(crate) fn grpc() -> Self {
        Collaborators {
            peers: Box::new(GrpcPeerTransport),
            master: Box::new(GrpcMasterTransport),
            replication: Box::new(GrpcReplicationTransport),
            collectors: Box::new(GrpcCollectorTransport),
        }
    }
}

/// FailoverStateMachine decides whether this HAD should be running the controllee. State is
/// evaluated once per election interval (every `MESSAGES_PER_INTERVAL_FACTOR` cycles), while
/// ballots and heartbeats go out on every cycle.
pub(crate) struct FailoverStateMachine {
    base_logger: slog::Logger,
    logger: slog::Logger,
    config: Configuration,
    state: FsmState,
    evidence: EvidenceSet,
    calls_counter: u32,
    channel: MessageChannel,
    controllee: ControlleeClient,
    replication: ReplicationClient,
    status: StatusPublisher,
    state_notifier: FsmStateChangeNotifier,
}

impl FailoverStateMachine {
    pub(crate) fn create(
        logger: slog::Logger,
        config: Configuration,
        collaborators: Collaborators,
    ) -> (Self, FsmStateChangeListener) {
        let (state_notifier, state_listener) = state_change_listener::new(FsmState::Pre);
        let base_logger = logger;
        let logger = base_logger.new(slog::o!("SelfId" => config.self_id().as_i32()));

        let fsm = FailoverStateMachine {
            channel: MessageChannel::new(logger.clone(), collaborators.peers),
            controllee: ControlleeClient::new(logger.clone(), collaborators.master),
            replication: ReplicationClient::new(
                logger.clone(),
                collaborators.replication,
                config.replication_peer.clone(),
            ),
            status: StatusPublisher::new(logger.clone(), collaborators.collectors, &config),
            base_logger,
            logger,
            config,
            state: FsmState::Pre,
            evidence: EvidenceSet::default(),
            calls_counter: 0,
            state_notifier,
        };

        (fsm, state_listener)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> FsmState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> &Configuration {
        &self.config
    }

    pub(crate) fn cycle_period(&self) -> Duration {
        self.config.cycle_period()
    }

    pub(crate) fn update_interval(&self) -> Duration {
        self.config.update_interval
    }

    /// `start()` makes sure we don't begin life with a controllee some earlier incarnation of us
    /// left running.
    pub(crate) async fn start(&mut self) -> Result<(), ControlleeActionFailed> {
        self.config.log_parameters(&self.logger);
        self.ensure_controllee_stopped().await
    }

    pub(crate) async fn cycle(&mut self) -> Result<(), ControlleeActionFailed> {
        if self.calls_counter == 0 {
            self.step().await?;
        }
        self.send_messages().await;
        self.calls_counter = (self.calls_counter + 1) % MESSAGES_PER_INTERVAL_FACTOR;

        Ok(())
    }

    async fn step(&mut self) -> Result<(), ControlleeActionFailed> {
        let self_id = self.config.self_id();
        let is_primary = self.config.roster.is_primary();
        slog::debug!(self.logger, "Step in {:?} with evidence {:?}", self.state, self.evidence);

        match self.state {
            FsmState::Pre => self.transition_to(FsmState::Passive),
            FsmState::Passive => {
                if !self.evidence.has_alive() || is_primary {
                    self.transition_to(FsmState::Election);
                    // Ballots already received count towards the coming election.
                    return Ok(());
                }
                slog::debug!(self.logger, "Leader is alive, staying {:?}", self.state);
            }
            FsmState::Election => {
                if self.evidence.has_alive() && !is_primary {
                    self.transition_to(FsmState::Passive);
                } else if self.evidence.has_ballot_above(self_id) {
                    slog::info!(self.logger, "Higher priority candidate is running");
                    self.transition_to(FsmState::Passive);
                } else {
                    self.controllee
                        .start(
                            &self.config.controllee_target,
                            &self.config.controllee_name,
                            self.config.connection_timeout,
                        )
                        .await?;
                    self.notify_replication(ReplicationCommand::AfterElection).await;
                    // Collectors hear about it before anyone watching the state does.
                    self.status.publish(true).await;
                    self.transition_to(FsmState::Leader);
                }
            }
            FsmState::Leader => {
                if self.evidence.has_alive_above(self_id) {
                    slog::info!(self.logger, "Higher priority leader is alive, stepping down");
                    self.status.publish(false).await;
                    self.transition_to(FsmState::Passive);
                    self.notify_replication(ReplicationCommand::AfterLeader).await;
                    if let Err(e) = self.stop_controllee().await {
                        slog::crit!(self.logger, "{}", e);
                    }
                } else {
                    self.notify_replication(ReplicationCommand::InLeader).await;
                }
            }
        }

        self.evidence.clear();
        Ok(())
    }

    async fn send_messages(&mut self) {
        let command = match self.state {
            FsmState::Election => PeerCommand::SendId,
            FsmState::Leader => PeerCommand::Alive,
            FsmState::Pre | FsmState::Passive => return,
        };

        let delivered = self.channel.broadcast(&self.config, command).await;
        slog::debug!(
            self.logger,
            "Sent {:?} to {}/{} peers",
            command,
            delivered,
            self.config.roster.other_peers().len()
        );
    }

    /// `receive()` records an inbound peer message as evidence for the next step.
    pub(crate) fn receive(&mut self, command: PeerCommand, message: PeerMessage) {
        match MessageChannel::receive(&self.logger, &self.config, command, &message) {
            Ok((sender, command)) => self.evidence.record(command, sender),
            Err(e) => slog::warn!(self.logger, "Ignoring {:?} from {}: {}", command, message.sender_id, e),
        }
    }

    pub(crate) async fn publish_status(&mut self) {
        self.status.republish().await;
    }

    /// `reconfigure()` swaps in `new_config`. If it could change the election outcome we start over
    /// from PRE with a stopped controllee, otherwise the new values are picked up in place.
    pub(crate) async fn reconfigure(
        &mut self,
        new_config: Configuration,
    ) -> Result<ReconfigureKind, ControlleeActionFailed> {
        if new_config.needs_hard_reset(&self.config) {
            slog::info!(self.logger, "Hard reconfiguration, restarting from {:?}", FsmState::Pre);
            self.logger = self
                .base_logger
                .new(slog::o!("SelfId" => new_config.self_id().as_i32()));
            self.config = new_config;
            self.evidence.clear();
            self.calls_counter = 0;
            self.transition_to(FsmState::Pre);
            self.replication.set_target(self.config.replication_peer.clone());
            self.status.rebuild(&self.config, false);
            self.config.log_parameters(&self.logger);
            self.ensure_controllee_stopped().await?;

            Ok(ReconfigureKind::Hard)
        } else {
            slog::info!(self.logger, "Soft reconfiguration, staying {:?}", self.state);
            self.config = new_config;
            self.replication.set_target(self.config.replication_peer.clone());
            self.status.rebuild(&self.config, self.state == FsmState::Leader);
            self.config.log_parameters(&self.logger);

            Ok(ReconfigureKind::Soft)
        }
    }

    /// `shutdown()` leaves the pool the way a dead HAD should: no controllee and no status record.
    pub(crate) async fn shutdown(&mut self) {
        slog::info!(self.logger, "Shutting down in {:?}", self.state);
        if let Err(e) = self.stop_controllee().await {
            slog::warn!(self.logger, "{}", e);
        }
        self.status.withdraw().await;
    }

    async fn ensure_controllee_stopped(&mut self) -> Result<(), ControlleeActionFailed> {
        self.stop_controllee().await.map_err(|e| {
            slog::crit!(self.logger, "Unable to make sure controllee is stopped: {}", e);
            e
        })
    }

    async fn stop_controllee(&mut self) -> Result<(), ControlleeActionFailed> {
        self.controllee
            .stop_fast(
                &self.config.controllee_target,
                &self.config.controllee_name,
                self.config.connection_timeout,
            )
            .await
    }

    async fn notify_replication(&mut self, command: ReplicationCommand) {
        if self.replication.is_enabled() {
            self.replication
                .notify(command, &self.config.my_address, self.config.connection_timeout)
                .await;
        }
    }

    fn transition_to(&mut self, next: FsmState) {
        slog::info!(self.logger, "State {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_notifier.notify_new_state(next);
    }
}
