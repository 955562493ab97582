use crate::failover::{FailoverStateMachine, PeriodicTimerHandle, ReconfigureKind, TimerKind, TimerTick};
use crate::roster::Configuration;
use crate::server::RpcServerShutdownHandle;
use crate::transport::{ControlleeActionFailed, PeerCommand, PeerMessage};
use std::fmt::Debug;
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, oneshot};

/// Every input to the state machine is an Event, so handlers run one at a time.
#[derive(Debug)]
pub(crate) enum Event {
    // Cycle: evaluate a step if due and (re)send ballots/heartbeats.
    // StatusUpdate: republish the status record.
    TimerTick(TimerTick, Callback<()>),

    // Buffered as evidence for the next step. Never answered: the peer already got its ack.
    PeerMessage(PeerCommand, PeerMessage),

    // Hard: restart from PRE, respawn timers. Soft: update in place.
    Reconfigure(
        Configuration,
        Callback<Result<ReconfigureKind, ControlleeActionFailed>>,
    ),

    // Stop controllee, withdraw status, exit.
    Shutdown(Callback<()>),

    // The peer server stopped on its own. A deaf HAD would elect itself, so this is fatal.
    PeerServerFailed(String),
}

#[derive(Debug)]
pub(crate) struct Callback<T: Debug>(oneshot::Sender<T>);

impl<T: Debug> Callback<T> {
    pub(crate) fn send(self, message: T) {
        let _ = self.0.send(message);
    }
}

#[derive(Debug, thiserror::Error)]
#[error("HAD actor has exited")]
pub(crate) struct ActorExited;

/// Why the actor stopped without being asked to.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ActorFailure {
    #[error(transparent)]
    ControlleeActionFailed(#[from] ControlleeActionFailed),
    #[error("peer server failed: {0}")]
    PeerServerFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum DeliveryError {
    #[error("HAD actor mailbox is full")]
    Full,
    #[error("HAD actor has exited")]
    Exited,
}

/// ActorClient keeps the actor alive. Once every strong client is dropped, the actor shuts down.
#[derive(Clone)]
pub(crate) struct ActorClient {
    sender: Arc<mpsc::Sender<Event>>,
}

/// WeakActorClient is for the actor's own helpers (timers, RPC server), which must not keep it
/// alive.
#[derive(Clone)]
pub(crate) struct WeakActorClient {
    sender: Weak<mpsc::Sender<Event>>,
}

impl ActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (ActorClient { sender: Arc::new(tx) }, rx)
    }

    pub(crate) fn weak(&self) -> WeakActorClient {
        WeakActorClient {
            sender: Arc::downgrade(&self.sender),
        }
    }

    pub(crate) async fn reconfigure(
        &self,
        config: Configuration,
    ) -> Result<Result<ReconfigureKind, ControlleeActionFailed>, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Reconfigure(config, Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn shutdown(&self) -> Result<(), ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Shutdown(Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    async fn send(&self, event: Event) -> Result<(), ActorExited> {
        self.sender.send(event).await.map_err(|_| ActorExited)
    }
}

impl WeakActorClient {
    /// Resolves once the actor has handled the tick.
    pub(crate) async fn timer_tick(&self, tick: TimerTick) -> Result<(), ActorExited> {
        let sender = self.sender.upgrade().ok_or(ActorExited)?;
        let (tx, rx) = oneshot::channel();
        sender
            .send(Event::TimerTick(tick, Callback(tx)))
            .await
            .map_err(|_| ActorExited)?;
        // Don't hold a strong reference while waiting.
        drop(sender);

        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn peer_server_failed(&self, reason: String) -> Result<(), ActorExited> {
        let sender = self.sender.upgrade().ok_or(ActorExited)?;
        sender
            .send(Event::PeerServerFailed(reason))
            .await
            .map_err(|_| ActorExited)
    }

    /// Never waits: a peer must not be blocked on our mailbox.
    pub(crate) fn deliver_peer_message(&self, command: PeerCommand, message: PeerMessage) -> Result<(), DeliveryError> {
        let sender = self.sender.upgrade().ok_or(DeliveryError::Exited)?;
        sender
            .try_send(Event::PeerMessage(command, message))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
                mpsc::error::TrySendError::Closed(_) => DeliveryError::Exited,
            })
    }
}

struct Timers {
    cycle: PeriodicTimerHandle,
    status_update: PeriodicTimerHandle,
}

enum Flow {
    Continue,
    Exit(Callback<()>),
}

/// HadActor is the failover state machine in actor model. It owns the timers and keeps the RPC
/// server running for as long as it runs.
pub(crate) struct HadActor {
    logger: slog::Logger,
    receiver: mpsc::Receiver<Event>,
    self_client: WeakActorClient,
    fsm: FailoverStateMachine,
    timers: Option<Timers>,
    timer_generation: u64,
    _server_shutdown: RpcServerShutdownHandle,
}

impl HadActor {
    pub(crate) fn new(
        logger: slog::Logger,
        receiver: mpsc::Receiver<Event>,
        self_client: WeakActorClient,
        fsm: FailoverStateMachine,
        server_shutdown: RpcServerShutdownHandle,
    ) -> Self {
        HadActor {
            logger,
            receiver,
            self_client,
            fsm,
            timers: None,
            timer_generation: 0,
            _server_shutdown: server_shutdown,
        }
    }

    /// `run_event_loop()` returns once the actor is shut down, by request, because every client
    /// went away, or because of an [`ActorFailure`].
    pub(crate) async fn run_event_loop(mut self) -> Result<(), ActorFailure> {
        if let Err(e) = self.fsm.start().await {
            return self.fail(e.into()).await;
        }
        self.spawn_timers();

        let mut exit_callback = None;
        while let Some(event) = self.receiver.recv().await {
            match self.handle_event(event).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(callback)) => {
                    exit_callback = Some(callback);
                    break;
                }
                Err(e) => return self.fail(e).await,
            }
        }

        self.timers = None;
        self.fsm.shutdown().await;
        slog::info!(self.logger, "HAD actor exited");
        if let Some(callback) = exit_callback {
            callback.send(());
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<Flow, ActorFailure> {
        match event {
            Event::TimerTick(tick, callback) => {
                if tick.generation == self.timer_generation {
                    match tick.kind {
                        TimerKind::Cycle => self.fsm.cycle().await?,
                        TimerKind::StatusUpdate => self.fsm.publish_status().await,
                    }
                } else {
                    slog::debug!(self.logger, "Dropping stale {:?}", tick);
                }
                callback.send(());
            }
            Event::PeerMessage(command, message) => {
                self.fsm.receive(command, message);
            }
            Event::Reconfigure(config, callback) => match self.fsm.reconfigure(config).await {
                Ok(ReconfigureKind::Hard) => {
                    self.spawn_timers();
                    callback.send(Ok(ReconfigureKind::Hard));
                }
                Ok(ReconfigureKind::Soft) => {
                    if let Some(timers) = &self.timers {
                        timers.cycle.set_period(self.fsm.cycle_period());
                        timers.status_update.set_period(self.fsm.update_interval());
                    }
                    callback.send(Ok(ReconfigureKind::Soft));
                }
                Err(e) => {
                    callback.send(Err(e.clone()));
                    return Err(e.into());
                }
            },
            Event::Shutdown(callback) => return Ok(Flow::Exit(callback)),
            Event::PeerServerFailed(reason) => return Err(ActorFailure::PeerServerFailed(reason)),
        }

        Ok(Flow::Continue)
    }

    /// Replaces any running timers. Both fire right away.
    fn spawn_timers(&mut self) {
        self.timer_generation += 1;
        let generation = self.timer_generation;
        let tick = |kind| TimerTick { kind, generation };

        self.timers = Some(Timers {
            cycle: PeriodicTimerHandle::spawn_timer_task(
                tick(TimerKind::Cycle),
                self.fsm.cycle_period(),
                self.self_client.clone(),
            ),
            status_update: PeriodicTimerHandle::spawn_timer_task(
                tick(TimerKind::StatusUpdate),
                self.fsm.update_interval(),
                self.self_client.clone(),
            ),
        });
    }

    async fn fail(mut self, e: ActorFailure) -> Result<(), ActorFailure> {
        slog::crit!(self.logger, "HAD ERROR: {}, exiting", e);
        self.timers = None;
        self.receiver.close();
        self.fsm.shutdown().await;

        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failover::test_utils::{RecordingCollector, RecordingMaster, SimNetwork};
    use crate::failover::{Collaborators, FsmState, FsmStateChangeListener};
    use crate::roster::tests::{addr, config_for, test_logger};
    use crate::server;
    use crate::transport::MasterCommand;
    use std::time::Duration;

    struct Harness {
        client: ActorClient,
        master: RecordingMaster,
        collector: RecordingCollector,
        state_listener: FsmStateChangeListener,
        actor_task: tokio::task::JoinHandle<Result<(), ActorFailure>>,
    }

    fn fast_config() -> Configuration {
        let peers = vec![addr("10.0.0.1:9618"), addr("10.0.0.2:9618")];
        let mut config = config_for(&peers, 0, false);
        config.connection_timeout = Duration::from_millis(5);
        config.interval_safety = Duration::from_millis(10);
        config.collectors = vec![addr("10.0.0.9:9618")];
        config
    }

    fn spawn_actor(config: Configuration, master: RecordingMaster) -> Harness {
        let collector = RecordingCollector::default();
        let collaborators = Collaborators {
            peers: Box::new(SimNetwork::default()),
            master: Box::new(master.clone()),
            replication: Box::new(crate::failover::test_utils::RecordingReplication::default()),
            collectors: Box::new(collector.clone()),
        };
        let (fsm, state_listener) = FailoverStateMachine::create(test_logger(), config, collaborators);
        let (client, rx) = ActorClient::new(10);
        let (server_shutdown_handle, _server_shutdown_signal) = server::shutdown_signal();
        let actor = HadActor::new(test_logger(), rx, client.weak(), fsm, server_shutdown_handle);

        Harness {
            client,
            master,
            collector,
            state_listener,
            actor_task: tokio::spawn(actor.run_event_loop()),
        }
    }

    fn controllee_failure(failure: ActorFailure) -> ControlleeActionFailed {
        match failure {
            ActorFailure::ControlleeActionFailed(e) => e,
            other => panic!("Unexpected failure {:?}", other),
        }
    }

    async fn wait_for_state(listener: &mut FsmStateChangeListener, state: FsmState) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while listener.current() != state {
                listener.next().await.expect("State listener closed");
            }
        })
        .await
        .expect("Timeout waiting for state");
    }

    #[tokio::test]
    async fn lone_actor_becomes_leader_and_shuts_down_cleanly() {
        let mut harness = spawn_actor(fast_config(), RecordingMaster::default());

        wait_for_state(&mut harness.state_listener, FsmState::Leader).await;
        harness.client.shutdown().await.unwrap();
        harness.actor_task.await.unwrap().unwrap();

        assert_eq!(
            harness.master.commands(),
            vec![
                MasterCommand::ChildOffFast,
                MasterCommand::ChildOn,
                MasterCommand::ChildOffFast
            ]
        );
        assert!(harness.collector.published().contains(&true));
        assert_eq!(harness.collector.invalidations(), 1);
    }

    #[tokio::test]
    async fn dropping_every_client_shuts_down() {
        let harness = spawn_actor(fast_config(), RecordingMaster::default());
        let weak = harness.client.weak();

        drop(harness.client);
        harness.actor_task.await.unwrap().unwrap();
        assert_eq!(harness.collector.invalidations(), 1);
        assert!(weak.timer_tick(TimerTick { kind: TimerKind::Cycle, generation: 1 }).await.is_err());
    }

    #[tokio::test]
    async fn failing_to_start_controllee_ends_actor() {
        let master = RecordingMaster::default();
        master.fail_start(true);
        let harness = spawn_actor(fast_config(), master);

        let err = controllee_failure(harness.actor_task.await.unwrap().unwrap_err());
        assert_eq!(err.command, MasterCommand::ChildOn);
        assert_eq!(harness.collector.invalidations(), 1);
        assert!(harness.client.shutdown().await.is_err());
    }

    #[tokio::test]
    async fn failing_to_stop_at_startup_ends_actor() {
        let master = RecordingMaster::default();
        master.fail_stop(true);
        let harness = spawn_actor(fast_config(), master);

        let err = controllee_failure(harness.actor_task.await.unwrap().unwrap_err());
        assert_eq!(err.command, MasterCommand::ChildOffFast);
    }

    #[tokio::test]
    async fn leadership_is_published_before_it_is_announced() {
        let mut harness = spawn_actor(fast_config(), RecordingMaster::default());

        wait_for_state(&mut harness.state_listener, FsmState::Leader).await;
        assert_eq!(harness.collector.published().last(), Some(&true));

        harness.client.shutdown().await.unwrap();
        harness.actor_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn peer_server_failure_ends_actor() {
        let harness = spawn_actor(fast_config(), RecordingMaster::default());

        harness
            .client
            .weak()
            .peer_server_failed("address in use".to_string())
            .await
            .unwrap();

        match harness.actor_task.await.unwrap() {
            Err(ActorFailure::PeerServerFailed(reason)) => assert_eq!(reason, "address in use"),
            other => panic!("Unexpected exit {:?}", other),
        }
        assert_eq!(harness.master.commands().last(), Some(&MasterCommand::ChildOffFast));
        assert_eq!(harness.collector.invalidations(), 1);
        assert!(harness.client.shutdown().await.is_err());
    }

    #[tokio::test]
    async fn reconfigure_reports_kind() {
        let mut harness = spawn_actor(fast_config(), RecordingMaster::default());
        wait_for_state(&mut harness.state_listener, FsmState::Leader).await;

        let mut slower = fast_config();
        slower.update_interval = Duration::from_secs(10);
        let kind = harness.client.reconfigure(slower).await.unwrap().unwrap();
        assert_eq!(kind, ReconfigureKind::Soft);
        assert_eq!(harness.state_listener.current(), FsmState::Leader);

        let mut schedd = fast_config();
        schedd.controllee_name = "SCHEDD".to_string();
        let kind = harness.client.reconfigure(schedd).await.unwrap().unwrap();
        assert_eq!(kind, ReconfigureKind::Hard);
        wait_for_state(&mut harness.state_listener, FsmState::Leader).await;

        harness.client.shutdown().await.unwrap();
        harness.actor_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn peer_messages_never_wait() {
        let (client, mut rx) = ActorClient::new(1);
        let weak = client.weak();
        let message = PeerMessage {
            sender_id: crate::roster::PeerId::new(1),
            controllee_name: "NEGOTIATOR".to_string(),
            peer_list: String::new(),
        };

        weak.deliver_peer_message(PeerCommand::Alive, message.clone()).unwrap();
        assert!(matches!(
            weak.deliver_peer_message(PeerCommand::Alive, message.clone()),
            Err(DeliveryError::Full)
        ));

        assert!(rx.recv().await.is_some());
        drop(client);
        assert!(matches!(
            weak.deliver_peer_message(PeerCommand::Alive, message),
            Err(DeliveryError::Exited)
        ));
    }
}
