use crate::failover::state_machine::{Collaborators, FailoverStateMachine, FsmState};
use crate::grpc::ProtoStatusRecord;
use crate::roster::tests::{addr, config_for, test_logger};
use crate::roster::{Configuration, PeerAddress};
use crate::transport::{
    CollectorTransport, MasterCommand, MasterTransport, PeerCommand, PeerMessage, PeerTransport, ReplicationCommand,
    ReplicationTransport, TransportError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory network. Every address has an inbox; sending to a down address times out.
#[derive(Clone, Default)]
pub(crate) struct SimNetwork {
    inner: Arc<Mutex<SimNetworkInner>>,
}

#[derive(Default)]
struct SimNetworkInner {
    inboxes: HashMap<PeerAddress, Vec<(PeerCommand, PeerMessage)>>,
    down: HashSet<PeerAddress>,
}

impl SimNetwork {
    pub(crate) fn take_inbox(&self, address: &PeerAddress) -> Vec<(PeerCommand, PeerMessage)> {
        let mut inner = self.inner.lock().unwrap();
        inner.inboxes.remove(address).unwrap_or_default()
    }

    pub(crate) fn set_down(&self, address: &PeerAddress, down: bool) {
        let mut inner = self.inner.lock().unwrap();
        if down {
            inner.down.insert(address.clone());
        } else {
            inner.down.remove(address);
        }
        inner.inboxes.remove(address);
    }
}

#[async_trait::async_trait]
impl PeerTransport for SimNetwork {
    async fn send(
        &mut self,
        peer: &PeerAddress,
        command: PeerCommand,
        message: PeerMessage,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.down.contains(peer) {
            return Err(TransportError::Timeout(timeout));
        }
        inner.inboxes.entry(peer.clone()).or_default().push((command, message));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingMaster {
    sent: Arc<Mutex<Vec<(MasterCommand, String)>>>,
    fail_start: Arc<AtomicBool>,
    fail_stop: Arc<AtomicBool>,
}

impl RecordingMaster {
    pub(crate) fn commands(&self) -> Vec<MasterCommand> {
        self.sent.lock().unwrap().iter().map(|(command, _)| *command).collect()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, name)| name.clone()).collect()
    }

    pub(crate) fn fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_stop(&self, fail: bool) {
        self.fail_stop.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl MasterTransport for RecordingMaster {
    async fn send(
        &mut self,
        _master: &PeerAddress,
        command: MasterCommand,
        controllee_name: &str,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let fail = match command {
            MasterCommand::ChildOn => &self.fail_start,
            MasterCommand::ChildOffFast => &self.fail_stop,
        };
        if fail.load(Ordering::SeqCst) {
            return Err(TransportError::Timeout(timeout));
        }
        self.sent.lock().unwrap().push((command, controllee_name.to_string()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingReplication {
    sent: Arc<Mutex<Vec<ReplicationCommand>>>,
    attempts: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl RecordingReplication {
    pub(crate) fn commands(&self) -> Vec<ReplicationCommand> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ReplicationTransport for RecordingReplication {
    async fn send(
        &mut self,
        _replication_daemon: &PeerAddress,
        command: ReplicationCommand,
        _my_address: &PeerAddress,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Timeout(timeout));
        }
        self.sent.lock().unwrap().push(command);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingCollector {
    updates: Arc<Mutex<Vec<ProtoStatusRecord>>>,
    invalidations: Arc<AtomicUsize>,
}

impl RecordingCollector {
    /// The `is_active` flag of every update, oldest first.
    pub(crate) fn published(&self) -> Vec<bool> {
        self.updates.lock().unwrap().iter().map(|record| record.is_active).collect()
    }

    pub(crate) fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CollectorTransport for RecordingCollector {
    async fn update(
        &mut self,
        _collector: &PeerAddress,
        record: ProtoStatusRecord,
        _timeout: Duration,
    ) -> Result<(), TransportError> {
        self.updates.lock().unwrap().push(record);
        Ok(())
    }

    async fn invalidate(
        &mut self,
        _collector: &PeerAddress,
        _name: &str,
        _timeout: Duration,
    ) -> Result<(), TransportError> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// SimNode is one state machine wired to recording collaborators.
pub(crate) struct SimNode {
    pub fsm: FailoverStateMachine,
    pub master: RecordingMaster,
    pub replication: RecordingReplication,
    pub collector: RecordingCollector,
}

impl SimNode {
    pub(crate) async fn new(config: Configuration) -> Self {
        Self::on_network(config, SimNetwork::default()).await
    }

    async fn on_network(config: Configuration, network: SimNetwork) -> Self {
        let master = RecordingMaster::default();
        let replication = RecordingReplication::default();
        let collector = RecordingCollector::default();
        let collaborators = Collaborators {
            peers: Box::new(network),
            master: Box::new(master.clone()),
            replication: Box::new(replication.clone()),
            collectors: Box::new(collector.clone()),
        };

        let (mut fsm, _state_listener) = FailoverStateMachine::create(test_logger(), config, collaborators);
        fsm.start().await.unwrap();

        SimNode {
            fsm,
            master,
            replication,
            collector,
        }
    }

    /// Cycles a lone node until it reaches `state`.
    pub(crate) async fn run_until(&mut self, state: FsmState) {
        for _ in 0..20 {
            self.fsm.cycle().await.unwrap();
            if self.fsm.state() == state {
                return;
            }
        }
        panic!("Never reached {:?}, stuck in {:?}", state, self.fsm.state());
    }
}

/// SimCluster runs one state machine per peer over a shared SimNetwork. Each round, every live
/// node in turn drains its inbox and then cycles once.
pub(crate) struct SimCluster {
    pub nodes: Vec<SimNode>,
    network: SimNetwork,
    peers: Vec<PeerAddress>,
    use_primary: bool,
    alive: Vec<bool>,
}

impl SimCluster {
    pub(crate) async fn new(peers: &[PeerAddress], use_primary: bool) -> Self {
        let network = SimNetwork::default();
        let mut nodes = Vec::with_capacity(peers.len());
        for index in 0..peers.len() {
            nodes.push(SimNode::on_network(Self::node_config(peers, index, use_primary), network.clone()).await);
        }

        SimCluster {
            nodes,
            network,
            peers: peers.to_vec(),
            use_primary,
            alive: vec![true; peers.len()],
        }
    }

    fn node_config(peers: &[PeerAddress], index: usize, use_primary: bool) -> Configuration {
        let mut config = config_for(peers, index, use_primary);
        config.collectors = vec![addr("10.0.0.100:9618")];
        config
    }

    pub(crate) fn kill(&mut self, index: usize) {
        self.alive[index] = false;
        self.network.set_down(&self.peers[index], true);
    }

    /// Brings a killed node back as a fresh process.
    pub(crate) async fn restart(&mut self, index: usize) {
        self.network.set_down(&self.peers[index], false);
        let config = Self::node_config(&self.peers, index, self.use_primary);
        self.nodes[index] = SimNode::on_network(config, self.network.clone()).await;
        self.alive[index] = true;
    }

    pub(crate) async fn run_intervals(&mut self, intervals: usize) {
        let rounds = intervals * crate::roster::MESSAGES_PER_INTERVAL_FACTOR as usize;
        for _ in 0..rounds {
            for index in 0..self.nodes.len() {
                if !self.alive[index] {
                    continue;
                }
                for (command, message) in self.network.take_inbox(&self.peers[index]) {
                    self.nodes[index].fsm.receive(command, message);
                }
                self.nodes[index].fsm.cycle().await.unwrap();
            }
        }
    }

    pub(crate) fn states(&self) -> Vec<FsmState> {
        self.nodes.iter().map(|node| node.fsm.state()).collect()
    }

    /// Indexes of live nodes that are LEADER.
    pub(crate) fn leaders(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|index| self.alive[*index] && self.nodes[*index].fsm.state() == FsmState::Leader)
            .collect()
    }
}
