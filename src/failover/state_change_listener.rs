use crate::failover::FsmState;
use tokio::sync::watch;

pub(crate) fn new(initial_state: FsmState) -> (FsmStateChangeNotifier, FsmStateChangeListener) {
    let (snd, rcv) = watch::channel(initial_state);

    (FsmStateChangeNotifier { snd }, FsmStateChangeListener { rcv })
}

pub(crate) struct FsmStateChangeNotifier {
    snd: watch::Sender<FsmState>,
}

impl FsmStateChangeNotifier {
    pub(crate) fn notify_new_state(&self, new_state: FsmState) {
        let _ = self.snd.send(new_state);
    }
}

#[derive(Clone)]
pub(crate) struct FsmStateChangeListener {
    rcv: watch::Receiver<FsmState>,
}

impl FsmStateChangeListener {
    pub(crate) fn current(&self) -> FsmState {
        *self.rcv.borrow()
    }

    /// Intermediate states are clobbered, only the most recent one is returned.
    pub(crate) async fn next(&mut self) -> Option<FsmState> {
        match self.rcv.changed().await {
            Ok(_) => Some(*self.rcv.borrow()),
            Err(_) => None,
        }
    }
}
