use crate::failover::{FsmState, FsmStateChangeListener};

/// HadEventListener lets the embedding application watch the local state machine.
#[derive(Clone)]
pub struct HadEventListener {
    state_listener: FsmStateChangeListener,
}

impl HadEventListener {
    pub(crate) fn new(state_listener: FsmStateChangeListener) -> Self {
        HadEventListener { state_listener }
    }

    pub fn current_state(&self) -> FsmState {
        self.state_listener.current()
    }

    /// `next_state()` waits for the next state change. It doesn't queue: several changes between
    /// two calls are clobbered into the most recent one. Returns `None` once the daemon is gone.
    pub async fn next_state(&mut self) -> Option<FsmState> {
        self.state_listener.next().await
    }
}
