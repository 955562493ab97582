//! The failover state machine and the machinery that drives it.
mod evidence;
mod state_change_listener;
mod state_machine;
mod timers;

#[cfg(test)]
pub(crate) mod test_utils;

pub(crate) use state_change_listener::FsmStateChangeListener;
pub(crate) use state_machine::Collaborators;
pub(crate) use state_machine::FailoverStateMachine;
pub use state_machine::FsmState;
pub use state_machine::ReconfigureKind;
pub(crate) use timers::PeriodicTimerHandle;
pub(crate) use timers::TimerKind;
pub(crate) use timers::TimerTick;
