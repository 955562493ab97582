mod periodic_timer;
mod time;

#[cfg(test)]
mod test_utils;

pub(crate) use periodic_timer::PeriodicTimerHandle;
pub(crate) use periodic_timer::TimerKind;
pub(crate) use periodic_timer::TimerTick;
