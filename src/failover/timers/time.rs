use tokio::time::Instant;

/// Clock is the timer tasks' only source of time, so tests can drive them deterministically.
#[async_trait::async_trait]
pub(crate) trait Clock: Clone {
    fn now(&self) -> Instant;
    async fn sleep_until(&mut self, deadline: Instant);
}

#[derive(Copy, Clone)]
pub(crate) struct RealClock;

#[async_trait::async_trait]
impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
pub(crate) use mock::mocked_clock;
