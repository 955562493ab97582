use crate::actor::Event;
use crate::failover::timers::TimerTick;
use std::time::Duration;
use tokio::sync::mpsc;

/// TestUtilActor stands in for the HAD actor: it acks timer ticks and fails on anything else.
pub(super) struct TestUtilActor {
    rx: mpsc::Receiver<Event>,
    quiet_period: Duration,
}

impl TestUtilActor {
    pub(super) fn new(rx: mpsc::Receiver<Event>) -> Self {
        TestUtilActor {
            rx,
            quiet_period: Duration::from_millis(10),
        }
    }

    pub(super) async fn assert_tick(&mut self, expected: TimerTick) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("Unexpected timeout")
            .expect("Actor queue closed");

        match event {
            Event::TimerTick(tick, callback) => {
                assert_eq!(tick, expected);
                callback.send(());
            }
            other => panic!("Unexpected event {:?}", other),
        }
    }

    pub(super) async fn assert_no_event(&mut self) {
        tokio::time::timeout(self.quiet_period, self.rx.recv())
            .await
            .expect_err("Expected no event");
    }
}
