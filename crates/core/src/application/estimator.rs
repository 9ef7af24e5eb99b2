// Wait Estimator - periodic advisory re-estimation
//
// The only autonomous actor in the system. Ticks on a fixed interval and
// recomputes waiting entries' estimates under the engine lock, so its
// writes are as indivisible as user-invoked operations. Tied to the
// lifetime of the active session via the shutdown channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::application::engine::SharedEngine;

/// Shutdown signal for graceful termination
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        let _ = self.rx.changed().await;
    }
}

/// Shutdown sender
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to the estimator task
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

/// Periodic task recomputing wait estimates for waiting entries
pub struct WaitEstimator {
    engine: SharedEngine,
    tick: Duration,
}

impl WaitEstimator {
    pub fn new(engine: SharedEngine, tick: Duration) -> Self {
        Self { engine, tick }
    }

    /// Run until the shutdown channel fires
    pub async fn run(self, mut shutdown: ShutdownToken) {
        info!(tick_secs = self.tick.as_secs(), "Wait estimator started");
        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.engine.lock() {
                        Ok(mut engine) => engine.reestimate_wait_times(),
                        Err(e) => warn!(error = %e, "Engine lock poisoned, skipping tick"),
                    }
                }
                _ = shutdown.wait() => {
                    info!("Wait estimator stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::QueueEngine;
    use crate::domain::{Clinic, ClinicStatus, Priority};
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use std::sync::{Arc, Mutex};

    fn shared_engine() -> SharedEngine {
        let clinic = Clinic {
            id: "c1".to_string(),
            name: "Clinic c1".to_string(),
            description: String::new(),
            status: ClinicStatus::Available,
            doctor_id: "doc-001".to_string(),
            current_queue_number: 0,
            total_served: 0,
            average_wait_minutes: 15,
        };
        Arc::new(Mutex::new(QueueEngine::new(
            vec![clinic],
            Vec::new(),
            Arc::new(SequentialIdProvider::new("q")),
            Arc::new(FixedTimeProvider::new(1_000)),
        )))
    }

    #[tokio::test]
    async fn test_estimator_updates_and_shuts_down() {
        let engine = shared_engine();
        let third = {
            let mut locked = engine.lock().unwrap();
            let first = locked.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
            locked.join_queue("p2", "B", "c1", Priority::Normal).unwrap();
            let third = locked.join_queue("p3", "C", "c1", Priority::Normal).unwrap();
            assert_eq!(third.estimated_wait_minutes, 30);
            // Leaving shifts everyone up one position; the stale estimate
            // stands until the next tick corrects it
            locked.leave_queue(&first.id).unwrap();
            third
        };

        let (sender, token) = shutdown_channel();
        let handle = tokio::spawn(
            WaitEstimator::new(engine.clone(), Duration::from_millis(10)).run(token),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        sender.shutdown();
        handle.await.unwrap();

        let locked = engine.lock().unwrap();
        let entries = locked.entries();
        let third_now = entries.iter().find(|e| e.id == third.id).unwrap();
        assert_eq!(third_now.estimated_wait_minutes, 15); // position 1 x 15 min
    }

    #[test]
    fn test_shutdown_token_state() {
        let (sender, token) = shutdown_channel();
        assert!(!token.is_shutdown());
        sender.shutdown();
        assert!(token.is_shutdown());
    }
}
