//! DevicePoller: periodic state refresh
//!
//! Runs in a background tokio task. Every tick the fan entity decides whether
//! a refresh is due (90s while on, 180s while off); the lamp and sensor
//! entities then pick up the client's latest snapshot.

use std::sync::Arc;
use std::time::Instant;
use tokio::time::{self, Duration};

use crate::bridge::BridgeState;

pub struct DevicePoller {
    state: BridgeState,
    tick: Duration,
}

impl DevicePoller {
    pub fn new(state: BridgeState, tick: Duration) -> Self {
        Self { state, tick }
    }

    /// Start the background poll loop (runs forever)
    pub async fn start(self: Arc<Self>) {
        tracing::info!(
            "[ZinPoll] Starting background poll for device {} (tick: {:?})",
            self.state.client.device_id(),
            self.tick
        );

        loop {
            self.poll_once().await;
            time::sleep(self.tick).await;
        }
    }

    /// One tick. A failed refresh leaves the stale snapshot in place.
    pub async fn poll_once(&self) {
        self.poll_at(Instant::now()).await;
    }

    pub async fn poll_at(&self, now: Instant) {
        let result = {
            let mut fan = self.state.fan.lock().await;
            fan.update_at(now).await
        };

        if let Err(e) = result {
            tracing::warn!(
                "[ZinPoll] Device {} refresh failed: {}",
                self.state.client.device_id(),
                e
            );
        }

        self.state.sync_entities().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollConfig;
    use crate::entity::{SensorKey, SensorValue};
    use crate::testing::FakeZinServer;
    use crate::zin::snapshot::tests::sample_payload;

    #[tokio::test]
    async fn test_poll_once_fetches_and_syncs_entities() {
        let server = FakeZinServer::start(sample_payload()).await;
        let client = Arc::new(server.client());
        let state = BridgeState::new(client, PollConfig::default()).await;
        let poller = DevicePoller::new(state.clone(), Duration::from_secs(10));

        poller.poll_once().await;
        assert_eq!(server.get_count(), 1);
        assert_eq!(state.lamp.lock().await.current_option(), Some("display"));
        let sensors = state.sensors.lock().await;
        assert!(sensors
            .iter()
            .all(|s| s.native_value().is_some()));
        drop(sensors);

        // Within the poll interval nothing is fetched
        poller.poll_once().await;
        assert_eq!(server.get_count(), 1);
    }

    #[tokio::test]
    async fn test_poll_failure_keeps_stale_state() {
        let server = FakeZinServer::start(sample_payload()).await;
        let client = Arc::new(server.client());
        let state = BridgeState::new(client, PollConfig::default()).await;
        let poller = DevicePoller::new(state.clone(), Duration::from_secs(10));
        let base = Instant::now();

        poller.poll_at(base).await;
        server.state().payload["sensor"]["airCondition"]["co2"] = serde_json::json!(900);
        server.state().fail_get = Some(500);

        poller.poll_at(base + Duration::from_secs(91)).await;
        assert_eq!(server.get_count(), 2);

        {
            let sensors = state.sensors.lock().await;
            let co2 = sensors
                .iter()
                .find(|s| s.key() == SensorKey::Co2)
                .unwrap();
            assert_eq!(co2.native_value(), Some(SensorValue::Integer(612)));
        }

        // The failed refresh is retried on the next tick
        server.state().fail_get = None;
        poller.poll_at(base + Duration::from_secs(92)).await;
        assert_eq!(server.get_count(), 3);
    }
}
