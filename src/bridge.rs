//! Shared state between the HTTP API and the background poller

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::PollConfig;
use crate::entity::{ZinFan, ZinLamp, ZinSensor};
use crate::zin::ZinClient;

#[derive(Clone)]
pub struct BridgeState {
    pub client: Arc<ZinClient>,
    pub fan: Arc<Mutex<ZinFan>>,
    pub lamp: Arc<Mutex<ZinLamp>>,
    pub sensors: Arc<Mutex<Vec<ZinSensor>>>,
}

impl BridgeState {
    pub async fn new(client: Arc<ZinClient>, poll: PollConfig) -> Self {
        let fan = ZinFan::new(Arc::clone(&client), poll).await;
        let lamp = ZinLamp::new(Arc::clone(&client)).await;
        let sensors = ZinSensor::all(&client).await;

        Self {
            client,
            fan: Arc::new(Mutex::new(fan)),
            lamp: Arc::new(Mutex::new(lamp)),
            sensors: Arc::new(Mutex::new(sensors)),
        }
    }

    /// Point every entity at the client's latest snapshot without fetching
    pub async fn sync_entities(&self) {
        self.fan.lock().await.sync().await;
        self.lamp.lock().await.update().await;
        for sensor in self.sensors.lock().await.iter_mut() {
            sensor.update().await;
        }
    }
}
