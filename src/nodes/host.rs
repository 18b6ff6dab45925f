use super::{Driver, NodeInfo};
use crate::{config::Mqtt, error::AppError};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde_json::json;
use std::{collections::BTreeSet, sync::Mutex, time::Duration};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

/// The hub side of the node server: where nodes, driver values and notices go.
pub trait NodeHost: Send + Sync {
    fn add_node(&self, node: &NodeInfo) -> Result<(), AppError>;
    fn del_node(&self, address: &str) -> Result<(), AppError>;
    fn set_driver(&self, address: &str, driver: &Driver) -> Result<(), AppError>;
    fn add_notice(&self, key: &str, text: &str) -> Result<(), AppError>;
    fn remove_notices_all(&self) -> Result<(), AppError>;
}

/// Publishes node state to an MQTT broker under `topic_prefix`.
pub struct MqttHost {
    client: AsyncClient,
    topic_prefix: String,
    notices: Mutex<BTreeSet<String>>,
}

impl MqttHost {
    pub fn new(cfg: &Mqtt) -> (Self, EventLoop) {
        let mut options = MqttOptions::new(&cfg.client_id, &cfg.host, cfg.port);
        options.set_keep_alive(Duration::from_secs(cfg.keep_alive_secs));
        let (client, eventloop) = AsyncClient::new(options, 100);
        let host = Self { client, topic_prefix: cfg.topic_prefix.trim_end_matches('/').to_owned(), notices: Mutex::default() };
        (host, eventloop)
    }

    fn publish(&self, topic: String, retain: bool, payload: Vec<u8>) -> Result<(), AppError> {
        trace!(topic = %topic, "MQTT publish.");
        self.client.try_publish(topic, QoS::AtLeastOnce, retain, payload).map_err(|e| AppError::Host(e.to_string()))
    }

    fn topic(&self, suffix: &str) -> String {
        format!("{}/{}", self.topic_prefix, suffix)
    }
}

impl NodeHost for MqttHost {
    fn add_node(&self, node: &NodeInfo) -> Result<(), AppError> {
        let payload = serde_json::to_vec(node)?;
        self.publish(self.topic(&format!("nodes/{}", node.address)), true, payload)
    }

    fn del_node(&self, address: &str) -> Result<(), AppError> {
        self.publish(self.topic(&format!("nodes/{}", address)), true, Vec::new())
    }

    fn set_driver(&self, address: &str, driver: &Driver) -> Result<(), AppError> {
        let payload = serde_json::to_vec(&json!({ "value": driver.value, "uom": driver.uom }))?;
        self.publish(self.topic(&format!("{}/{}", address, driver.driver)), false, payload)
    }

    fn add_notice(&self, key: &str, text: &str) -> Result<(), AppError> {
        self.notices.lock().map_err(|e| AppError::Host(e.to_string()))?.insert(key.to_owned());
        self.publish(self.topic(&format!("notices/{}", key)), true, text.as_bytes().to_vec())
    }

    fn remove_notices_all(&self) -> Result<(), AppError> {
        let keys = std::mem::take(&mut *self.notices.lock().map_err(|e| AppError::Host(e.to_string()))?);
        for key in keys {
            self.publish(self.topic(&format!("notices/{}", key)), true, Vec::new())?;
        }
        Ok(())
    }
}

/// Drives the MQTT connection until `stop_signal` flips.
pub async fn monitor_mqtt(mut eventloop: EventLoop, mut stop_signal: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            event = eventloop.poll() => match event {
                Ok(Event::Incoming(Packet::ConnAck(_))) => info!("Connected to MQTT broker."),
                Ok(event) => trace!(?event, "MQTT event."),
                Err(e) => {
                    warn!(error = %e, "MQTT connection error, retrying.");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            },
            _ = stop_signal.changed() => {
                debug!("Stopping MQTT monitor.");
                break;
            }
        }
    }
}
