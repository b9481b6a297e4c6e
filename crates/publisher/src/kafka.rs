//! Kafka-backed [`ReportPublisher`].
//!
//! Wraps the synchronous `kafka` crate producer. Connecting loads cluster
//! metadata from the configured brokers, so an unreachable cluster fails in
//! [`KafkaPublisher::connect`] rather than at send time.

use kafka::producer::{Producer, Record};
use tracing::{debug, info};

use scanpost_core::config::KafkaConfig;

use crate::error::PublisherError;
use crate::publisher::ReportPublisher;

/// Publishes reports to one Kafka topic.
///
/// The producer's connections are closed when this value is dropped.
pub struct KafkaPublisher {
    producer: Producer,
    topic: String,
    brokers: String,
}

impl KafkaPublisher {
    /// Validates `config` and connects to the brokers.
    ///
    /// Acks and timeouts are left at the client defaults.
    ///
    /// # Errors
    ///
    /// - `PublisherError::Config`: topic, brokers or client id are invalid
    /// - `PublisherError::Connect`: no broker could be reached
    pub fn connect(config: &KafkaConfig) -> Result<Self, PublisherError> {
        config.validate()?;

        let brokers = config.brokers.join(",");
        info!(brokers = %brokers, topic = %config.topic, "connecting to kafka");

        let producer = Producer::from_hosts(config.brokers.clone())
            .with_client_id(config.client_id.clone())
            .create()
            .map_err(|e| PublisherError::Connect {
                brokers: brokers.clone(),
                reason: e.to_string(),
            })?;

        debug!(brokers = %brokers, "kafka producer created");

        Ok(Self {
            producer,
            topic: config.topic.clone(),
            brokers,
        })
    }
}

impl ReportPublisher for KafkaPublisher {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&mut self, key: Option<&[u8]>, payload: &[u8]) -> Result<(), PublisherError> {
        let sent = match key {
            Some(key) => self
                .producer
                .send(&Record::from_key_value(&self.topic, key, payload)),
            None => self.producer.send(&Record::from_value(&self.topic, payload)),
        };

        sent.map_err(|e| PublisherError::Send {
            topic: self.topic.clone(),
            reason: e.to_string(),
        })?;

        info!(
            topic = %self.topic,
            bytes = payload.len(),
            keyed = key.is_some(),
            "report published"
        );
        Ok(())
    }
}

impl Drop for KafkaPublisher {
    fn drop(&mut self) {
        debug!(brokers = %self.brokers, "closing kafka producer");
    }
}
