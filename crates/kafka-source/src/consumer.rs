use crate::config::ConsumerConfig;
use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use kafka_to_sqs_bridge::{InboundRecord, Logger, StreamConsumer, StreamHandler, TransportError};
use rdkafka::consumer::{Consumer as RdkafkaConsumer, StreamConsumer as RdkafkaStreamConsumer};
use rdkafka::message::Message as RdkafkaMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Kafka consumer for a single topic
///
/// Nothing touches the network until [`connect`](StreamConsumer::connect),
/// which creates the rdkafka consumer in the requested group, subscribes, and
/// spawns the task that feeds records to the handler.
pub struct KafkaConsumer {
    topic: String,
    config: ConsumerConfig,
    log: Arc<dyn Logger>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl KafkaConsumer {
    pub fn new(topic: impl Into<String>, config: ConsumerConfig, log: Arc<dyn Logger>) -> Self {
        Self {
            topic: topic.into(),
            config,
            log,
            task: Mutex::new(None),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Block until the brokers answer with metadata for our topic. Returns the
    /// partition count.
    async fn await_topic(&self, consumer: Arc<RdkafkaStreamConsumer>) -> Result<usize> {
        let topic = self.topic.clone();
        let timeout = Duration::from_millis(self.config.connect_timeout_ms);

        // fetch_metadata is a blocking librdkafka call
        tokio::task::spawn_blocking(move || -> Result<usize> {
            let metadata = consumer
                .fetch_metadata(Some(&topic), timeout)
                .with_context(|| format!("Failed to fetch metadata for topic {topic}"))?;

            let found = metadata
                .topics()
                .iter()
                .find(|t| t.name() == topic)
                .ok_or_else(|| anyhow!("Topic {topic} not found in broker metadata"))?;
            if let Some(err) = found.error() {
                return Err(anyhow!("Topic {topic} is unavailable: {err:?}"));
            }

            Ok(found.partitions().len())
        })
        .await
        .context("Metadata lookup task failed")?
    }
}

#[async_trait::async_trait]
impl StreamConsumer for KafkaConsumer {
    async fn connect(&self, consumer_group: &str, handler: Arc<dyn StreamHandler>) -> Result<()> {
        let consumer: RdkafkaStreamConsumer = self
            .config
            .client_config(consumer_group)
            .create()
            .context("Failed to create Kafka consumer")?;

        consumer
            .subscribe(&[&self.topic])
            .with_context(|| format!("Failed to subscribe to topic {}", self.topic))?;

        let consumer = Arc::new(consumer);
        let partitions = self.await_topic(Arc::clone(&consumer)).await?;
        self.log.info(format_args!(
            "Connected to Kafka topic {} ({partitions} partitions) as group {consumer_group}",
            self.topic
        ));

        let handle = tokio::spawn(receive_loop(consumer, handler));
        if let Some(previous) = self.task.lock().await.replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    async fn disconnect(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
            tracing::debug!("Stopped Kafka receive loop for topic {}", self.topic);
        }
    }
}

/// Deliver records and faults to `handler` until the task is aborted.
async fn receive_loop(consumer: Arc<RdkafkaStreamConsumer>, handler: Arc<dyn StreamHandler>) {
    loop {
        match consumer.recv().await {
            Ok(msg) => handler.on_message(inbound_record(&msg)),
            Err(e) => handler.on_error(TransportError::new(e)),
        }
    }
}

/// Copy the parts of a Kafka message the bridge cares about.
pub fn inbound_record<M: RdkafkaMessage>(msg: &M) -> InboundRecord {
    InboundRecord {
        topic: msg.topic().to_string(),
        partition: msg.partition(),
        offset: msg.offset(),
        key: msg.key().map(|k| k.to_vec()),
        timestamp: msg.timestamp().to_millis(),
        payload: msg.payload().map(Bytes::copy_from_slice),
    }
}
