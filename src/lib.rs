//! kafka-to-sqs
//!
//! Consumes a single Kafka topic as a member of a consumer group and creates one
//! SQS job per message that carries a value. Failed enqueues are logged and
//! dropped; the stream never stalls on the queue.
//!
//! # CLI Usage
//!
//! ```bash
//! kafka-to-sqs \
//!   --brokers localhost:9092 \
//!   --topic orders \
//!   --consumer-group orders-to-sqs \
//!   --sqs-url https://sqs.us-east-1.amazonaws.com/123456789012/orders
//!
//! # Same settings from a file, overriding the group
//! kafka-to-sqs --config bridge.toml --consumer-group orders-replay
//! ```
//!
//! # Crates
//!
//! - `kafka_to_sqs_bridge` - validation, lifecycle and per-record dispatch
//! - `kafka_to_sqs_kafka` - rdkafka consumer
//! - `kafka_to_sqs_sqs` - SQS producer

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use kafka_to_sqs_bridge::{
    Bridge, CollaboratorFactory, Logger, Options, ProducerSettings, TracingLogger,
};
use kafka_to_sqs_kafka::{ConsumerConfig, KafkaConsumer};
use kafka_to_sqs_sqs::SqsProducer;
use std::sync::Arc;
use tracing::info;

pub mod config;

pub use config::Config;

/// Builds the rdkafka consumer and the SQS producer for the bridge.
pub struct Collaborators {
    consumer_config: ConsumerConfig,
    sqs_client: aws_sdk_sqs::Client,
}

impl Collaborators {
    pub fn new(consumer_config: ConsumerConfig, sqs_client: aws_sdk_sqs::Client) -> Self {
        Self {
            consumer_config,
            sqs_client,
        }
    }
}

impl CollaboratorFactory for Collaborators {
    type Consumer = KafkaConsumer;
    type Producer = SqsProducer;

    fn consumer(&self, topic: &str, log: Arc<dyn Logger>) -> Result<KafkaConsumer> {
        Ok(KafkaConsumer::new(topic, self.consumer_config.clone(), log))
    }

    fn producer(&self, settings: ProducerSettings) -> Result<SqsProducer> {
        Ok(SqsProducer::new(self.sqs_client.clone(), settings))
    }
}

/// Start the bridge and keep it running until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let settings = config.bridge_settings()?;
    let consumer_config = config.consumer_config(&settings);
    info!("Using Kafka brokers {}", consumer_config.brokers);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let sqs_client = kafka_to_sqs_sqs::client(&sdk_config, config.sqs_endpoint_url.as_deref());

    let log: Arc<dyn Logger> = Arc::new(TracingLogger);
    let mut bridge = Bridge::new(Collaborators::new(consumer_config, sqs_client));

    if let Err(e) = bridge.init(Options::from_json(&settings, Some(log))).await {
        // Tear down whichever side did start
        bridge.shutdown().await;
        return Err(e).context("Failed to start bridge");
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    bridge.shutdown().await;
    Ok(())
}
