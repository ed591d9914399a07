//! Kafka consumer for `kafka-to-sqs`.
//!
//! Implements the bridge's [`StreamConsumer`](kafka_to_sqs_bridge::StreamConsumer)
//! on top of rdkafka: joins a consumer group for a single topic and hands every
//! record to the bridge from a background task.

/// Connection settings shared by every consumer of the process
pub mod config;

/// Group-member consumer with a background receive loop
pub mod consumer;

pub use config::ConsumerConfig;
pub use consumer::{inbound_record, KafkaConsumer};
