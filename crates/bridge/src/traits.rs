//! Contracts of the two collaborators the bridge drives.
//!
//! The bridge never talks to Kafka or SQS directly. The binary plugs in the
//! rdkafka and aws-sdk implementations; tests plug in in-memory ones.

use crate::error::TransportError;
use crate::logger::Logger;
use crate::record::InboundRecord;
use anyhow::Result;
use bytes::Bytes;
use std::sync::Arc;

/// Callbacks a [`StreamConsumer`] invokes for the lifetime of its connection.
pub trait StreamHandler: Send + Sync {
    /// Called once per delivered record. Must not block on downstream work.
    fn on_message(&self, record: InboundRecord);

    /// Called once per transport fault. Recovery is the consumer's business.
    fn on_error(&self, err: TransportError);
}

/// Consumes one topic as a member of a consumer group.
#[async_trait::async_trait]
pub trait StreamConsumer: Send + Sync + 'static {
    /// Join `consumer_group` and start delivering to `handler`.
    ///
    /// Resolves once the subscription is established. Delivery continues in the
    /// background until [`disconnect`](Self::disconnect).
    async fn connect(&self, consumer_group: &str, handler: Arc<dyn StreamHandler>) -> Result<()>;

    /// Stop delivering records.
    async fn disconnect(&self) {}
}

/// Creates jobs on a work queue.
#[async_trait::async_trait]
pub trait QueueProducer: Send + Sync + 'static {
    /// Verify the target queue is reachable.
    async fn init(&self) -> Result<()>;

    /// Enqueue one job whose body is `payload`.
    async fn create_job(&self, payload: Bytes) -> Result<()>;
}

/// Settings the bridge hands to the producer constructor.
#[derive(Clone)]
pub struct ProducerSettings {
    /// Queue URL
    pub endpoint: String,
    /// Maximum concurrent fetch operations. The bridge never fetches, so it
    /// always asks for the minimum.
    pub concurrency_limit: usize,
    pub log: Arc<dyn Logger>,
}

impl std::fmt::Debug for ProducerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerSettings")
            .field("endpoint", &self.endpoint)
            .field("concurrency_limit", &self.concurrency_limit)
            .finish_non_exhaustive()
    }
}

/// Builds the concrete collaborators once the options are known to be valid.
pub trait CollaboratorFactory: Send + Sync {
    type Consumer: StreamConsumer;
    type Producer: QueueProducer;

    fn consumer(&self, topic: &str, log: Arc<dyn Logger>) -> Result<Self::Consumer>;

    fn producer(&self, settings: ProducerSettings) -> Result<Self::Producer>;
}
