//! Per-record dispatch from the stream into the queue.

use crate::error::TransportError;
use crate::logger::Logger;
use crate::record::InboundRecord;
use crate::traits::{QueueProducer, StreamHandler};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Turns each delivered record into one queue job.
///
/// Holds no per-record state, so the consumer may call it from any thread.
/// Enqueue failures end at the logger: the job is dropped and the stream keeps
/// going.
pub struct RecordHandler<P> {
    topic: String,
    log: Arc<dyn Logger>,
    producer: Arc<P>,
    runtime: Handle,
}

impl<P: QueueProducer> RecordHandler<P> {
    /// Enqueue tasks are spawned on the tokio runtime this is called from.
    /// Fails outside a runtime.
    pub fn new(topic: String, log: Arc<dyn Logger>, producer: Arc<P>) -> Result<Self> {
        let runtime = Handle::try_current()
            .context("Record handler must be created inside a tokio runtime")?;
        Ok(Self {
            topic,
            log,
            producer,
            runtime,
        })
    }

    /// Submit the record's payload to the producer without waiting for it.
    fn dispatch(&self, record: InboundRecord) {
        let Some(payload) = record.job_payload().cloned() else {
            self.log.warn(format_args!(
                "No value provided, skipping SQS job creation for topic: {}. Raw message: {record:?}",
                self.topic
            ));
            return;
        };

        self.log
            .info(format_args!("Received message for topic: {}", self.topic));

        let producer = Arc::clone(&self.producer);
        let log = Arc::clone(&self.log);
        let topic = self.topic.clone();
        // Detached; the task reports its own failure.
        self.runtime.spawn(async move {
            if let Err(e) = producer.create_job(payload).await {
                log.error(format_args!(
                    "Error creating SQS job for topic: {topic} Error: {e:#}"
                ));
            }
        });
    }
}

impl<P: QueueProducer> StreamHandler for RecordHandler<P> {
    fn on_message(&self, record: InboundRecord) {
        self.dispatch(record);
    }

    fn on_error(&self, err: TransportError) {
        self.log.error(format_args!(
            "Kafka stream error for topic: {} Error: {err:#}",
            self.topic
        ));
    }
}
