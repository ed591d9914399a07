//! Kafka to SQS bridge.
//!
//! Consumes a single Kafka topic under a consumer group and creates one SQS job
//! for every record that carries a payload.
//!
//! # Delivery
//!
//! Jobs are created fire-and-forget: the consumer never waits on the queue, and
//! a failed enqueue is logged and dropped. Delivery is at-most-once,
//! best-effort. Queue arrival order is not tied to stream order.
//!
//! # Collaborators
//!
//! The Kafka consumer and the SQS producer are abstracted behind
//! [`StreamConsumer`] and [`QueueProducer`] and constructed through a
//! [`CollaboratorFactory`], so this crate carries no client dependency.

mod bridge;
pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod record;
pub mod traits;

pub use bridge::{Bridge, BridgeState, PRODUCER_CONCURRENCY_LIMIT};
pub use config::{validate, BridgeConfig, Options};
pub use error::{BridgeError, ConfigError, Result, TransportError};
pub use handler::RecordHandler;
pub use logger::{Logger, TracingLogger};
pub use record::InboundRecord;
pub use traits::{CollaboratorFactory, ProducerSettings, QueueProducer, StreamConsumer, StreamHandler};
