//! SQS job producer for `kafka-to-sqs`.
//!
//! Implements the bridge's [`QueueProducer`](kafka_to_sqs_bridge::QueueProducer)
//! with the AWS SDK. Credentials and region come from the standard AWS
//! environment/profile chain.

mod body;
mod producer;

pub use body::{MessageBody, CONTENT_ENCODING_ATTRIBUTE};
pub use producer::{client, SqsProducer};
