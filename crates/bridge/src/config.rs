//! Bridge options and their validation.
//!
//! Options may be built in code or read from untyped input (a config file,
//! environment) via [`Options::from_json`]. Either way they pass through
//! [`validate`] before anything is constructed or connected.

use crate::error::ConfigError;
use crate::logger::Logger;
use serde_json::Value;
use std::sync::Arc;

/// Unvalidated options, as supplied by the caller.
#[derive(Clone, Default)]
pub struct Options {
    /// Kafka topic to consume
    pub topic: Option<String>,
    pub log: Option<Arc<dyn Logger>>,
    /// Kafka consumer group ID
    pub consumer_group: Option<String>,
    /// URL of the SQS queue jobs are created on
    pub sqs_url: Option<String>,
}

impl Options {
    /// Read options from an untyped JSON value using the keys `topic`,
    /// `consumerGroup` and `sqsUrl`.
    ///
    /// Only an empty value (`null`, `false`, `0`, `""`) counts as no options at
    /// all and yields `None`. Any other value is read as an object, so a
    /// non-object such as `[1, 2]` has no fields and fails on `topic`. Fields
    /// that are missing or not strings stay unset and are reported by
    /// [`validate`]. The logger cannot come from JSON and is passed separately.
    pub fn from_json(value: &Value, log: Option<Arc<dyn Logger>>) -> Option<Self> {
        if is_empty_value(value) {
            return None;
        }
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            topic: field("topic"),
            log,
            consumer_group: field("consumerGroup"),
            sqs_url: field("sqsUrl"),
        })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("topic", &self.topic)
            .field("log", &self.log.as_ref().map(|_| ".."))
            .field("consumer_group", &self.consumer_group)
            .field("sqs_url", &self.sqs_url)
            .finish()
    }
}

/// Options that passed validation.
#[derive(Clone)]
pub struct BridgeConfig {
    pub topic: String,
    pub log: Arc<dyn Logger>,
    pub consumer_group: String,
    pub sqs_url: String,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("topic", &self.topic)
            .field("consumer_group", &self.consumer_group)
            .field("sqs_url", &self.sqs_url)
            .finish_non_exhaustive()
    }
}

/// Check `opts` field by field in a fixed order: the options themselves,
/// `topic`, `log`, `consumerGroup`, `sqsUrl`. The first failure wins.
pub fn validate(opts: Option<Options>) -> Result<BridgeConfig, ConfigError> {
    let opts = opts.ok_or(ConfigError::MissingOptions)?;

    let topic = non_empty(opts.topic).ok_or(ConfigError::MissingTopic)?;
    let log = opts.log.ok_or(ConfigError::MissingLogger)?;
    let consumer_group = non_empty(opts.consumer_group).ok_or(ConfigError::MissingConsumerGroup)?;
    let sqs_url = non_empty(opts.sqs_url).ok_or(ConfigError::MissingQueueEndpoint)?;

    Ok(BridgeConfig {
        topic,
        log,
        consumer_group,
        sqs_url,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
