//! Command-line, environment and file configuration.
//!
//! Bridge settings (`topic`, `consumerGroup`, `sqsUrl`) are merged into an
//! untyped JSON object and validated by the bridge itself, so a bad value from
//! a file is reported the same way as a bad value from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use kafka_to_sqs_kafka::ConsumerConfig;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_BROKERS: &str = "localhost:9092";

/// Configuration for the Kafka to SQS bridge.
#[derive(Debug, Clone, Parser)]
#[command(name = "kafka-to-sqs")]
#[command(about = "Consume a Kafka topic and create one SQS job per message")]
pub struct Config {
    /// TOML file with bridge settings. Command-line and environment values
    /// take precedence over the file.
    #[arg(long, value_name = "PATH", env = "KAFKA_TO_SQS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Topic to consume from
    #[arg(long, env = "KAFKA_TOPIC")]
    pub topic: Option<String>,

    /// Consumer group ID
    #[arg(long, env = "KAFKA_CONSUMER_GROUP")]
    pub consumer_group: Option<String>,

    /// URL of the SQS queue to create jobs on
    #[arg(long, env = "SQS_URL")]
    pub sqs_url: Option<String>,

    /// Kafka brokers (comma-separated or multiple --brokers)
    #[arg(long, value_delimiter = ',', env = "KAFKA_BROKERS")]
    pub brokers: Vec<String>,

    /// Where to start when the group has no committed offsets ("earliest" or "latest")
    #[arg(long, default_value = "latest")]
    pub auto_offset_reset: String,

    /// Session timeout in milliseconds
    #[arg(long, default_value = "30000")]
    pub session_timeout_ms: String,

    /// How long to wait for topic metadata on startup, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub connect_timeout_ms: u64,

    /// Disable automatic offset commits
    #[arg(long)]
    pub disable_auto_commit: bool,

    /// Custom SQS endpoint (e.g. LocalStack)
    #[arg(long, env = "SQS_ENDPOINT_URL")]
    pub sqs_endpoint_url: Option<String>,
}

impl Config {
    /// Bridge settings from the config file overlaid with command-line values.
    pub fn bridge_settings(&self) -> Result<Value> {
        let mut settings = match &self.config {
            Some(path) => load_file(path)?,
            None => Map::new(),
        };

        for (key, value) in [
            ("topic", &self.topic),
            ("consumerGroup", &self.consumer_group),
            ("sqsUrl", &self.sqs_url),
        ] {
            if let Some(value) = value {
                settings.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        Ok(Value::Object(settings))
    }

    /// Kafka consumer settings. Brokers come from the command line, then the
    /// `brokers` key of `settings` (string or array), then the default.
    pub fn consumer_config(&self, settings: &Value) -> ConsumerConfig {
        let brokers = if self.brokers.is_empty() {
            file_brokers(settings).unwrap_or_else(|| DEFAULT_BROKERS.to_string())
        } else {
            self.brokers.join(",")
        };

        ConsumerConfig {
            brokers,
            auto_offset_reset: self.auto_offset_reset.clone(),
            session_timeout_ms: self.session_timeout_ms.clone(),
            enable_auto_commit: !self.disable_auto_commit,
            connect_timeout_ms: self.connect_timeout_ms,
        }
    }
}

fn load_file(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn file_brokers(settings: &Value) -> Option<String> {
    match settings.get("brokers")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let brokers: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!brokers.is_empty()).then(|| brokers.join(","))
        }
        _ => None,
    }
}
