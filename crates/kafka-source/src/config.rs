use rdkafka::config::ClientConfig;

/// Configuration for the Kafka consumer
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    /// Auto offset reset strategy ("earliest" or "latest")
    ///
    /// Only applies when the consumer group has no committed offsets yet.
    pub auto_offset_reset: String,
    /// Session timeout in milliseconds
    pub session_timeout_ms: String,
    /// Enable auto commit
    ///
    /// On by default: offsets advance regardless of whether the queue accepted
    /// the job, so a restart does not replay records that were already
    /// dispatched.
    pub enable_auto_commit: bool,
    /// How long `connect` waits for topic metadata before giving up, in
    /// milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            auto_offset_reset: "latest".to_string(),
            session_timeout_ms: "30000".to_string(),
            enable_auto_commit: true,
            connect_timeout_ms: 10_000,
        }
    }
}

impl ConsumerConfig {
    /// rdkafka client configuration for a member of `group_id`.
    pub fn client_config(&self, group_id: &str) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", self.enable_auto_commit.to_string())
            .set("auto.offset.reset", &self.auto_offset_reset)
            .set("session.timeout.ms", &self.session_timeout_ms)
            .set("enable.partition.eof", "false");
        config
    }
}
