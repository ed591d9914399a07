use bytes::Bytes;

/// A record delivered by the stream consumer.
///
/// The bridge only looks at `payload`; the remaining fields are carried along
/// for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// Message key (if any)
    pub key: Option<Vec<u8>>,
    /// Message timestamp (milliseconds since epoch)
    pub timestamp: Option<i64>,
    pub payload: Option<Bytes>,
}

impl InboundRecord {
    /// Record carrying only a payload, as produced by test fixtures and
    /// non-Kafka consumers.
    pub fn with_payload(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Default::default()
        }
    }

    /// The payload to enqueue, or `None` when the record has nothing to forward.
    ///
    /// Empty payloads count as absent.
    pub fn job_payload(&self) -> Option<&Bytes> {
        self.payload.as_ref().filter(|p| !p.is_empty())
    }
}
