use crate::body::{MessageBody, CONTENT_ENCODING_ATTRIBUTE};
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_sqs::types::{MessageAttributeValue, QueueAttributeName};
use bytes::Bytes;
use kafka_to_sqs_bridge::{Logger, ProducerSettings, QueueProducer};
use std::sync::Arc;

/// Build an SQS client from loaded AWS config, optionally pointed at a custom
/// endpoint (e.g. LocalStack).
pub fn client(sdk_config: &SdkConfig, endpoint_url: Option<&str>) -> aws_sdk_sqs::Client {
    let mut builder = aws_sdk_sqs::config::Builder::from(sdk_config);
    if let Some(url) = endpoint_url {
        builder = builder.endpoint_url(url);
    }
    aws_sdk_sqs::Client::from_conf(builder.build())
}

/// Creates one SQS message per job
///
/// Clients are cheap to clone, so every producer can share the one built at
/// startup.
pub struct SqsProducer {
    client: aws_sdk_sqs::Client,
    queue_url: String,
    concurrency_limit: usize,
    log: Arc<dyn Logger>,
}

impl SqsProducer {
    pub fn new(client: aws_sdk_sqs::Client, settings: ProducerSettings) -> Self {
        Self {
            client,
            queue_url: settings.endpoint,
            concurrency_limit: settings.concurrency_limit,
            log: settings.log,
        }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Fetch concurrency requested by the owner. Only reported, since this
    /// producer never fetches.
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }
}

#[async_trait::async_trait]
impl QueueProducer for SqsProducer {
    async fn init(&self) -> Result<()> {
        let output = self
            .client
            .get_queue_attributes()
            .queue_url(&self.queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .with_context(|| format!("Failed to reach SQS queue {}", self.queue_url))?;

        let arn = output
            .attributes()
            .and_then(|attrs| attrs.get(&QueueAttributeName::QueueArn))
            .map(String::as_str)
            .unwrap_or("unknown");
        self.log.info(format_args!(
            "SQS queue ready: {arn} (fetch concurrency {})",
            self.concurrency_limit
        ));
        Ok(())
    }

    async fn create_job(&self, payload: Bytes) -> Result<()> {
        let body = MessageBody::from_payload(&payload);
        let encoding = body.encoding();

        let mut request = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body.into_text());

        if let Some(encoding) = encoding {
            let attribute = MessageAttributeValue::builder()
                .data_type("String")
                .string_value(encoding)
                .build()
                .context("Failed to build message attribute")?;
            request = request.message_attributes(CONTENT_ENCODING_ATTRIBUTE, attribute);
        }

        let output = request
            .send()
            .await
            .with_context(|| format!("Failed to send message to SQS queue {}", self.queue_url))?;

        tracing::debug!(
            "Created SQS job {} on {}",
            output.message_id().unwrap_or("<no id>"),
            self.queue_url
        );
        Ok(())
    }
}
