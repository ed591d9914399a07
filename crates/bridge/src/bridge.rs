use crate::config::{validate, BridgeConfig, Options};
use crate::error::{BridgeError, Result};
use crate::handler::RecordHandler;
use crate::traits::{CollaboratorFactory, ProducerSettings, QueueProducer, StreamConsumer};
use std::sync::Arc;

/// The bridge only creates jobs, it never fetches them.
pub const PRODUCER_CONCURRENCY_LIMIT: usize = 1;

/// Lifecycle of a [`Bridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Initializing,
    Running,
    Failed,
    Stopped,
}

/// Consumes one Kafka topic and creates one SQS job per record.
///
/// Owns the stream consumer and queue producer for the life of the process.
/// Build it with a [`CollaboratorFactory`], then call [`init`](Self::init)
/// once.
pub struct Bridge<F: CollaboratorFactory> {
    factory: F,
    state: BridgeState,
    config: Option<BridgeConfig>,
    consumer: Option<Arc<F::Consumer>>,
    producer: Option<Arc<F::Producer>>,
}

impl<F: CollaboratorFactory> Bridge<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: BridgeState::Uninitialized,
            config: None,
            consumer: None,
            producer: None,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Validated configuration, once `init` got past validation.
    pub fn config(&self) -> Option<&BridgeConfig> {
        self.config.as_ref()
    }

    pub fn consumer(&self) -> Option<&F::Consumer> {
        self.consumer.as_deref()
    }

    pub fn producer(&self) -> Option<&F::Producer> {
        self.producer.as_deref()
    }

    /// Validate `opts`, then connect the consumer and initialize the producer
    /// concurrently.
    ///
    /// Invalid options fail with [`BridgeError::Config`] before anything is
    /// constructed. If either collaborator fails to start, its error is
    /// returned as [`BridgeError::Startup`] and the bridge ends up `Failed`;
    /// tearing down the half-started side is left to [`shutdown`](Self::shutdown).
    ///
    /// Must be awaited inside a tokio runtime: records are enqueued on tasks
    /// spawned on the runtime `init` runs in. Outside one, `init` fails with
    /// [`BridgeError::Startup`] before connecting anything.
    pub async fn init(&mut self, opts: Option<Options>) -> Result<()> {
        if self.state != BridgeState::Uninitialized {
            return Err(BridgeError::InvalidState(self.state));
        }
        self.state = BridgeState::Initializing;

        let result = self.start(opts).await;
        self.state = match result {
            Ok(()) => BridgeState::Running,
            Err(_) => BridgeState::Failed,
        };
        result
    }

    async fn start(&mut self, opts: Option<Options>) -> Result<()> {
        let config = validate(opts)?;
        let log = Arc::clone(&config.log);
        self.config = Some(config.clone());

        let consumer = self
            .factory
            .consumer(&config.topic, Arc::clone(&log))
            .map(Arc::new)
            .map_err(BridgeError::Startup)?;
        self.consumer = Some(Arc::clone(&consumer));

        let producer = self
            .factory
            .producer(ProducerSettings {
                endpoint: config.sqs_url.clone(),
                concurrency_limit: PRODUCER_CONCURRENCY_LIMIT,
                log: Arc::clone(&log),
            })
            .map(Arc::new)
            .map_err(BridgeError::Startup)?;
        self.producer = Some(Arc::clone(&producer));

        let handler = RecordHandler::new(
            config.topic.clone(),
            Arc::clone(&log),
            Arc::clone(&producer),
        )
        .map(Arc::new)
        .map_err(BridgeError::Startup)?;

        tokio::try_join!(
            consumer.connect(&config.consumer_group, handler),
            producer.init()
        )
        .map_err(BridgeError::Startup)?;

        log.info(format_args!(
            "Bridging topic {} (group {}) to {}",
            config.topic, config.consumer_group, config.sqs_url
        ));
        Ok(())
    }

    /// Stop consuming. Jobs already handed to the producer are left to finish
    /// on their own.
    pub async fn shutdown(&mut self) {
        if let Some(consumer) = self.consumer.take() {
            consumer.disconnect().await;
        }
        if self.state == BridgeState::Running {
            self.state = BridgeState::Stopped;
            if let Some(config) = &self.config {
                config
                    .log
                    .info(format_args!("Stopped bridging topic {}", config.topic));
            }
        }
    }
}
