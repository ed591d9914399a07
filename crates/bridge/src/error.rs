use crate::bridge::BridgeState;
use thiserror::Error;

/// Invalid or missing bridge options. Raised before any I/O.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Options are required")]
    MissingOptions,

    #[error("\"topic\" is required")]
    MissingTopic,

    #[error("\"log\" is required")]
    MissingLogger,

    #[error("\"consumerGroup\" is required")]
    MissingConsumerGroup,

    #[error("\"sqsUrl\" is required")]
    MissingQueueEndpoint,
}

/// Failure of [`Bridge::init`](crate::Bridge::init).
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A collaborator failed to construct, connect or initialize. Carries its
    /// error unchanged.
    #[error(transparent)]
    Startup(anyhow::Error),

    #[error("Bridge cannot be initialized from state {0:?}")]
    InvalidState(BridgeState),
}

/// Stream-level fault reported by the consumer while running.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct TransportError(#[from] anyhow::Error);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self(err.into())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
