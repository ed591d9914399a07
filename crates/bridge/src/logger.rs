//! Logger capability handed to the bridge and its collaborators.

use std::fmt;

/// Sink for the three log levels the bridge emits.
///
/// Messages arrive pre-formatted as [`fmt::Arguments`], so implementations can
/// forward them anywhere without allocating unless they need to keep them.
pub trait Logger: Send + Sync {
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
}

/// Forwards to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{args}");
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{args}");
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!("{args}");
    }
}
