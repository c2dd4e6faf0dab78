/// Sink for the finder's progress messages.
pub trait Logger: Send + Sync {
    fn record(&self, message: &str);
}

/// Discards everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn record(&self, _message: &str) {}
}

/// Forwards records to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn record(&self, message: &str) {
        tracing::debug!(target: "favicon_finder", "{}", message);
    }
}

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn record(&self, message: &str) {
        self(message)
    }
}
