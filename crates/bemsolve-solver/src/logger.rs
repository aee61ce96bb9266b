//! Logging sink for solve progress messages.

/// Destination for informational messages emitted around a solve.
pub trait SolveLogger {
    fn info(&self, message: &str);
}

/// Forwards messages to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl SolveLogger for LogFacade {
    fn info(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Discards all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl SolveLogger for NoopLogger {
    fn info(&self, _message: &str) {}
}
