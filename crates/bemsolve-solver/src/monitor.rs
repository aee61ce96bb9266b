//! Per-iteration progress monitoring.

/// Receives one notification per solver iteration.
///
/// Kernels call [`on_iteration`](Self::on_iteration) exactly once per inner
/// iteration with the current relative residual estimate.
pub trait IterationMonitor {
    fn on_iteration(&mut self, residual: f64);
}

/// Counts solver iterations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IterationCounter {
    count: usize,
}

impl IterationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterations recorded so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl IterationMonitor for IterationCounter {
    fn on_iteration(&mut self, _residual: f64) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        assert_eq!(IterationCounter::new().count(), 0);
    }

    #[test]
    fn counter_ignores_residual() {
        let mut counter = IterationCounter::new();
        counter.on_iteration(1.0);
        counter.on_iteration(f64::NAN);
        counter.on_iteration(0.0);
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn counter_as_trait_object() {
        let mut counter = IterationCounter::new();
        {
            let monitor: &mut dyn IterationMonitor = &mut counter;
            monitor.on_iteration(0.5);
        }
        assert_eq!(counter.count(), 1);
    }
}
