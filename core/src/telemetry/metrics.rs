use std::sync::Mutex;

/// Counters for pipeline progress: samples ingested, cycles that
/// produced a position, and cycles skipped as degenerate.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    ticks: usize,
    cycles: usize,
    skipped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                ticks: 0,
                cycles: 0,
                skipped: 0,
            }),
        }
    }

    pub fn record_tick(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
        }
    }

    pub fn record_cycle(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.cycles += 1;
        }
    }

    pub fn record_skip(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.skipped += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.ticks, metrics.cycles, metrics.skipped)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
