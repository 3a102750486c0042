use log::{debug, warn};

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    /// Per-cycle record; debug level since cycles run at the sampling
    /// rate once the pipeline is warm.
    pub fn record(&self, message: &str) {
        debug!("{}", message);
    }

    pub fn alert(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
