use crate::prelude::CycleOutput;
use tokio::sync::watch;

/// One-way handoff from the tick loop to presentation consumers.
///
/// Backed by a watch channel: `publish` replaces the latest snapshot
/// without blocking or failing, and consumers read at their own pace,
/// so a slow renderer or chart can never lengthen the sampling
/// interval.
pub struct Emitter {
    tx: watch::Sender<Option<CycleOutput>>,
}

impl Emitter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, output: CycleOutput) {
        self.tx.send_replace(Some(output));
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CycleOutput>> {
        self.tx.subscribe()
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
