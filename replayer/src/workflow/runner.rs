use crate::workflow::config::ReplayConfig;
use anyhow::Context;
use log::warn;
use magnocore::acquisition::SampleSource;
use magnocore::emitter::Emitter;
use magnocore::prelude::{CycleOutput, Position};
use magnocore::processing::Pipeline;
use serde::Serialize;
use tokio::sync::watch;

/// Outcome of an offline replay run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: usize,
    pub cycles: usize,
    pub skipped: usize,
    pub last_position: Option<Position>,
}

/// Drives the pipeline one tick at a time from a sample source and
/// publishes completed cycles through the emitter. Scheduling is left
/// to the caller; the runner never sleeps.
pub struct Runner {
    pipeline: Pipeline,
    source: Box<dyn SampleSource>,
    emitter: Emitter,
}

impl Runner {
    pub fn new(config: &ReplayConfig, source: Box<dyn SampleSource>) -> anyhow::Result<Self> {
        let pipeline =
            Pipeline::new(&config.to_pipeline_config()).context("constructing pipeline")?;
        Ok(Self {
            pipeline,
            source,
            emitter: Emitter::new(),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CycleOutput>> {
        self.emitter.subscribe()
    }

    /// Runs one tick. A source miss is a transient gap and leaves all
    /// pipeline state untouched; a degenerate cycle is logged, counted
    /// by the pipeline, and dropped.
    pub fn step(&mut self) -> Option<CycleOutput> {
        let sample = self.source.next_sample()?;
        match self.pipeline.tick(&sample) {
            Ok(Some(output)) => {
                self.emitter.publish(output.clone());
                Some(output)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("tick produced no estimate: {}", err);
                None
            }
        }
    }

    pub fn run(&mut self, ticks: usize) -> RunSummary {
        let mut last_position = None;
        for _ in 0..ticks {
            if let Some(output) = self.step() {
                last_position = Some(output.position);
            }
        }
        let (ticks, cycles, skipped) = self.pipeline.metrics().snapshot();
        RunSummary {
            ticks,
            cycles,
            skipped,
            last_position,
        }
    }
}
