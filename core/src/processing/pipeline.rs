use crate::acquisition::Sample;
use crate::prelude::{CycleOutput, PipelineConfig, PipelineResult};
use crate::processing::normalizer::RingNormalizer;
use crate::processing::smoother::{intensity_to_distance, DistanceSmoother};
use crate::processing::synchronizer::FrameSynchronizer;
use crate::processing::trilaterator::Trilaterator;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// The whole localization state machine behind a single `tick` call.
///
/// Owns every buffer exclusively (axis windows, magnitude window,
/// distance histories); nothing is shared or ambient, and one tick
/// runs the full ingest → peak scan → smooth → trilaterate chain
/// synchronously. Scheduling is the caller's concern.
pub struct Pipeline {
    normalizer: RingNormalizer,
    synchronizer: FrameSynchronizer,
    smoother: DistanceSmoother,
    trilaterator: Trilaterator,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: RingNormalizer::new(config.normalise_window),
            synchronizer: FrameSynchronizer::new(config),
            smoother: DistanceSmoother::new(
                config.num_transmitters,
                config.distance_history_length,
            ),
            trilaterator: Trilaterator::new(config.beacon_spacing, config.marker_height),
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        })
    }

    /// Runs one acquisition-and-processing cycle.
    ///
    /// `Ok(None)` is the normal warming-up state (axis buffers,
    /// magnitude window, or distance histories still filling). An
    /// `Err` marks a degenerate cycle that was skipped; the pipeline
    /// state remains valid and the next tick proceeds normally. No
    /// degenerate value is ever folded into an estimate.
    pub fn tick(&mut self, sample: &Sample) -> PipelineResult<Option<CycleOutput>> {
        self.metrics.record_tick();

        let Some(magnitude) = self.normalizer.ingest(sample) else {
            return Ok(None);
        };
        let Some(peaks) = self.synchronizer.ingest(magnitude) else {
            return Ok(None);
        };

        // All-or-nothing: a single degenerate intensity skips the
        // cycle before any history is touched.
        let raw = match peaks[1..]
            .iter()
            .map(|&p| intensity_to_distance(p))
            .collect::<PipelineResult<Vec<f64>>>()
        {
            Ok(distances) => distances,
            Err(err) => {
                self.metrics.record_skip();
                self.logger.alert(&format!("cycle skipped: {}", err));
                return Err(err);
            }
        };

        let Some(smoothed) = self.smoother.update(&raw) else {
            return Ok(None);
        };

        let position = match self
            .trilaterator
            .solve(smoothed[0], smoothed[1], smoothed[2])
        {
            Ok(position) => position,
            Err(err) => {
                self.metrics.record_skip();
                self.logger.alert(&format!("cycle skipped: {}", err));
                return Err(err);
            }
        };

        self.metrics.record_cycle();
        self.logger.record(&format!(
            "position ({:.4}, {:.4}, {:.4}) from peaks {:?}",
            position.x, position.y, position.z, peaks
        ));
        Ok(Some(CycleOutput { peaks, position }))
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::PipelineError;

    // Small windows keep the warmup short: 40-tick sliding window,
    // 10-tick frames, spread 2, axis window 8, history depth 4.
    fn test_config() -> PipelineConfig {
        PipelineConfig {
            sampling_interval: 0.025,
            ..Default::default()
        }
    }

    // One multiplexing frame: a quiet baseline with a single-tick
    // pulse per slot. The sync slot carries the weakest pulse.
    fn beacon_sample(tick: usize) -> Sample {
        let amplitude = match tick % 40 {
            5 => 0.5,   // sync
            15 => 8.0,  // transmitter 1
            25 => 27.0, // transmitter 2
            35 => 64.0, // transmitter 3
            _ => 0.0,
        };
        Sample::new(amplitude, 0.0, 0.0)
    }

    fn run_ticks(pipeline: &mut Pipeline, ticks: usize) -> Vec<CycleOutput> {
        let mut outputs = Vec::new();
        for tick in 0..ticks {
            if let Ok(Some(output)) = pipeline.tick(&beacon_sample(tick)) {
                outputs.push(output);
            }
        }
        outputs
    }

    #[test]
    fn warmup_produces_no_output() {
        let mut pipeline = Pipeline::new(&test_config()).unwrap();
        for tick in 0..40 {
            assert!(matches!(pipeline.tick(&beacon_sample(tick)), Ok(None)));
        }
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = PipelineConfig {
            refresh_rate: 0,
            ..test_config()
        };
        assert!(Pipeline::new(&config).is_err());
    }

    #[test]
    fn end_to_end_position_is_stable_across_cycles() {
        let mut pipeline = Pipeline::new(&test_config()).unwrap();
        let outputs = run_ticks(&mut pipeline, 400);
        assert!(outputs.len() >= 2);

        let last = &outputs[outputs.len() - 1];
        let previous = &outputs[outputs.len() - 2];
        assert_eq!(last.position, previous.position);
        assert!(last.position.x.is_finite());
        assert!(last.position.y.is_finite());

        // Phase alignment: the attenuated sync pulse leads the set and
        // the strongest transmitter is present.
        assert_eq!(last.peaks.len(), 4);
        let min = last.peaks.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(last.peaks[0], min);
        assert!(last.peaks.contains(&64.0));
    }

    #[test]
    fn degenerate_cycles_are_skipped_and_counted() {
        let mut pipeline = Pipeline::new(&test_config()).unwrap();
        // A flat field normalizes to all-zero magnitudes, so every
        // peak is zero intensity once the scan starts.
        let flat = Sample::new(50.0, 50.0, 50.0);
        let mut saw_degenerate = false;
        for _ in 0..100 {
            if let Err(PipelineError::DegenerateSignal(_)) = pipeline.tick(&flat) {
                saw_degenerate = true;
            }
        }
        assert!(saw_degenerate);
        let (ticks, cycles, skipped) = pipeline.metrics().snapshot();
        assert_eq!(ticks, 100);
        assert_eq!(cycles, 0);
        assert!(skipped > 0);
    }

    #[test]
    fn pipeline_recovers_after_degenerate_stretch() {
        let mut pipeline = Pipeline::new(&test_config()).unwrap();
        let flat = Sample::new(50.0, 50.0, 50.0);
        for _ in 0..60 {
            let _ = pipeline.tick(&flat);
        }
        let outputs = run_ticks(&mut pipeline, 400);
        assert!(!outputs.is_empty());
    }
}
