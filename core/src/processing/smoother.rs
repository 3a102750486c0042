use crate::math::stats::StatsHelper;
use crate::prelude::{PipelineError, PipelineResult};
use std::collections::VecDeque;

/// Converts a peak intensity to an estimated distance under the
/// inverse-cube falloff model. Intensities at or below zero can occur
/// after baseline subtraction and are reported as a degenerate signal
/// instead of propagating NaN into the solver.
pub fn intensity_to_distance(intensity: f64) -> PipelineResult<f64> {
    if intensity <= 0.0 {
        return Err(PipelineError::DegenerateSignal(intensity));
    }
    Ok((1.0 / intensity).cbrt())
}

/// Short per-transmitter distance histories, re-smoothed with the
/// interquartile mean on every append once full.
pub struct DistanceSmoother {
    depth: usize,
    histories: Vec<VecDeque<f64>>,
}

impl DistanceSmoother {
    pub fn new(transmitters: usize, depth: usize) -> Self {
        Self {
            depth,
            histories: (0..transmitters)
                .map(|_| VecDeque::with_capacity(depth))
                .collect(),
        }
    }

    /// Appends one raw distance per transmitter. Returns the smoothed
    /// distances once every history is full, evicting each oldest raw
    /// entry afterwards; until then the cycle produces no output.
    pub fn update(&mut self, raw: &[f64]) -> Option<Vec<f64>> {
        debug_assert_eq!(raw.len(), self.histories.len());
        for (history, &distance) in self.histories.iter_mut().zip(raw) {
            history.push_back(distance);
        }
        if self.histories.iter().any(|h| h.len() < self.depth) {
            return None;
        }

        let smoothed = self
            .histories
            .iter_mut()
            .map(|history| {
                let window: Vec<f64> = history.iter().copied().collect();
                let value = StatsHelper::interquartile_mean(&window);
                history.pop_front();
                value
            })
            .collect();
        Some(smoothed)
    }
}
