use crate::prelude::PipelineConfig;
use std::collections::VecDeque;

/// Locates the periodic transmitter peaks in the magnitude series and
/// phase-aligns them against the sync slot.
///
/// The series is scanned once it exceeds the sliding window by two
/// ticks; each scan evicts the oldest magnitude, so the window slides
/// by one tick per scan regardless of whether the cycle downstream
/// produces a position.
pub struct FrameSynchronizer {
    slots: usize,
    frame_size: usize,
    spread: usize,
    scan_threshold: usize,
    magnitudes: VecDeque<f64>,
}

impl FrameSynchronizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            slots: config.num_transmitters + 1,
            frame_size: config.frame_size(),
            spread: config.spread(),
            scan_threshold: config.sliding_window_size() + 2,
            magnitudes: VecDeque::new(),
        }
    }

    /// Appends one magnitude; once warm, scans the window and returns
    /// the phase-aligned peak set (sync slot first).
    pub fn ingest(&mut self, magnitude: f64) -> Option<Vec<f64>> {
        self.magnitudes.push_back(magnitude);
        if self.magnitudes.len() <= self.scan_threshold {
            return None;
        }
        let window: Vec<f64> = self.magnitudes.iter().copied().collect();
        let peaks = self.sync_phase(self.find_peaks(&window));
        self.magnitudes.pop_front();
        Some(peaks)
    }

    /// One peak per multiplexing slot, in frame-grid order.
    ///
    /// The grid is anchored at the phase of the global maximum; each
    /// slot window is searched circularly, so a window running past
    /// either end of the series is satisfied from the opposite end.
    pub fn find_peaks(&self, magnitudes: &[f64]) -> Vec<f64> {
        if magnitudes.is_empty() {
            return Vec::new();
        }
        let max_index = magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);
        let i_mod = max_index % self.frame_size;

        (0..self.slots)
            .map(|slot| {
                let center = (i_mod + self.frame_size * slot) as isize;
                self.highest_around(magnitudes, center)
            })
            .collect()
    }

    fn highest_around(&self, magnitudes: &[f64], center: isize) -> f64 {
        let len = magnitudes.len() as isize;
        let spread = self.spread as isize;
        (center - spread..=center + spread)
            .map(|index| magnitudes[index.rem_euclid(len) as usize])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Rotates the peak set left until the minimum value leads.
    ///
    /// The attenuated sync slot is by convention the frame minimum, so
    /// after rotation index 0 is the sync value and the transmitter
    /// ordering is phase-stable across cycles.
    pub fn sync_phase(&self, mut peaks: Vec<f64>) -> Vec<f64> {
        if peaks.is_empty() {
            return peaks;
        }
        let lowest = peaks.iter().copied().fold(f64::INFINITY, f64::min);
        for _ in 0..peaks.len() {
            if peaks[0] == lowest {
                break;
            }
            peaks.rotate_left(1);
        }
        peaks
    }
}
