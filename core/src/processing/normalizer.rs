use crate::acquisition::Sample;
use crate::math::stats::StatsHelper;
use std::collections::VecDeque;

/// Converts raw triaxial readings into a baseline-relative scalar
/// magnitude, one per tick once enough history exists.
///
/// Each axis keeps a fixed window of recent raw readings; the baseline
/// is that window's interquartile mean. Eviction happens after the
/// append, so the baseline subtracted from the newest reading always
/// includes that reading, and all three buffers stay the same length.
pub struct RingNormalizer {
    window: usize,
    axis_x: VecDeque<f64>,
    axis_y: VecDeque<f64>,
    axis_z: VecDeque<f64>,
}

impl RingNormalizer {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            axis_x: VecDeque::with_capacity(window + 1),
            axis_y: VecDeque::with_capacity(window + 1),
            axis_z: VecDeque::with_capacity(window + 1),
        }
    }

    /// Returns the normalized magnitude, or `None` while warming up.
    pub fn ingest(&mut self, sample: &Sample) -> Option<f64> {
        self.axis_x.push_back(sample.x);
        self.axis_y.push_back(sample.y);
        self.axis_z.push_back(sample.z);
        while self.axis_x.len() > self.window {
            self.axis_x.pop_front();
            self.axis_y.pop_front();
            self.axis_z.pop_front();
        }
        if self.axis_x.len() < self.window {
            return None;
        }

        let nx = sample.x - Self::baseline(&self.axis_x);
        let ny = sample.y - Self::baseline(&self.axis_y);
        let nz = sample.z - Self::baseline(&self.axis_z);
        Some((nx * nx + ny * ny + nz * nz).sqrt())
    }

    fn baseline(axis: &VecDeque<f64>) -> f64 {
        let (front, back) = axis.as_slices();
        if back.is_empty() {
            StatsHelper::interquartile_mean(front)
        } else {
            let mut window: Vec<f64> = Vec::with_capacity(axis.len());
            window.extend(front);
            window.extend(back);
            StatsHelper::interquartile_mean(&window)
        }
    }
}
