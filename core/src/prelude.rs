use serde::{Deserialize, Serialize};

/// Shared configuration for the localization pipeline.
///
/// All parameters are fixed at startup; derived window sizes use
/// truncating integer arithmetic throughout, matching the frame model
/// the transmitters are multiplexed against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Seconds between magnetometer samples.
    pub sampling_interval: f64,
    /// Full position updates per second.
    pub refresh_rate: usize,
    /// Beacon transmitters; the frame additionally carries one sync slot.
    pub num_transmitters: usize,
    /// Per-axis history used for baseline normalization.
    pub normalise_window: usize,
    /// Depth of each per-transmitter distance history.
    pub distance_history_length: usize,
    /// Side length of the fixed transmitter layout.
    pub beacon_spacing: f64,
    /// Fixed z coordinate reported with every estimate; the planar
    /// solver does not resolve height.
    pub marker_height: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling_interval: 0.01,
            refresh_rate: 1,
            num_transmitters: 3,
            normalise_window: 8,
            distance_history_length: 4,
            beacon_spacing: 0.5,
            marker_height: 0.0,
        }
    }
}

impl PipelineConfig {
    pub fn ticks_per_second(&self) -> usize {
        (1.0 / self.sampling_interval) as usize
    }

    pub fn sliding_window_size(&self) -> usize {
        self.ticks_per_second() / self.refresh_rate
    }

    /// Ticks covered by one multiplexing slot.
    pub fn frame_size(&self) -> usize {
        self.sliding_window_size() / (self.num_transmitters + 1)
    }

    /// Half-width of the per-slot peak search window.
    pub fn spread(&self) -> usize {
        self.frame_size() / 4
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if !(self.sampling_interval > 0.0) {
            return Err(PipelineError::InvalidConfig(
                "sampling_interval must be positive".into(),
            ));
        }
        if self.refresh_rate == 0 {
            return Err(PipelineError::InvalidConfig(
                "refresh_rate must be at least 1".into(),
            ));
        }
        if self.num_transmitters != 3 {
            return Err(PipelineError::InvalidConfig(
                "planar solver requires exactly 3 transmitters".into(),
            ));
        }
        if self.normalise_window == 0 || self.distance_history_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "window lengths must be at least 1".into(),
            ));
        }
        if self.frame_size() == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "frame of {} ticks cannot carry {} slots",
                self.sliding_window_size(),
                self.num_transmitters + 1
            )));
        }
        if !(self.beacon_spacing > 0.0) {
            return Err(PipelineError::InvalidConfig(
                "beacon_spacing must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Planar position estimate in the normalized distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Snapshot emitted once per completed cycle: the raw phase-aligned
/// peak set (sync slot first) and the trilaterated position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOutput {
    pub peaks: Vec<f64>,
    pub position: Position,
}

/// Common error type for pipeline execution.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("degenerate signal: intensity {0} is not positive")]
    DegenerateSignal(f64),
    #[error("degenerate geometry: distance sum is zero")]
    DegenerateGeometry,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
