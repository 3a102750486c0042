//! Core localization pipeline for the magnetic beacon platform.
//!
//! Raw triaxial magnetometer samples are normalized against a rolling
//! interquartile baseline, scanned for the time-multiplexed beacon
//! peaks, converted to smoothed distances, and trilaterated into a
//! planar position estimate, all inside one synchronous `tick` call.

pub mod acquisition;
pub mod emitter;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{CycleOutput, PipelineConfig, PipelineError, PipelineResult, Position};
