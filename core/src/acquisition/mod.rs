pub mod sample;
pub mod source;

pub use sample::Sample;
pub use source::{LiveSensor, ReplayFixture, SampleSource};
