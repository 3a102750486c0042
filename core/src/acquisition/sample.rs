use serde::{Deserialize, Serialize};

/// One triaxial magnetometer reading, in whatever field unit the
/// sensor reports; the pipeline only ever works with residuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
