use magnocore::prelude::Position;
use serde::{Deserialize, Serialize};

/// Latest presentation snapshot: what a 3-D renderer and intensity
/// chart would draw.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub cycles: usize,
    pub peaks: Vec<f64>,
    pub position: Option<Position>,
}
