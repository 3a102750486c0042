use crate::prelude::{PipelineError, PipelineResult, Position};

/// Planar solver against a fixed equilateral transmitter layout.
///
/// Distances are first normalized to ratios summing to one, then fed
/// through the standard two-circle intersection formulas. This is a
/// deliberate modeling choice, not metric trilateration: the absolute
/// scale of the intensity-derived distances is unreliable, so only
/// their proportions drive the solution.
pub struct Trilaterator {
    spacing: f64,
    height: f64,
}

impl Trilaterator {
    pub fn new(spacing: f64, height: f64) -> Self {
        Self { spacing, height }
    }

    pub fn solve(&self, r1: f64, r2: f64, r3: f64) -> PipelineResult<Position> {
        let sum = r1 + r2 + r3;
        if sum == 0.0 {
            return Err(PipelineError::DegenerateGeometry);
        }
        let nr1 = r1 / sum;
        let nr2 = r2 / sum;
        let nr3 = r3 / sum;

        let d = self.spacing;
        let i = d / 2.0;
        let j = (d * d - i * i).sqrt();

        let x = (nr1 * nr1 - nr2 * nr2 + d * d) / (2.0 * d);
        let y = (nr1 * nr1 - nr3 * nr3 + i * i + j * j) / (2.0 * j) - i * x / j;

        Ok(Position {
            x,
            y,
            z: self.height,
        })
    }
}
