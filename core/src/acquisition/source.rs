use crate::acquisition::sample::Sample;
use log::warn;
use std::fs;
use std::path::Path;
use std::sync::mpsc::Receiver;

/// Supplies one triaxial reading per tick. `None` is a transient gap
/// (sensor not ready, fixture empty), never an error; the caller keeps
/// its pipeline state and simply skips the tick.
pub trait SampleSource {
    fn next_sample(&mut self) -> Option<Sample>;
}

/// Pre-recorded fixture replayed cyclically: the cursor wraps to the
/// first row after the last one.
pub struct ReplayFixture {
    rows: Vec<Sample>,
    cursor: usize,
}

impl ReplayFixture {
    pub fn from_rows(rows: Vec<Sample>) -> Self {
        Self { rows, cursor: 0 }
    }

    /// Parses comma-separated `x,y,z` triples, one per line. Blank
    /// lines are skipped; any malformed line fails the whole fixture
    /// closed to an empty one rather than replaying a partial capture.
    pub fn from_csv(contents: &str) -> Self {
        let mut rows = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_triple(line) {
                Some(sample) => rows.push(sample),
                None => {
                    warn!("fixture line {} is malformed, discarding fixture", number + 1);
                    return Self::from_rows(Vec::new());
                }
            }
        }
        Self::from_rows(rows)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_csv(&contents))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_triple(line: &str) -> Option<Sample> {
    let mut fields = line.split(',').map(str::trim);
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Sample::new(x, y, z))
}

impl SampleSource for ReplayFixture {
    fn next_sample(&mut self) -> Option<Sample> {
        if self.rows.is_empty() {
            return None;
        }
        let sample = self.rows[self.cursor];
        self.cursor = (self.cursor + 1) % self.rows.len();
        Some(sample)
    }
}

/// Live magnetometer feed. The acquisition thread pushes readings into
/// the channel at its own cadence; a miss on the tick side is a gap.
pub struct LiveSensor {
    feed: Receiver<Sample>,
}

impl LiveSensor {
    pub fn new(feed: Receiver<Sample>) -> Self {
        Self { feed }
    }
}

impl SampleSource for LiveSensor {
    fn next_sample(&mut self) -> Option<Sample> {
        self.feed.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn fixture_replays_cyclically() {
        let mut fixture =
            ReplayFixture::from_csv("1.0, 2.0, 3.0\n4.0, 5.0, 6.0\n");
        assert_eq!(fixture.len(), 2);
        assert_eq!(fixture.next_sample(), Some(Sample::new(1.0, 2.0, 3.0)));
        assert_eq!(fixture.next_sample(), Some(Sample::new(4.0, 5.0, 6.0)));
        assert_eq!(fixture.next_sample(), Some(Sample::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn fixture_skips_blank_lines() {
        let fixture = ReplayFixture::from_csv("\n1,2,3\n\n  \n4,5,6\n");
        assert_eq!(fixture.len(), 2);
    }

    #[test]
    fn malformed_line_fails_fixture_closed() {
        let mut fixture = ReplayFixture::from_csv("1,2,3\n4,oops,6\n7,8,9\n");
        assert!(fixture.is_empty());
        assert_eq!(fixture.next_sample(), None);
    }

    #[test]
    fn extra_field_fails_fixture_closed() {
        let fixture = ReplayFixture::from_csv("1,2,3,4\n");
        assert!(fixture.is_empty());
    }

    #[test]
    fn live_sensor_reports_gaps_without_failing() {
        let (tx, rx) = mpsc::channel();
        let mut sensor = LiveSensor::new(rx);
        assert_eq!(sensor.next_sample(), None);
        tx.send(Sample::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(sensor.next_sample(), Some(Sample::new(1.0, 1.0, 1.0)));
        drop(tx);
        assert_eq!(sensor.next_sample(), None);
    }
}
