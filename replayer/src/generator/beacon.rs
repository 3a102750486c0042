use magnocore::acquisition::{ReplayFixture, Sample};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for a synthetic beacon capture: an ambient field with
/// one short pulse per multiplexing slot, the sync slot intentionally
/// attenuated. Stands in for a recorded fixture when none is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconProfile {
    /// Ticks per multiplexing slot; must match the pipeline's frame
    /// size for the peaks to land on the search grid.
    pub frame_size: usize,
    /// Full multiplexing frames to generate before the fixture wraps.
    pub frames: usize,
    pub sync_intensity: f64,
    pub transmitter_intensities: [f64; 3],
    /// Ambient geomagnetic field the pulses ride on.
    pub baseline: [f64; 3],
    pub noise: f64,
    pub seed: u64,
}

impl Default for BeaconProfile {
    fn default() -> Self {
        Self {
            frame_size: 25,
            frames: 40,
            sync_intensity: 0.5,
            transmitter_intensities: [8.0, 27.0, 64.0],
            baseline: [56.4, 232.1, -749.5],
            noise: 0.02,
            seed: 0,
        }
    }
}

impl BeaconProfile {
    fn slot_intensity(&self, slot: usize) -> f64 {
        if slot == 0 {
            self.sync_intensity
        } else {
            self.transmitter_intensities[slot - 1]
        }
    }
}

pub fn build_rows(profile: &BeaconProfile) -> Vec<Sample> {
    let slots = 1 + profile.transmitter_intensities.len();
    let pulse_tick = profile.frame_size / 2;
    let mut rng = StdRng::seed_from_u64(profile.seed);
    let mut rows = Vec::with_capacity(profile.frames * slots * profile.frame_size);

    for _ in 0..profile.frames {
        for slot in 0..slots {
            for tick in 0..profile.frame_size {
                let amplitude = if tick == pulse_tick {
                    profile.slot_intensity(slot)
                } else {
                    0.0
                };
                let mut jitter = [0.0; 3];
                if profile.noise > 0.0 {
                    for axis in &mut jitter {
                        *axis = rng.gen_range(-profile.noise..profile.noise);
                    }
                }
                rows.push(Sample::new(
                    profile.baseline[0] + amplitude + jitter[0],
                    profile.baseline[1] + jitter[1],
                    profile.baseline[2] + jitter[2],
                ));
            }
        }
    }
    rows
}

pub fn build_fixture(profile: &BeaconProfile) -> ReplayFixture {
    ReplayFixture::from_rows(build_rows(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_expected_row_count() {
        let profile = BeaconProfile::default();
        let rows = build_rows(&profile);
        assert_eq!(rows.len(), 40 * 4 * 25);
    }

    #[test]
    fn each_slot_carries_one_pulse() {
        let profile = BeaconProfile {
            noise: 0.0,
            ..Default::default()
        };
        let rows = build_rows(&profile);
        // Strongest transmitter pulse sits at the center of slot 3.
        let slot3_center = 3 * 25 + 12;
        assert_eq!(rows[slot3_center].x, 56.4 + 64.0);
        // Off-center ticks are pure baseline.
        assert_eq!(rows[slot3_center + 1].x, 56.4);
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let profile = BeaconProfile::default();
        assert_eq!(build_rows(&profile), build_rows(&profile));
    }
}
