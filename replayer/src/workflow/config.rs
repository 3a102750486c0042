use anyhow::Context;
use magnocore::prelude::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Replay parameters, loadable from YAML; omitted keys fall back to
/// the standard beacon setup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub sampling_interval: f64,
    pub refresh_rate: usize,
    pub num_transmitters: usize,
    pub normalise_window: usize,
    pub distance_history_length: usize,
    pub beacon_spacing: f64,
    pub marker_height: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            sampling_interval: pipeline.sampling_interval,
            refresh_rate: pipeline.refresh_rate,
            num_transmitters: pipeline.num_transmitters,
            normalise_window: pipeline.normalise_window,
            distance_history_length: pipeline.distance_history_length,
            beacon_spacing: pipeline.beacon_spacing,
            marker_height: pipeline.marker_height,
        }
    }
}

impl ReplayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading replay config {}", path_ref.display()))?;
        let config: ReplayConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing replay config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sampling_interval: f64, refresh_rate: usize, normalise_window: usize) -> Self {
        Self {
            sampling_interval,
            refresh_rate,
            normalise_window,
            ..Default::default()
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            sampling_interval: self.sampling_interval,
            refresh_rate: self.refresh_rate,
            num_transmitters: self.num_transmitters,
            normalise_window: self.normalise_window,
            distance_history_length: self.distance_history_length,
            beacon_spacing: self.beacon_spacing,
            marker_height: self.marker_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_pipeline_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.sampling_interval, 0.01);
        assert_eq!(config.to_pipeline_config().frame_size(), 25);
    }

    #[test]
    fn config_load_reads_yaml_with_defaults_for_omitted_keys() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"sampling_interval: 0.025\nnormalise_window: 6\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = ReplayConfig::load(&path).unwrap();
        assert_eq!(config.sampling_interval, 0.025);
        assert_eq!(config.normalise_window, 6);
        assert_eq!(config.num_transmitters, 3);
    }

    #[test]
    fn config_from_args_produces_pipeline_config() {
        let config = ReplayConfig::from_args(0.025, 1, 8);
        assert_eq!(config.to_pipeline_config().sliding_window_size(), 40);
    }

    #[test]
    fn config_load_reports_missing_file() {
        assert!(ReplayConfig::load("does/not/exist.yaml").is_err());
    }
}
