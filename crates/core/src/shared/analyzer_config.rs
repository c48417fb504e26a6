use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    CENTER_BAND_HALF_WIDTH, CONFIDENCE_SATURATION_SAMPLES, HISTORY_CAPACITY, MIN_SKIN_SAMPLES,
    MIN_SKIN_SCORE, SAMPLE_STRIDE, SMOOTHING_DECAY_MS, SMOOTHING_WINDOW_MS, STRAIGHT_THRESHOLD,
    TURN_THRESHOLD,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the whole analysis pipeline.
///
/// Missing fields in a config file fall back to the defaults, so a file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub sample_stride: u32,
    pub min_skin_score: f64,
    pub min_skin_samples: usize,
    pub confidence_saturation_samples: f64,
    pub center_band_half_width: f64,
    pub straight_threshold: f64,
    pub turn_threshold: f64,
    pub window_ms: u64,
    pub decay_ms: f64,
    pub history_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_stride: SAMPLE_STRIDE,
            min_skin_score: MIN_SKIN_SCORE,
            min_skin_samples: MIN_SKIN_SAMPLES,
            confidence_saturation_samples: CONFIDENCE_SATURATION_SAMPLES,
            center_band_half_width: CENTER_BAND_HALF_WIDTH,
            straight_threshold: STRAIGHT_THRESHOLD,
            turn_threshold: TURN_THRESHOLD,
            window_ms: SMOOTHING_WINDOW_MS,
            decay_ms: SMOOTHING_DECAY_MS,
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

impl AnalyzerConfig {
    /// `<config dir>/headturn/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("headturn").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, else the default location when it exists,
    /// else returns the built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => {
                log::info!("Using config from {}", default.display());
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_stride == 0 {
            return Err(ConfigError::Invalid("sample_stride must be >= 1".into()));
        }
        if self.min_skin_samples == 0 {
            return Err(ConfigError::Invalid("min_skin_samples must be >= 1".into()));
        }
        if self.confidence_saturation_samples <= 0.0 {
            return Err(ConfigError::Invalid(
                "confidence_saturation_samples must be positive".into(),
            ));
        }
        if self.center_band_half_width < 0.0 {
            return Err(ConfigError::Invalid(
                "center_band_half_width must not be negative".into(),
            ));
        }
        for (name, value) in [
            ("min_skin_score", self.min_skin_score),
            ("straight_threshold", self.straight_threshold),
            ("turn_threshold", self.turn_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        if self.turn_threshold < self.straight_threshold {
            return Err(ConfigError::Invalid(format!(
                "turn_threshold ({}) must not be below straight_threshold ({})",
                self.turn_threshold, self.straight_threshold
            )));
        }
        if self.window_ms == 0 {
            return Err(ConfigError::Invalid("window_ms must be >= 1".into()));
        }
        if self.decay_ms <= 0.0 {
            return Err(ConfigError::Invalid("decay_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_constants() {
        let c = AnalyzerConfig::default();
        assert_eq!(c.sample_stride, 2);
        assert_relative_eq!(c.min_skin_score, 0.3);
        assert_eq!(c.min_skin_samples, 50);
        assert_relative_eq!(c.confidence_saturation_samples, 200.0);
        assert_relative_eq!(c.center_band_half_width, 20.0);
        assert_relative_eq!(c.straight_threshold, 0.15);
        assert_relative_eq!(c.turn_threshold, 0.25);
        assert_eq!(c.window(), Duration::from_millis(500));
        assert_relative_eq!(c.decay_ms, 200.0);
        assert_eq!(c.history_capacity, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let c: AnalyzerConfig = serde_json::from_str(r#"{"sample_stride": 4}"#).unwrap();
        assert_eq!(c.sample_stride, 4);
        assert_eq!(c.min_skin_samples, 50);
    }

    #[test]
    fn test_load_reads_and_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"window_ms": 800, "decay_ms": 300.0}"#).unwrap();
        let c = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(c.window_ms, 800);
        assert_relative_eq!(c.decay_ms, 300.0);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AnalyzerConfig::load(Path::new("/nonexistent/headturn.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AnalyzerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sample_stride": 0}"#).unwrap();
        let err = AnalyzerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"history_capacity": 3}"#).unwrap();
        let c = AnalyzerConfig::resolve(Some(&path)).unwrap();
        assert_eq!(c.history_capacity, 3);
    }

    #[rstest]
    #[case::zero_stride(AnalyzerConfig { sample_stride: 0, ..Default::default() })]
    #[case::zero_min_samples(AnalyzerConfig { min_skin_samples: 0, ..Default::default() })]
    #[case::zero_saturation(AnalyzerConfig { confidence_saturation_samples: 0.0, ..Default::default() })]
    #[case::negative_band(AnalyzerConfig { center_band_half_width: -1.0, ..Default::default() })]
    #[case::score_above_one(AnalyzerConfig { min_skin_score: 1.5, ..Default::default() })]
    #[case::turn_below_straight(AnalyzerConfig { straight_threshold: 0.3, turn_threshold: 0.2, ..Default::default() })]
    #[case::zero_window(AnalyzerConfig { window_ms: 0, ..Default::default() })]
    #[case::zero_decay(AnalyzerConfig { decay_ms: 0.0, ..Default::default() })]
    fn test_validate_rejects(#[case] config: AnalyzerConfig) {
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
