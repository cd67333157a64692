//! Engine configuration — numeric knobs with declared bounds.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// All tunable numeric parameters of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Minimum classifier confidence before a stimulus is trusted [0, 1].
    pub confidence_min: f32,
    /// Base decay half-life in hours (>= 0.1).
    pub half_life_hours: f32,
    /// Window for stimulus trend summaries in hours (>= 1).
    pub trend_window_hours: f32,
    /// Bound on `recentStimuli` and per-role histories (>= 10).
    pub max_history: usize,
    /// Stimulus intensity above which rumination may ignite [0, 1].
    pub rumination_threshold: f32,
    /// Stages before a rumination entry expires [1, 10].
    pub rumination_max_stages: u32,
    /// Per-stage intensity multiplier for rumination (0, 1).
    pub rumination_decay_factor: f32,
    /// Background decay service interval in minutes (>= 1).
    pub decay_service_interval_minutes: u32,
    /// Age in seconds after which a lock file counts as stale.
    pub lock_stale_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_min: 0.6,
            half_life_hours: 12.0,
            trend_window_hours: 24.0,
            max_history: 10,
            rumination_threshold: 0.7,
            rumination_max_stages: 5,
            rumination_decay_factor: 0.8,
            decay_service_interval_minutes: 5,
            lock_stale_timeout_secs: 10,
        }
    }
}

impl EngineConfig {
    /// Check every knob against its declared bounds.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut issues = Vec::new();

        if !(0.0..=1.0).contains(&self.confidence_min) {
            issues.push(format!(
                "confidenceMin {} out of range [0, 1]",
                self.confidence_min
            ));
        }
        if !self.half_life_hours.is_finite() || self.half_life_hours < 0.1 {
            issues.push(format!("halfLifeHours {} must be >= 0.1", self.half_life_hours));
        }
        if !self.trend_window_hours.is_finite() || self.trend_window_hours < 1.0 {
            issues.push(format!(
                "trendWindowHours {} must be >= 1",
                self.trend_window_hours
            ));
        }
        if self.max_history < 10 {
            issues.push(format!("maxHistory {} must be >= 10", self.max_history));
        }
        if !(0.0..=1.0).contains(&self.rumination_threshold) {
            issues.push(format!(
                "ruminationThreshold {} out of range [0, 1]",
                self.rumination_threshold
            ));
        }
        if !(1..=10).contains(&self.rumination_max_stages) {
            issues.push(format!(
                "ruminationMaxStages {} out of range [1, 10]",
                self.rumination_max_stages
            ));
        }
        if !(self.rumination_decay_factor > 0.0 && self.rumination_decay_factor < 1.0) {
            issues.push(format!(
                "ruminationDecayFactor {} out of range (0, 1)",
                self.rumination_decay_factor
            ));
        }
        if self.decay_service_interval_minutes < 1 {
            issues.push(format!(
                "decayServiceIntervalMinutes {} must be >= 1",
                self.decay_service_interval_minutes
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(EngineError::config(issues.join("; ")))
        }
    }
}
