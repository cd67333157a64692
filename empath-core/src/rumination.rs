//! Rumination — multi-stage decaying re-application of strong stimuli.
//!
//! A sufficiently intense stimulus can "stick": it is re-applied to state
//! at a reduced scale on every subsequent tick, weakening each time until
//! it either runs out of stages or fades below the minimum intensity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scale applied to an entry's intensity when its effects are re-applied.
pub const RUMINATION_SCALE: f32 = 0.3;

/// Entries below this intensity are dropped.
pub const MIN_INTENSITY: f32 = 0.05;

/// One active rumination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuminationEntry {
    pub stimulus_id: String,
    pub label: String,
    pub stage: u32,
    pub intensity: f32,
    pub last_stage_timestamp: DateTime<Utc>,
}

/// The set of active ruminations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rumination {
    pub active: Vec<RuminationEntry>,
}

/// Deterministic ignition rule.
///
/// `probability` is personality-derived; rather than sampling, the rule
/// raises the effective threshold as the probability falls, so low-rumination
/// profiles only latch onto the very strongest stimuli.
pub fn should_ruminate(intensity: f32, threshold: f32, probability: f32) -> bool {
    if probability <= 0.0 {
        return false;
    }
    if probability >= 1.0 {
        return intensity > threshold;
    }
    intensity > threshold + 0.3 * (1.0 - probability)
}

impl Rumination {
    /// Start ruminating on a stimulus, unless it is already active.
    pub fn ignite(&mut self, stimulus_id: &str, label: &str, intensity: f32, now: DateTime<Utc>) {
        if self.active.iter().any(|e| e.stimulus_id == stimulus_id) {
            return;
        }
        self.active.push(RuminationEntry {
            stimulus_id: stimulus_id.to_string(),
            label: label.to_string(),
            stage: 0,
            intensity: intensity.clamp(0.0, 1.0),
            last_stage_timestamp: now,
        });
    }

    /// One advance step: every entry gains a stage and loses intensity;
    /// entries past `max_stages` or below [`MIN_INTENSITY`] are dropped.
    pub fn advance(&mut self, decay_factor: f32, max_stages: u32, now: DateTime<Utc>) {
        for entry in &mut self.active {
            entry.stage += 1;
            entry.intensity *= decay_factor;
            entry.last_stage_timestamp = now;
        }
        self.active
            .retain(|e| e.stage < max_stages && e.intensity >= MIN_INTENSITY);
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
