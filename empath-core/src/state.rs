// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! The persisted state document — everything the engine knows about one
//! agent's affective state, serialized as a single version-2 JSON object
//! with camelCase keys.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::emotion::{BasicEmotions, Dimensions};
use crate::personality::{DecayRates, EmotionDecayRates, Personality};
use crate::rumination::Rumination;

/// Current schema version of the state file.
pub const SCHEMA_VERSION: u32 = 2;

/// A classified emotional event applied to state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stimulus {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub intensity: f32,
    pub reason: String,
    pub confidence: f32,
}

impl Stimulus {
    pub fn new(
        label: &str,
        intensity: f32,
        reason: &str,
        confidence: f32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            label: label.to_lowercase(),
            intensity: intensity.clamp(0.0, 1.0),
            reason: reason.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Which side of the conversation a stimulus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// Origin of a stimulus, for per-role bucketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusSource {
    pub role: Role,
    pub id: String,
}

/// Latest stimulus plus bounded history for one user or agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleBucket {
    pub latest: Option<Stimulus>,
    pub history: Vec<Stimulus>,
}

impl RoleBucket {
    /// Record a stimulus: becomes `latest`, prepended to `history`,
    /// history truncated to `max_history`.
    pub fn push(&mut self, stimulus: Stimulus, max_history: usize) {
        self.history.insert(0, stimulus.clone());
        self.history.truncate(max_history);
        self.latest = Some(stimulus);
    }
}

/// Bookkeeping that survives resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub total_updates: u64,
    pub created_at: DateTime<Utc>,
}

/// The full persisted engine state (schema v2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub version: u32,
    pub last_updated: DateTime<Utc>,
    pub personality: Personality,
    pub dimensions: Dimensions,
    pub baseline: Dimensions,
    pub decay_rates: DecayRates,
    pub emotion_decay_rates: EmotionDecayRates,
    pub basic_emotions: BasicEmotions,
    pub recent_stimuli: Vec<Stimulus>,
    pub rumination: Rumination,
    pub users: BTreeMap<String, RoleBucket>,
    pub agents: BTreeMap<String, RoleBucket>,
    pub meta: Meta,
}

impl EngineState {
    /// Build a fresh state for a personality: dimensions start at the
    /// derived baseline, emotions at zero, histories empty.
    pub fn with_personality(
        personality: Personality,
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let personality = personality.clamped();
        let baseline = personality.baseline();
        Self {
            version: SCHEMA_VERSION,
            last_updated: now,
            personality,
            dimensions: baseline,
            baseline,
            decay_rates: personality.decay_rates(config.half_life_hours),
            emotion_decay_rates: personality.emotion_decay_rates(config.half_life_hours),
            basic_emotions: BasicEmotions::default(),
            recent_stimuli: Vec::new(),
            rumination: Rumination::default(),
            users: BTreeMap::new(),
            agents: BTreeMap::new(),
            meta: Meta {
                total_updates: 0,
                created_at: now,
            },
        }
    }

    /// Default state: midpoint personality.
    pub fn default_at(config: &EngineConfig, now: DateTime<Utc>) -> Self {
        Self::with_personality(Personality::default(), config, now)
    }

    /// Record a stimulus in the shared ring and, when a source is given,
    /// in that source's role bucket.
    pub fn record_stimulus(
        &mut self,
        stimulus: Stimulus,
        source: Option<&StimulusSource>,
        max_history: usize,
    ) {
        if let Some(src) = source {
            let buckets = match src.role {
                Role::User => &mut self.users,
                Role::Agent => &mut self.agents,
            };
            buckets
                .entry(src.id.clone())
                .or_default()
                .push(stimulus.clone(), max_history);
        }
        self.recent_stimuli.insert(0, stimulus);
        self.recent_stimuli.truncate(max_history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-01-15T12:00:00Z".parse().unwrap()
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_fresh_state_shape() {
        let state = EngineState::default_at(&config(), now());
        assert_eq!(state.version, SCHEMA_VERSION);
        assert_eq!(state.meta.total_updates, 0);
        assert!(state.recent_stimuli.is_empty());
        assert!(state.rumination.is_empty());
        assert_eq!(state.dimensions, state.baseline);
    }

    #[test]
    fn test_with_personality_derives_tables() {
        let p = Personality {
            neuroticism: 1.0,
            ..Personality::default()
        };
        let state = EngineState::with_personality(p, &config(), now());
        assert_eq!(state.baseline, p.baseline());
        assert!((state.decay_rates.pleasure - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_with_personality_clamps() {
        let p = Personality {
            openness: 7.0,
            ..Personality::default()
        };
        let state = EngineState::with_personality(p, &config(), now());
        assert!((state.personality.openness - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_record_stimulus_ring_newest_first() {
        let mut state = EngineState::default_at(&config(), now());
        for i in 0..15 {
            let t = now() + chrono::Duration::seconds(i);
            state.record_stimulus(Stimulus::new("happy", 0.5, "r", 1.0, t), None, 10);
        }
        assert_eq!(state.recent_stimuli.len(), 10);
        assert!(state.recent_stimuli[0].timestamp > state.recent_stimuli[1].timestamp);
    }

    #[test]
    fn test_record_stimulus_bucket() {
        let mut state = EngineState::default_at(&config(), now());
        let source = StimulusSource {
            role: Role::User,
            id: "u1".into(),
        };
        let stim = Stimulus::new("sad", 0.4, "r", 0.9, now());
        state.record_stimulus(stim.clone(), Some(&source), 10);
        let bucket = state.users.get("u1").unwrap();
        assert_eq!(bucket.latest.as_ref().unwrap().label, "sad");
        assert_eq!(bucket.history.len(), 1);
        assert!(state.agents.is_empty());
    }

    #[test]
    fn test_stimulus_new_normalizes() {
        let stim = Stimulus::new("HAPPY", 1.4, "r", -0.2, now());
        assert_eq!(stim.label, "happy");
        assert!((stim.intensity - 1.0).abs() < f32::EPSILON);
        assert!(stim.confidence.abs() < f32::EPSILON);
        assert!(!stim.id.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut state = EngineState::default_at(&config(), now());
        state.record_stimulus(
            Stimulus::new("angry", 0.9, "said something sharp", 0.8, now()),
            Some(&StimulusSource {
                role: Role::Agent,
                id: "peer".into(),
            }),
            10,
        );
        state.rumination.ignite("s1", "angry", 0.9, now());
        state.meta.total_updates = 3;

        let json = serde_json::to_string_pretty(&state).unwrap();
        let back: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let state = EngineState::default_at(&config(), now());
        let json = serde_json::to_string(&state).unwrap();
        for key in [
            "lastUpdated",
            "decayRates",
            "emotionDecayRates",
            "basicEmotions",
            "recentStimuli",
            "totalUpdates",
            "createdAt",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(!json.contains("last_updated"));
    }
}
