// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! The state manager — orchestrates decay, stimulus application,
//! rumination, personality mutation, and persistence.
//!
//! Every operation takes a state by reference and returns a fresh one;
//! nothing is persisted until [`EmotionEngine::save`]. Callers that need
//! cross-process safety wrap each read → transform → save cycle in the
//! store's advisory lock, which `save` acquires internally.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::emotion::{BasicEmotion, BasicEmotions, Dimension, Dimensions};
use crate::error::EngineError;
use crate::goals::{infer_goals, modulated_intensity};
use crate::mapping::{MappingEntry, Taxonomy};
use crate::personality::Trait;
use crate::rumination::{should_ruminate, RUMINATION_SCALE};
use crate::state::{EngineState, Meta, Stimulus, StimulusSource};
use crate::persistence::StateStore;

/// Decay-applied, read-only view of the state for dashboards, CLIs, and
/// tool wrappers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub dimensions: Dimensions,
    pub basic_emotions: BasicEmotions,
    pub personality: crate::personality::Personality,
    pub primary_emotion: String,
    pub overall_intensity: f32,
    pub recent_stimuli: Vec<Stimulus>,
    pub rumination: crate::rumination::Rumination,
    pub baseline: Dimensions,
    pub meta: Meta,
    pub last_updated: DateTime<Utc>,
}

/// Move a value toward its target under exponential half-life decay.
pub fn decay_toward(value: f32, target: f32, half_life_hours: f32, elapsed_hours: f32) -> f32 {
    if elapsed_hours <= 0.0 || half_life_hours <= 0.0 {
        return value;
    }
    target + (value - target) * (-elapsed_hours / half_life_hours).exp2()
}

/// The affective state engine.
pub struct EmotionEngine {
    config: EngineConfig,
    store: StateStore,
    taxonomy: Taxonomy,
}

impl EmotionEngine {
    /// Create an engine persisting to `path`.
    pub fn new(path: impl Into<PathBuf>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = StateStore::new(path, Duration::from_secs(config.lock_stale_timeout_secs));
        Ok(Self {
            config,
            store,
            taxonomy: Taxonomy::default(),
        })
    }

    /// Create an engine with user-supplied custom label mappings merged
    /// over the static taxonomy.
    pub fn with_custom_mappings(
        path: impl Into<PathBuf>,
        config: EngineConfig,
        custom: &Value,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(path, config)?;
        engine.taxonomy = Taxonomy::with_custom(custom);
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Load state from disk, or build a default one. Never fails; schema
    /// problems collapse to defaults inside the store.
    pub fn read(&self) -> EngineState {
        self.store.load(&self.config, Utc::now())
    }

    /// Decay every dimension toward its baseline and every basic emotion
    /// toward zero for the wall-clock span since `state.last_updated`.
    ///
    /// `last_updated` itself is untouched; it moves only on `save`.
    pub fn apply_decay(&self, state: &EngineState, now: DateTime<Utc>) -> EngineState {
        let elapsed_hours =
            (now - state.last_updated).num_milliseconds().max(0) as f32 / 3_600_000.0;
        let mut out = state.clone();

        for dim in Dimension::ALL {
            let decayed = decay_toward(
                state.dimensions.get(dim),
                state.baseline.get(dim),
                state.decay_rates.get(dim),
                elapsed_hours,
            );
            out.dimensions.set(dim, decayed);
        }
        for emotion in BasicEmotion::ALL {
            let decayed = decay_toward(
                state.basic_emotions.get(emotion),
                0.0,
                state.emotion_decay_rates.get(emotion),
                elapsed_hours,
            );
            out.basic_emotions.set(emotion, decayed);
        }
        out
    }

    /// Apply a classified stimulus: resolve the label, amplify intensity
    /// through the active goals, apply the mapped deltas, maybe ignite
    /// rumination, and record the stimulus.
    ///
    /// Unknown labels leave dimensions and emotions untouched but are
    /// still recorded in history.
    pub fn apply_stimulus(
        &self,
        state: &EngineState,
        label: &str,
        intensity: f32,
        trigger: &str,
        now: DateTime<Utc>,
    ) -> EngineState {
        self.apply_stimulus_from(state, label, intensity, trigger, 1.0, None, now)
    }

    /// [`apply_stimulus`] with a classifier confidence and an optional
    /// per-role source bucket.
    pub fn apply_stimulus_from(
        &self,
        state: &EngineState,
        label: &str,
        intensity: f32,
        trigger: &str,
        confidence: f32,
        source: Option<&StimulusSource>,
        now: DateTime<Utc>,
    ) -> EngineState {
        let mut out = state.clone();
        let stimulus = Stimulus::new(label, intensity, trigger, confidence, now);

        match self.taxonomy.resolve(&stimulus.label) {
            Some(entry) => {
                let canonical = self
                    .taxonomy
                    .canonicalize(&stimulus.label)
                    .unwrap_or_else(|| stimulus.label.clone());
                let goals = infer_goals(&state.personality);
                let effective = modulated_intensity(&goals, &canonical, stimulus.intensity);

                apply_entry(&mut out, entry, effective);

                if should_ruminate(
                    stimulus.intensity,
                    self.config.rumination_threshold,
                    self.rumination_probability(&state.personality),
                ) {
                    out.rumination
                        .ignite(&stimulus.id, &canonical, stimulus.intensity, now);
                    tracing::debug!(label = %canonical, intensity = stimulus.intensity, "rumination ignited");
                }
            }
            None => {
                tracing::debug!(label = %stimulus.label, "unknown label, recording no-op stimulus");
            }
        }

        out.record_stimulus(stimulus, source, self.config.max_history);
        out.meta.total_updates += 1;
        out
    }

    /// One rumination tick: advance every active entry, drop the expired
    /// ones, and re-apply the survivors' effects at reduced scale.
    pub fn advance_rumination(&self, state: &EngineState, now: DateTime<Utc>) -> EngineState {
        let mut out = state.clone();
        out.rumination.advance(
            self.config.rumination_decay_factor,
            self.config.rumination_max_stages,
            now,
        );

        let entries: Vec<(String, f32)> = out
            .rumination
            .active
            .iter()
            .map(|e| (e.label.clone(), e.intensity * RUMINATION_SCALE))
            .collect();
        for (label, intensity) in entries {
            if let Some(entry) = self.taxonomy.resolve(&label) {
                apply_entry(&mut out, entry, intensity);
            }
        }
        out
    }

    /// Full message-event pipeline: decay for elapsed wall-clock, replay
    /// existing ruminations, then land the new stimulus (which may ignite
    /// a fresh rumination at stage 0).
    pub fn process_event(
        &self,
        state: &EngineState,
        label: &str,
        intensity: f32,
        trigger: &str,
        confidence: f32,
        source: Option<&StimulusSource>,
        now: DateTime<Utc>,
    ) -> EngineState {
        let decayed = self.apply_decay(state, now);
        let ruminated = self.advance_rumination(&decayed, now);
        self.apply_stimulus_from(&ruminated, label, intensity, trigger, confidence, source, now)
    }

    /// Set one OCEAN trait and atomically re-derive baseline and both
    /// decay tables.
    pub fn set_personality_trait(
        &self,
        state: &EngineState,
        trait_name: &str,
        value: f32,
    ) -> Result<EngineState, EngineError> {
        let t = Trait::from_name(trait_name).ok_or_else(|| {
            EngineError::validation(format!("unknown personality trait '{trait_name}'"))
        })?;
        if !value.is_finite() {
            return Err(EngineError::validation(format!(
                "trait '{trait_name}' must be a finite number"
            )));
        }

        let mut out = state.clone();
        out.personality.set(t, value);
        self.rederive(&mut out);
        out.meta.total_updates += 1;
        Ok(out)
    }

    /// Overwrite personality from a named preset. Unknown ids are a
    /// configuration error.
    pub fn apply_preset(&self, state: &EngineState, id: &str) -> Result<EngineState, EngineError> {
        let preset = crate::presets::find(id)
            .ok_or_else(|| EngineError::config(format!("unknown personality preset '{id}'")))?;
        let mut out = state.clone();
        out.personality = preset.personality;
        self.rederive(&mut out);
        out.meta.total_updates += 1;
        tracing::info!(preset = %preset.id, "personality preset applied");
        Ok(out)
    }

    /// Reinitialize the affective state, keeping personality, its derived
    /// tables, interaction buckets, and `meta.created_at`.
    pub fn reset(&self, state: &EngineState) -> EngineState {
        let mut out = state.clone();
        out.dimensions = out.baseline;
        out.basic_emotions = BasicEmotions::default();
        out.rumination = crate::rumination::Rumination::default();
        out.recent_stimuli.clear();
        out.meta.total_updates += 1;
        out
    }

    /// Persist atomically under the advisory lock, stamping
    /// `last_updated`. Returns the stamped state.
    pub fn save(&self, state: &EngineState) -> Result<EngineState, EngineError> {
        let guard = self.store.try_lock()?.ok_or_else(|| {
            EngineError::io(
                "state file is locked by another writer",
                std::io::Error::new(std::io::ErrorKind::WouldBlock, "lock held"),
            )
        })?;

        let mut stamped = state.clone();
        stamped.last_updated = Utc::now();
        self.store.save_atomic(&stamped)?;
        drop(guard);
        Ok(stamped)
    }

    /// Decay-applied snapshot for external consumers. Does not persist.
    pub fn observe(&self, state: &EngineState, now: DateTime<Utc>) -> Snapshot {
        let decayed = self.apply_decay(state, now);
        Snapshot {
            dimensions: decayed.dimensions,
            basic_emotions: decayed.basic_emotions,
            personality: decayed.personality,
            primary_emotion: decayed.basic_emotions.primary_label().to_string(),
            overall_intensity: decayed.basic_emotions.overall_intensity(),
            recent_stimuli: decayed.recent_stimuli.iter().take(10).cloned().collect(),
            rumination: decayed.rumination,
            baseline: decayed.baseline,
            meta: decayed.meta,
            last_updated: decayed.last_updated,
        }
    }

    /// How prone this personality is to ruminate, in [0, 1].
    fn rumination_probability(&self, personality: &crate::personality::Personality) -> f32 {
        personality.neuroticism
    }

    fn rederive(&self, state: &mut EngineState) {
        state.personality = state.personality.clamped();
        state.baseline = state.personality.baseline();
        state.decay_rates = state.personality.decay_rates(self.config.half_life_hours);
        state.emotion_decay_rates = state
            .personality
            .emotion_decay_rates(self.config.half_life_hours);
    }
}

/// Apply a mapping entry's deltas scaled by `intensity`, clamping after
/// each step.
fn apply_entry(state: &mut EngineState, entry: &MappingEntry, intensity: f32) {
    for (dim, delta) in &entry.dimension_deltas {
        state.dimensions = state.dimensions.apply_delta(*dim, delta * intensity);
    }
    for (emotion, delta) in &entry.emotion_deltas {
        state.basic_emotions = state.basic_emotions.apply_delta(*emotion, delta * intensity);
    }
}
