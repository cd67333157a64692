//! Big Five (OCEAN) personality model and the three derivations that hang
//! off it: the dimensional baseline, per-dimension decay half-lives, and
//! per-emotion decay half-lives.
//!
//! All three derivations are pure and total; whenever a trait changes they
//! must be recomputed together.

use serde::{Deserialize, Serialize};

use crate::emotion::Dimensions;

/// The five OCEAN traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        }
    }

    /// Look up a trait by name (case-insensitive, short forms accepted).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "openness" | "o" => Some(Self::Openness),
            "conscientiousness" | "c" => Some(Self::Conscientiousness),
            "extraversion" | "e" => Some(Self::Extraversion),
            "agreeableness" | "a" => Some(Self::Agreeableness),
            "neuroticism" | "n" => Some(Self::Neuroticism),
            _ => None,
        }
    }
}

/// Big Five personality profile. Each trait is a continuous value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personality {
    /// Openness to experience — curiosity, novelty-seeking.
    pub openness: f32,
    /// Conscientiousness — orderliness, self-discipline.
    pub conscientiousness: f32,
    /// Extraversion — social energy, positive emotion bias.
    pub extraversion: f32,
    /// Agreeableness — empathy, cooperation, trust bias.
    pub agreeableness: f32,
    /// Neuroticism — emotional volatility, negative emotion bias.
    pub neuroticism: f32,
}

impl Default for Personality {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

impl Personality {
    /// Create a personality with all traits at the given value.
    pub fn uniform(value: f32) -> Self {
        let v = value.clamp(0.0, 1.0);
        Self {
            openness: v,
            conscientiousness: v,
            extraversion: v,
            agreeableness: v,
            neuroticism: v,
        }
    }

    pub fn get(&self, t: Trait) -> f32 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    /// Set a trait, clamped to [0, 1].
    pub fn set(&mut self, t: Trait, value: f32) {
        let v = value.clamp(0.0, 1.0);
        match t {
            Trait::Openness => self.openness = v,
            Trait::Conscientiousness => self.conscientiousness = v,
            Trait::Extraversion => self.extraversion = v,
            Trait::Agreeableness => self.agreeableness = v,
            Trait::Neuroticism => self.neuroticism = v,
        }
    }

    /// Return a copy with every trait clamped to [0, 1].
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for t in Trait::ALL {
            out.set(t, self.get(t));
        }
        out
    }

    /// Derive the resting baseline of every dimension from the profile.
    ///
    /// Agreeable, low-neuroticism profiles rest at positive pleasure;
    /// extraverts rest at higher arousal and energy; open profiles at
    /// higher curiosity. Each value is clamped to its dimension's range.
    pub fn baseline(&self) -> Dimensions {
        let o = self.openness;
        let c = self.conscientiousness;
        let e = self.extraversion;
        let a = self.agreeableness;
        let n = self.neuroticism;

        let dims = Dimensions {
            pleasure: 0.3 * (a - n),
            arousal: 0.3 * (e - 0.5) * 2.0,
            dominance: 0.3 * (c - 0.5) * 2.0,
            connection: 0.3 + 0.4 * a,
            curiosity: 0.3 + 0.4 * o,
            energy: 0.3 + 0.4 * e,
            trust: 0.3 + 0.4 * (a - 0.5 * n + 0.5),
        };
        dims.clamped()
    }

    /// Derive per-dimension decay half-lives (hours) from the profile.
    ///
    /// Neuroticism shortens the half-life of the bipolar dimensions
    /// (volatile profiles swing back faster); conscientiousness lengthens
    /// the half-life of the unipolar ones (disciplined profiles drift
    /// more slowly).
    pub fn decay_rates(&self, half_life_hours: f32) -> DecayRates {
        let bipolar = half_life_hours / (1.0 + 0.5 * self.neuroticism);
        let unipolar = half_life_hours * (1.0 + 0.5 * self.conscientiousness);
        DecayRates {
            pleasure: bipolar,
            arousal: bipolar,
            dominance: bipolar,
            connection: unipolar,
            curiosity: unipolar,
            energy: unipolar,
            trust: unipolar,
        }
    }

    /// Derive per-emotion decay half-lives (hours) from the profile.
    ///
    /// Anger and fear fade faster under high neuroticism; happiness
    /// lingers for extraverts; the rest use the base half-life.
    pub fn emotion_decay_rates(&self, half_life_hours: f32) -> EmotionDecayRates {
        EmotionDecayRates {
            happiness: half_life_hours * (1.0 + 0.3 * self.extraversion),
            sadness: half_life_hours,
            anger: half_life_hours / (1.0 + 0.5 * self.neuroticism),
            fear: half_life_hours / (1.0 + 0.5 * self.neuroticism),
            disgust: half_life_hours,
            surprise: half_life_hours,
        }
    }
}

/// Per-dimension decay half-lives in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayRates {
    pub pleasure: f32,
    pub arousal: f32,
    pub dominance: f32,
    pub connection: f32,
    pub curiosity: f32,
    pub energy: f32,
    pub trust: f32,
}

impl DecayRates {
    pub fn get(&self, dim: crate::emotion::Dimension) -> f32 {
        use crate::emotion::Dimension;
        match dim {
            Dimension::Pleasure => self.pleasure,
            Dimension::Arousal => self.arousal,
            Dimension::Dominance => self.dominance,
            Dimension::Connection => self.connection,
            Dimension::Curiosity => self.curiosity,
            Dimension::Energy => self.energy,
            Dimension::Trust => self.trust,
        }
    }
}

/// Per-basic-emotion decay half-lives in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDecayRates {
    pub happiness: f32,
    pub sadness: f32,
    pub anger: f32,
    pub fear: f32,
    pub disgust: f32,
    pub surprise: f32,
}

impl EmotionDecayRates {
    pub fn get(&self, emotion: crate::emotion::BasicEmotion) -> f32 {
        use crate::emotion::BasicEmotion;
        match emotion {
            BasicEmotion::Happiness => self.happiness,
            BasicEmotion::Sadness => self.sadness,
            BasicEmotion::Anger => self.anger,
            BasicEmotion::Fear => self.fear,
            BasicEmotion::Disgust => self.disgust,
            BasicEmotion::Surprise => self.surprise,
        }
    }
}
