//! Emotion primitives — the dimensional affect space and the six basic
//! emotion levels, with pure clamping and delta application.
//!
//! Three bipolar dimensions (Pleasure, Arousal, Dominance) range over
//! [-1, 1]; four unipolar extension dimensions (Connection, Curiosity,
//! Energy, Trust) range over [0, 1]. Basic emotions are non-negative
//! levels in [0, 1]. Every operation here returns a fresh value.

use serde::{Deserialize, Serialize};

/// Activation below which the state counts as emotionally neutral.
pub const NEUTRAL_THRESHOLD: f32 = 0.05;

/// The seven named dimensions of the affect space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Pleasure,
    Arousal,
    Dominance,
    Connection,
    Curiosity,
    Energy,
    Trust,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Self::Pleasure,
        Self::Arousal,
        Self::Dominance,
        Self::Connection,
        Self::Curiosity,
        Self::Energy,
        Self::Trust,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pleasure => "pleasure",
            Self::Arousal => "arousal",
            Self::Dominance => "dominance",
            Self::Connection => "connection",
            Self::Curiosity => "curiosity",
            Self::Energy => "energy",
            Self::Trust => "trust",
        }
    }

    /// Look up a dimension by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pleasure" => Some(Self::Pleasure),
            "arousal" => Some(Self::Arousal),
            "dominance" => Some(Self::Dominance),
            "connection" => Some(Self::Connection),
            "curiosity" => Some(Self::Curiosity),
            "energy" => Some(Self::Energy),
            "trust" => Some(Self::Trust),
            _ => None,
        }
    }

    /// Bipolar dimensions swing around zero; unipolar ones sit in [0, 1].
    pub fn is_bipolar(self) -> bool {
        matches!(self, Self::Pleasure | Self::Arousal | Self::Dominance)
    }

    pub fn range(self) -> (f32, f32) {
        if self.is_bipolar() {
            (-1.0, 1.0)
        } else {
            (0.0, 1.0)
        }
    }

    /// Resting value before any personality-derived baseline applies.
    pub fn default_value(self) -> f32 {
        if self.is_bipolar() {
            0.0
        } else {
            0.5
        }
    }

    /// Clamp a value to this dimension's declared range.
    pub fn clamp_value(self, value: f32) -> f32 {
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

/// The dimensional affect state — seven continuous axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub pleasure: f32,
    pub arousal: f32,
    pub dominance: f32,
    pub connection: f32,
    pub curiosity: f32,
    pub energy: f32,
    pub trust: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            pleasure: 0.0,
            arousal: 0.0,
            dominance: 0.0,
            connection: 0.5,
            curiosity: 0.5,
            energy: 0.5,
            trust: 0.5,
        }
    }
}

impl Dimensions {
    pub fn get(&self, dim: Dimension) -> f32 {
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

    /// Set a dimension, clamped to its declared range.
    pub fn set(&mut self, dim: Dimension, value: f32) {
        let v = dim.clamp_value(value);
        match dim {
            Dimension::Pleasure => self.pleasure = v,
            Dimension::Arousal => self.arousal = v,
            Dimension::Dominance => self.dominance = v,
            Dimension::Connection => self.connection = v,
            Dimension::Curiosity => self.curiosity = v,
            Dimension::Energy => self.energy = v,
            Dimension::Trust => self.trust = v,
        }
    }

    /// Return a copy with every axis clamped to its declared range.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for dim in Dimension::ALL {
            out.set(dim, self.get(dim));
        }
        out
    }

    /// Return a copy with `delta` added to one axis, clamped.
    pub fn apply_delta(&self, dim: Dimension, delta: f32) -> Self {
        let mut out = *self;
        out.set(dim, self.get(dim) + delta);
        out
    }
}

/// The six basic emotions.
///
/// `ALL` is alphabetically ordered so that an argmax scan with a strict
/// comparison resolves ties in ascending alphabetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicEmotion {
    Anger,
    Disgust,
    Fear,
    Happiness,
    Sadness,
    Surprise,
}

impl BasicEmotion {
    pub const ALL: [BasicEmotion; 6] = [
        Self::Anger,
        Self::Disgust,
        Self::Fear,
        Self::Happiness,
        Self::Sadness,
        Self::Surprise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Happiness => "happiness",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
        }
    }

    /// Look up a basic emotion by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "anger" => Some(Self::Anger),
            "disgust" => Some(Self::Disgust),
            "fear" => Some(Self::Fear),
            "happiness" => Some(Self::Happiness),
            "sadness" => Some(Self::Sadness),
            "surprise" => Some(Self::Surprise),
            _ => None,
        }
    }
}

/// The six basic emotion levels, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEmotions {
    pub happiness: f32,
    pub sadness: f32,
    pub anger: f32,
    pub fear: f32,
    pub disgust: f32,
    pub surprise: f32,
}

impl BasicEmotions {
    pub fn get(&self, emotion: BasicEmotion) -> f32 {
        match emotion {
            BasicEmotion::Anger => self.anger,
            BasicEmotion::Disgust => self.disgust,
            BasicEmotion::Fear => self.fear,
            BasicEmotion::Happiness => self.happiness,
            BasicEmotion::Sadness => self.sadness,
            BasicEmotion::Surprise => self.surprise,
        }
    }

    /// Set an emotion level, clamped to [0, 1].
    pub fn set(&mut self, emotion: BasicEmotion, value: f32) {
        let v = value.clamp(0.0, 1.0);
        match emotion {
            BasicEmotion::Anger => self.anger = v,
            BasicEmotion::Disgust => self.disgust = v,
            BasicEmotion::Fear => self.fear = v,
            BasicEmotion::Happiness => self.happiness = v,
            BasicEmotion::Sadness => self.sadness = v,
            BasicEmotion::Surprise => self.surprise = v,
        }
    }

    /// Return a copy with every level clamped to [0, 1].
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for emotion in BasicEmotion::ALL {
            out.set(emotion, self.get(emotion));
        }
        out
    }

    /// Return a copy with `delta` added to one level, clamped.
    pub fn apply_delta(&self, emotion: BasicEmotion, delta: f32) -> Self {
        let mut out = *self;
        out.set(emotion, self.get(emotion) + delta);
        out
    }

    /// The strongest basic emotion, or `None` when all levels are at or
    /// below [`NEUTRAL_THRESHOLD`]. Ties resolve alphabetically ascending.
    pub fn primary(&self) -> Option<BasicEmotion> {
        let mut best = BasicEmotion::ALL[0];
        let mut best_val = self.get(best);
        for emotion in &BasicEmotion::ALL[1..] {
            let v = self.get(*emotion);
            if v > best_val {
                best = *emotion;
                best_val = v;
            }
        }
        if best_val <= NEUTRAL_THRESHOLD {
            None
        } else {
            Some(best)
        }
    }

    /// Name of the primary emotion, `"neutral"` when there is none.
    pub fn primary_label(&self) -> &'static str {
        self.primary().map(BasicEmotion::name).unwrap_or("neutral")
    }

    /// Overall emotional intensity — RMS of the six levels, in [0, 1].
    pub fn overall_intensity(&self) -> f32 {
        let sum_sq: f32 = BasicEmotion::ALL
            .iter()
            .map(|e| {
                let v = self.get(*e);
                v * v
            })
            .sum();
        (sum_sq / BasicEmotion::ALL.len() as f32).sqrt().clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_ranges() {
        assert_eq!(Dimension::Pleasure.range(), (-1.0, 1.0));
        assert_eq!(Dimension::Connection.range(), (0.0, 1.0));
        assert!(Dimension::Arousal.is_bipolar());
        assert!(!Dimension::Trust.is_bipolar());
    }

    #[test]
    fn test_dimension_defaults() {
        assert_eq!(Dimension::Pleasure.default_value(), 0.0);
        assert_eq!(Dimension::Curiosity.default_value(), 0.5);
        let dims = Dimensions::default();
        for dim in Dimension::ALL {
            assert!((dims.get(dim) - dim.default_value()).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_dimension_from_name() {
        assert_eq!(Dimension::from_name("Pleasure"), Some(Dimension::Pleasure));
        assert_eq!(Dimension::from_name("TRUST"), Some(Dimension::Trust));
        assert_eq!(Dimension::from_name("valence"), None);
    }

    #[test]
    fn test_clamp_value_bipolar() {
        assert!((Dimension::Pleasure.clamp_value(1.7) - 1.0).abs() < f32::EPSILON);
        assert!((Dimension::Pleasure.clamp_value(-1.7) + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamp_value_unipolar() {
        assert!((Dimension::Energy.clamp_value(-0.3)).abs() < f32::EPSILON);
        assert!((Dimension::Energy.clamp_value(1.3) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_apply_delta_fresh() {
        let dims = Dimensions::default();
        let out = dims.apply_delta(Dimension::Pleasure, 0.4);
        assert!((out.pleasure - 0.4).abs() < f32::EPSILON);
        // Input untouched
        assert!(dims.pleasure.abs() < f32::EPSILON);
    }

    #[test]
    fn test_apply_delta_clamps() {
        let dims = Dimensions::default();
        let out = dims.apply_delta(Dimension::Connection, 2.0);
        assert!((out.connection - 1.0).abs() < f32::EPSILON);
        let out = dims.apply_delta(Dimension::Pleasure, -3.0);
        assert!((out.pleasure + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamped_whole_object() {
        let dims = Dimensions {
            pleasure: 2.0,
            arousal: -2.0,
            dominance: 0.3,
            connection: 1.5,
            curiosity: -0.5,
            energy: 0.5,
            trust: 0.5,
        };
        let out = dims.clamped();
        assert!((out.pleasure - 1.0).abs() < f32::EPSILON);
        assert!((out.arousal + 1.0).abs() < f32::EPSILON);
        assert!((out.connection - 1.0).abs() < f32::EPSILON);
        assert!(out.curiosity.abs() < f32::EPSILON);
    }

    #[test]
    fn test_basic_emotion_all_alphabetical() {
        let names: Vec<&str> = BasicEmotion::ALL.iter().map(|e| e.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_primary_neutral_at_zero() {
        let emotions = BasicEmotions::default();
        assert_eq!(emotions.primary(), None);
        assert_eq!(emotions.primary_label(), "neutral");
    }

    #[test]
    fn test_primary_neutral_at_threshold() {
        let mut emotions = BasicEmotions::default();
        emotions.set(BasicEmotion::Fear, NEUTRAL_THRESHOLD);
        assert_eq!(emotions.primary(), None);
    }

    #[test]
    fn test_primary_argmax() {
        let mut emotions = BasicEmotions::default();
        emotions.set(BasicEmotion::Sadness, 0.4);
        emotions.set(BasicEmotion::Happiness, 0.6);
        assert_eq!(emotions.primary(), Some(BasicEmotion::Happiness));
        assert_eq!(emotions.primary_label(), "happiness");
    }

    #[test]
    fn test_primary_tie_alphabetical() {
        let mut emotions = BasicEmotions::default();
        emotions.set(BasicEmotion::Surprise, 0.5);
        emotions.set(BasicEmotion::Anger, 0.5);
        // anger < surprise alphabetically
        assert_eq!(emotions.primary(), Some(BasicEmotion::Anger));

        let mut emotions = BasicEmotions::default();
        emotions.set(BasicEmotion::Sadness, 0.5);
        emotions.set(BasicEmotion::Happiness, 0.5);
        assert_eq!(emotions.primary(), Some(BasicEmotion::Happiness));
    }

    #[test]
    fn test_overall_intensity_zero() {
        assert!(BasicEmotions::default().overall_intensity().abs() < f32::EPSILON);
    }

    #[test]
    fn test_overall_intensity_uniform() {
        let mut emotions = BasicEmotions::default();
        for e in BasicEmotion::ALL {
            emotions.set(e, 0.5);
        }
        // RMS of six equal values is the value itself
        assert!((emotions.overall_intensity() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overall_intensity_bounded() {
        let mut emotions = BasicEmotions::default();
        for e in BasicEmotion::ALL {
            emotions.set(e, 1.0);
        }
        assert!((emotions.overall_intensity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_emotion_delta_floor() {
        let emotions = BasicEmotions::default();
        let out = emotions.apply_delta(BasicEmotion::Anger, -0.4);
        assert!(out.anger.abs() < f32::EPSILON);
    }

    #[test]
    fn test_emotion_from_name() {
        assert_eq!(BasicEmotion::from_name("Happiness"), Some(BasicEmotion::Happiness));
        assert_eq!(BasicEmotion::from_name("joy"), None);
    }
}
