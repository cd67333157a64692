//! The emotion taxonomy — a static table mapping classifier labels to
//! dimension and basic-emotion deltas, with alias resolution and an
//! overlay for user-supplied custom mappings.
//!
//! Deltas are unit-scale: the state manager multiplies them by the
//! (goal-modulated) stimulus intensity before applying them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::emotion::{BasicEmotion, Dimension};

/// Deltas applied to state when a label's stimulus lands.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub dimension_deltas: Vec<(Dimension, f32)>,
    pub emotion_deltas: Vec<(BasicEmotion, f32)>,
}

impl MappingEntry {
    fn new(
        dimension_deltas: Vec<(Dimension, f32)>,
        emotion_deltas: Vec<(BasicEmotion, f32)>,
    ) -> Self {
        Self {
            dimension_deltas,
            emotion_deltas,
        }
    }

    /// Entry with no effect (the `neutral` label).
    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }
}

static MAPPINGS: Lazy<HashMap<&'static str, MappingEntry>> = Lazy::new(|| {
    use BasicEmotion::*;
    use Dimension::*;

    let mut m = HashMap::new();

    // Positive valence
    m.insert(
        "happy",
        MappingEntry::new(
            vec![(Pleasure, 0.4), (Connection, 0.1), (Energy, 0.1)],
            vec![(Happiness, 0.5)],
        ),
    );
    m.insert(
        "excited",
        MappingEntry::new(
            vec![(Pleasure, 0.3), (Arousal, 0.5), (Energy, 0.3)],
            vec![(Happiness, 0.4), (Surprise, 0.1)],
        ),
    );
    m.insert(
        "content",
        MappingEntry::new(
            vec![(Pleasure, 0.3), (Arousal, -0.2)],
            vec![(Happiness, 0.3)],
        ),
    );
    m.insert(
        "relieved",
        MappingEntry::new(
            vec![(Pleasure, 0.3), (Arousal, -0.3)],
            vec![(Happiness, 0.3), (Fear, -0.2)],
        ),
    );
    m.insert(
        "grateful",
        MappingEntry::new(
            vec![(Pleasure, 0.3), (Connection, 0.3)],
            vec![(Happiness, 0.4)],
        ),
    );
    m.insert(
        "proud",
        MappingEntry::new(
            vec![(Pleasure, 0.3), (Dominance, 0.4)],
            vec![(Happiness, 0.3)],
        ),
    );
    m.insert(
        "calm",
        MappingEntry::new(
            vec![(Arousal, -0.4), (Pleasure, 0.1)],
            vec![(Anger, -0.2), (Fear, -0.2)],
        ),
    );

    // Engagement
    m.insert(
        "curious",
        MappingEntry::new(
            vec![(Curiosity, 0.4), (Arousal, 0.2)],
            vec![(Surprise, 0.1)],
        ),
    );
    m.insert(
        "surprised",
        MappingEntry::new(
            vec![(Arousal, 0.4), (Curiosity, 0.2)],
            vec![(Surprise, 0.6)],
        ),
    );
    m.insert(
        "focused",
        MappingEntry::new(
            vec![(Dominance, 0.3), (Energy, 0.2), (Arousal, -0.1)],
            vec![],
        ),
    );
    m.insert(
        "energized",
        MappingEntry::new(
            vec![(Energy, 0.5), (Arousal, 0.3)],
            vec![(Happiness, 0.2)],
        ),
    );

    // Social
    m.insert(
        "connected",
        MappingEntry::new(
            vec![(Connection, 0.5), (Pleasure, 0.2), (Trust, 0.2)],
            vec![(Happiness, 0.2)],
        ),
    );
    m.insert(
        "trusting",
        MappingEntry::new(
            vec![(Trust, 0.5), (Connection, 0.2)],
            vec![(Happiness, 0.1)],
        ),
    );
    m.insert(
        "lonely",
        MappingEntry::new(
            vec![(Pleasure, -0.3), (Connection, -0.4)],
            vec![(Sadness, 0.4)],
        ),
    );

    // Negative valence
    m.insert(
        "sad",
        MappingEntry::new(
            vec![(Pleasure, -0.4), (Arousal, -0.2)],
            vec![(Sadness, 0.5)],
        ),
    );
    m.insert(
        "angry",
        MappingEntry::new(
            vec![(Pleasure, -0.3), (Arousal, 0.5), (Dominance, 0.2)],
            vec![(Anger, 0.6)],
        ),
    );
    m.insert(
        "frustrated",
        MappingEntry::new(
            vec![(Pleasure, -0.3), (Arousal, 0.3), (Dominance, -0.2)],
            vec![(Anger, 0.4), (Sadness, 0.1)],
        ),
    );
    m.insert(
        "fearful",
        MappingEntry::new(
            vec![(Pleasure, -0.3), (Arousal, 0.4), (Dominance, -0.3)],
            vec![(Fear, 0.6)],
        ),
    );
    m.insert(
        "anxious",
        MappingEntry::new(
            vec![(Pleasure, -0.2), (Arousal, 0.4), (Trust, -0.1)],
            vec![(Fear, 0.4)],
        ),
    );
    m.insert(
        "disgusted",
        MappingEntry::new(vec![(Pleasure, -0.3)], vec![(Disgust, 0.6)]),
    );

    // Low-energy
    m.insert(
        "bored",
        MappingEntry::new(
            vec![(Arousal, -0.3), (Curiosity, -0.3), (Energy, -0.2)],
            vec![(Sadness, 0.1)],
        ),
    );
    m.insert(
        "confused",
        MappingEntry::new(
            vec![(Dominance, -0.2), (Curiosity, 0.1)],
            vec![(Surprise, 0.2), (Fear, 0.1)],
        ),
    );
    m.insert(
        "fatigued",
        MappingEntry::new(
            vec![(Energy, -0.5), (Arousal, -0.3)],
            vec![(Sadness, 0.1)],
        ),
    );

    m.insert("neutral", MappingEntry::empty());

    m
});

static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("joy", "happy");
    m.insert("joyful", "happy");
    m.insert("happiness", "happy");
    m.insert("glad", "happy");
    m.insert("delighted", "happy");
    m.insert("cheerful", "happy");
    m.insert("thrilled", "excited");
    m.insert("eager", "excited");
    m.insert("satisfied", "content");
    m.insert("peaceful", "calm");
    m.insert("relaxed", "calm");
    m.insert("thankful", "grateful");
    m.insert("appreciative", "grateful");
    m.insert("interested", "curious");
    m.insert("intrigued", "curious");
    m.insert("amazed", "surprised");
    m.insert("shocked", "surprised");
    m.insert("astonished", "surprised");
    m.insert("close", "connected");
    m.insert("bonded", "connected");
    m.insert("mad", "angry");
    m.insert("furious", "angry");
    m.insert("irritated", "frustrated");
    m.insert("annoyed", "frustrated");
    m.insert("scared", "fearful");
    m.insert("afraid", "fearful");
    m.insert("terrified", "fearful");
    m.insert("worried", "anxious");
    m.insert("nervous", "anxious");
    m.insert("stressed", "anxious");
    m.insert("unhappy", "sad");
    m.insert("down", "sad");
    m.insert("depressed", "sad");
    m.insert("gloomy", "sad");
    m.insert("lonesome", "lonely");
    m.insert("isolated", "lonely");
    m.insert("tired", "fatigued");
    m.insert("exhausted", "fatigued");
    m.insert("drained", "fatigued");
    m.insert("repulsed", "disgusted");
    m.insert("okay", "neutral");
    m.insert("fine", "neutral");
    m
});

/// Resolve a label against the static table only (lowercase + alias).
pub fn resolve_static(label: &str) -> Option<&'static MappingEntry> {
    canonical_name(label).and_then(|name| MAPPINGS.get(name))
}

/// Canonical static-table name for a label, resolving aliases.
pub fn canonical_name(label: &str) -> Option<&'static str> {
    let lower = label.trim().to_lowercase();
    if let Some(canonical) = ALIASES.get(lower.as_str()) {
        return Some(canonical);
    }
    MAPPINGS.get_key_value(lower.as_str()).map(|(k, _)| *k)
}

/// All canonical labels, sorted. This is the classifier's default label set.
pub fn canonical_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = MAPPINGS.keys().copied().collect();
    labels.sort_unstable();
    labels
}

/// The merged taxonomy: user-supplied custom entries consulted before the
/// static table.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    custom: HashMap<String, MappingEntry>,
}

impl Taxonomy {
    /// Build a taxonomy from a JSON object of custom mappings:
    ///
    /// ```json
    /// { "homesick": { "dimensions": { "pleasure": -0.3 },
    ///                 "emotions":   { "sadness": 0.4 } } }
    /// ```
    ///
    /// Keys are lowercased; unknown dimension or emotion names inside an
    /// entry are silently dropped; non-object values are ignored.
    pub fn with_custom(custom: &Value) -> Self {
        let mut merged = HashMap::new();
        if let Some(obj) = custom.as_object() {
            for (label, record) in obj {
                if let Some(entry) = parse_custom_entry(record) {
                    merged.insert(label.to_lowercase(), entry);
                }
            }
        }
        Self { custom: merged }
    }

    /// Resolve a label: custom overlay first, then alias + static table.
    pub fn resolve(&self, label: &str) -> Option<&MappingEntry> {
        let lower = label.trim().to_lowercase();
        if let Some(entry) = self.custom.get(&lower) {
            return Some(entry);
        }
        resolve_static(&lower)
    }

    /// Canonical name a label resolves under: the custom key itself, or
    /// the alias-resolved static name.
    pub fn canonicalize(&self, label: &str) -> Option<String> {
        let lower = label.trim().to_lowercase();
        if self.custom.contains_key(&lower) {
            return Some(lower);
        }
        canonical_name(&lower).map(str::to_string)
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }
}

fn parse_custom_entry(record: &Value) -> Option<MappingEntry> {
    let obj = record.as_object()?;
    let mut entry = MappingEntry::empty();

    if let Some(dims) = obj.get("dimensions").and_then(Value::as_object) {
        for (name, delta) in dims {
            match (Dimension::from_name(name), delta.as_f64()) {
                (Some(dim), Some(d)) => entry.dimension_deltas.push((dim, d as f32)),
                _ => tracing::debug!(name = %name, "dropping unknown dimension in custom mapping"),
            }
        }
    }
    if let Some(emotions) = obj.get("emotions").and_then(Value::as_object) {
        for (name, delta) in emotions {
            match (BasicEmotion::from_name(name), delta.as_f64()) {
                (Some(e), Some(d)) => entry.emotion_deltas.push((e, d as f32)),
                _ => tracing::debug!(name = %name, "dropping unknown emotion in custom mapping"),
            }
        }
    }
    Some(entry)
}
