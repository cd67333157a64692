//! A read-only catalogue of named personality presets.
//!
//! Each preset is a complete OCEAN profile with a short rationale for its
//! trait choices. Applying one is an engine operation; unknown ids are a
//! configuration error there.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::personality::Personality;

/// A named, documented OCEAN profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rationale: &'static str,
    pub personality: Personality,
}

static PRESETS: Lazy<Vec<PersonalityPreset>> = Lazy::new(|| {
    vec![
        PersonalityPreset {
            id: "mandela",
            name: "Mandela",
            description: "Warm, principled, unshakeable under pressure",
            rationale: "Very high agreeableness with low neuroticism gives a \
                        positive resting pleasure and durable trust; high \
                        conscientiousness keeps the drift slow.",
            personality: Personality {
                openness: 0.75,
                conscientiousness: 0.8,
                extraversion: 0.6,
                agreeableness: 0.9,
                neuroticism: 0.15,
            },
        },
        PersonalityPreset {
            id: "curie",
            name: "Curie",
            description: "Quietly obsessive researcher",
            rationale: "Top-end openness and conscientiousness activate the \
                        exploration and task-completion goals; modest \
                        extraversion keeps arousal near baseline.",
            personality: Personality {
                openness: 0.9,
                conscientiousness: 0.85,
                extraversion: 0.35,
                agreeableness: 0.6,
                neuroticism: 0.35,
            },
        },
        PersonalityPreset {
            id: "feynman",
            name: "Feynman",
            description: "Playful, restless explorer",
            rationale: "High openness plus high extraversion switches on \
                        novelty seeking; low neuroticism makes setbacks \
                        bounce off quickly.",
            personality: Personality {
                openness: 0.95,
                conscientiousness: 0.55,
                extraversion: 0.8,
                agreeableness: 0.65,
                neuroticism: 0.2,
            },
        },
        PersonalityPreset {
            id: "rogers",
            name: "Rogers",
            description: "Gentle, endlessly patient companion",
            rationale: "Agreeableness dominates every derivation: high \
                        connection and trust baselines, social-harmony goal \
                        always active.",
            personality: Personality {
                openness: 0.7,
                conscientiousness: 0.75,
                extraversion: 0.55,
                agreeableness: 0.95,
                neuroticism: 0.1,
            },
        },
        PersonalityPreset {
            id: "stoic",
            name: "Stoic",
            description: "Low reactivity, high discipline",
            rationale: "Minimal neuroticism and strong conscientiousness \
                        yield long unipolar half-lives and a flat emotional \
                        response curve.",
            personality: Personality {
                openness: 0.5,
                conscientiousness: 0.9,
                extraversion: 0.3,
                agreeableness: 0.6,
                neuroticism: 0.1,
            },
        },
        PersonalityPreset {
            id: "anxious",
            name: "Anxious",
            description: "Volatile, threat-sensitive profile",
            rationale: "High neuroticism shortens bipolar half-lives and \
                        makes rumination ignite on much weaker stimuli; \
                        useful for testing worst-case dynamics.",
            personality: Personality {
                openness: 0.5,
                conscientiousness: 0.6,
                extraversion: 0.25,
                agreeableness: 0.65,
                neuroticism: 0.85,
            },
        },
        PersonalityPreset {
            id: "sage",
            name: "Sage",
            description: "Curious, balanced, slightly detached",
            rationale: "Openness leads with everything else near midpoint; \
                        the curiosity baseline rises without committing to \
                        any social goal.",
            personality: Personality {
                openness: 0.85,
                conscientiousness: 0.6,
                extraversion: 0.5,
                agreeableness: 0.6,
                neuroticism: 0.3,
            },
        },
    ]
});

/// All presets, in catalogue order.
pub fn all() -> &'static [PersonalityPreset] {
    &PRESETS
}

/// Look up a preset by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static PersonalityPreset> {
    let lower = id.to_lowercase();
    PRESETS.iter().find(|p| p.id == lower)
}
