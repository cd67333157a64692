//! Implicit behavioral goals inferred from personality, and the intensity
//! amplification they apply to incoming stimuli.
//!
//! A stimulus whose label threatens an active goal hits harder; one that
//! achieves a goal also lands amplified, at a smaller weight.

use serde::{Deserialize, Serialize};

use crate::personality::Personality;

/// Trait level at which a goal activates.
const ACTIVATION_THRESHOLD: f32 = 0.6;

/// Weight per unit goal strength for threatening labels.
const THREAT_WEIGHT: f32 = 0.3;

/// Weight per unit goal strength for achieving labels.
const ACHIEVEMENT_WEIGHT: f32 = 0.2;

/// The five implicit goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    TaskCompletion,
    Exploration,
    SocialHarmony,
    SelfRegulation,
    NoveltySeeking,
}

impl GoalKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::TaskCompletion => "task_completion",
            Self::Exploration => "exploration",
            Self::SocialHarmony => "social_harmony",
            Self::SelfRegulation => "self_regulation",
            Self::NoveltySeeking => "novelty_seeking",
        }
    }

    /// Labels whose stimuli threaten this goal.
    pub fn threat_labels(self) -> &'static [&'static str] {
        match self {
            Self::TaskCompletion => &["frustrated", "anxious", "confused", "fatigued"],
            Self::Exploration => &["bored", "frustrated"],
            Self::SocialHarmony => &["angry", "disgusted", "lonely"],
            Self::SelfRegulation => &["angry", "anxious"],
            Self::NoveltySeeking => &["bored", "fatigued"],
        }
    }

    /// Labels whose stimuli achieve this goal.
    pub fn achievement_labels(self) -> &'static [&'static str] {
        match self {
            Self::TaskCompletion => &["happy", "relieved", "energized", "focused"],
            Self::Exploration => &["curious", "excited", "surprised"],
            Self::SocialHarmony => &["connected", "trusting", "happy", "calm"],
            Self::SelfRegulation => &["calm", "focused", "relieved"],
            Self::NoveltySeeking => &["excited", "curious", "surprised", "energized"],
        }
    }
}

/// An active goal with its normalized strength in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub strength: f32,
}

/// Normalized distance past the 0.6 activation threshold.
fn past_threshold(value: f32) -> Option<f32> {
    if value > ACTIVATION_THRESHOLD {
        Some(((value - ACTIVATION_THRESHOLD) / (1.0 - ACTIVATION_THRESHOLD)).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Infer the active goals for a personality profile.
///
/// Conjunctive goals take the minimum of their component strengths.
pub fn infer_goals(p: &Personality) -> Vec<Goal> {
    let mut goals = Vec::new();

    if let Some(strength) = past_threshold(p.conscientiousness) {
        goals.push(Goal {
            kind: GoalKind::TaskCompletion,
            strength,
        });
    }
    if let Some(strength) = past_threshold(p.openness) {
        goals.push(Goal {
            kind: GoalKind::Exploration,
            strength,
        });
    }
    if let Some(strength) = past_threshold(p.agreeableness) {
        goals.push(Goal {
            kind: GoalKind::SocialHarmony,
            strength,
        });
    }
    // self_regulation: C > 0.6 and N < 0.4
    if p.conscientiousness > ACTIVATION_THRESHOLD && p.neuroticism < 0.4 {
        let c = (p.conscientiousness - ACTIVATION_THRESHOLD) / 0.4;
        let n = (0.4 - p.neuroticism) / 0.4;
        goals.push(Goal {
            kind: GoalKind::SelfRegulation,
            strength: c.min(n).clamp(0.0, 1.0),
        });
    }
    // novelty_seeking: O > 0.7 and E > 0.6
    if p.openness > 0.7 && p.extraversion > ACTIVATION_THRESHOLD {
        let o = (p.openness - 0.7) / 0.3;
        let e = (p.extraversion - ACTIVATION_THRESHOLD) / 0.4;
        goals.push(Goal {
            kind: GoalKind::NoveltySeeking,
            strength: o.min(e).clamp(0.0, 1.0),
        });
    }

    goals
}

/// Amplify a stimulus intensity by the active goals it threatens or
/// achieves. The multiplier accumulates across goals; the result is
/// capped at 1.
pub fn modulated_intensity(goals: &[Goal], label: &str, intensity: f32) -> f32 {
    let lower = label.to_lowercase();
    let mut multiplier = 1.0;
    for goal in goals {
        if goal.kind.threat_labels().contains(&lower.as_str()) {
            multiplier += THREAT_WEIGHT * goal.strength;
        }
        if goal.kind.achievement_labels().contains(&lower.as_str()) {
            multiplier += ACHIEVEMENT_WEIGHT * goal.strength;
        }
    }
    (intensity * multiplier).min(1.0)
}
