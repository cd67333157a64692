//! Message-event pipeline: content extraction → classification →
//! engine stimulus, with a scripted classifier standing in for HTTP.

use chrono::{DateTime, Utc};
use serde_json::json;

use empath_classifier::{extract_text, Classification, Classify, Content};
use empath_core::engine::EmotionEngine;
use empath_core::state::{EngineState, Role, StimulusSource};
use empath_core::EngineConfig;

struct Scripted(Vec<(&'static str, Classification)>);

impl Classify for Scripted {
    fn classify(&self, text: &str, _role: &str) -> Classification {
        self.0
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, c)| c.clone())
            .unwrap_or_else(|| Classification::neutral("no script entry"))
    }
}

fn t0() -> DateTime<Utc> {
    "2026-02-01T08:00:00Z".parse().unwrap()
}

#[test]
fn message_event_flows_into_state() {
    let dir = tempfile::tempdir().unwrap();
    let engine = EmotionEngine::new(
        dir.path().join("agent/emotion-engine.json"),
        EngineConfig::default(),
    )
    .unwrap();
    let classifier = Scripted(vec![(
        "thank you",
        Classification {
            label: "grateful".into(),
            intensity: 0.8,
            confidence: 0.9,
            reason: "explicit thanks".into(),
        },
    )]);

    let content = Content::from_value(json!([
        { "type": "text", "text": "thank you" },
        { "type": "text", "text": "so much!" }
    ]));
    let text = extract_text(&content);
    assert_eq!(text, "thank you so much!");

    let classification = classifier.classify(&text, "user");
    let state = EngineState::default_at(engine.config(), t0());
    let source = StimulusSource {
        role: Role::User,
        id: "u1".into(),
    };
    let after = engine.process_event(
        &state,
        &classification.label,
        classification.intensity,
        &classification.reason,
        classification.confidence,
        Some(&source),
        t0(),
    );

    assert!(after.dimensions.pleasure > 0.0);
    assert!(after.dimensions.connection > state.dimensions.connection);
    assert_eq!(after.recent_stimuli[0].label, "grateful");
    assert_eq!(after.recent_stimuli[0].reason, "explicit thanks");
    assert_eq!(
        after.users.get("u1").unwrap().latest.as_ref().unwrap().label,
        "grateful"
    );
}

#[test]
fn unscripted_message_is_neutral_and_inert() {
    let dir = tempfile::tempdir().unwrap();
    let engine = EmotionEngine::new(
        dir.path().join("agent/emotion-engine.json"),
        EngineConfig::default(),
    )
    .unwrap();
    let classifier = Scripted(vec![]);

    let classification = classifier.classify("whatever", "user");
    assert!(classification.is_neutral());

    let state = EngineState::default_at(engine.config(), t0());
    let after = engine.process_event(
        &state,
        &classification.label,
        classification.intensity,
        &classification.reason,
        classification.confidence,
        None,
        t0(),
    );

    // Neutral classification still leaves an audit trail in history
    assert_eq!(after.dimensions, state.dimensions);
    assert_eq!(after.basic_emotions, state.basic_emotions);
    assert_eq!(after.recent_stimuli.len(), 1);
}
