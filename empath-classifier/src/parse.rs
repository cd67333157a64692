//! Parsing of raw model output into a classification.
//!
//! Models are asked for bare JSON but routinely wrap it in markdown
//! fences. The parser takes the first fenced block when one exists,
//! otherwise the whole string, and requires exactly the four contract
//! fields.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::client::Classification;

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("fence regex"));

/// The exact shape the classifier contract requires.
#[derive(Debug, Deserialize)]
struct RawClassification {
    label: String,
    intensity: f64,
    reason: String,
    confidence: f64,
}

/// Extract the JSON payload from model output, stripping a markdown
/// fence when present.
pub fn strip_fences(raw: &str) -> &str {
    match FENCE.captures(raw) {
        Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(raw),
        None => raw,
    }
    .trim()
}

/// Parse model output into a normalized classification: lowercased label,
/// numerics clamped to [0, 1].
pub fn parse_classification(raw: &str) -> Result<Classification> {
    let payload = strip_fences(raw);
    let parsed: RawClassification =
        serde_json::from_str(payload).context("classification output is not the expected JSON")?;
    Ok(Classification {
        label: parsed.label.trim().to_lowercase(),
        intensity: (parsed.intensity as f32).clamp(0.0, 1.0),
        confidence: (parsed.confidence as f32).clamp(0.0, 1.0),
        reason: parsed.reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json() {
        let c = parse_classification(
            r#"{"label": "Happy", "intensity": 0.7, "reason": "warm tone", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(c.label, "happy");
        assert!((c.intensity - 0.7).abs() < f32::EPSILON);
        assert_eq!(c.reason, "warm tone");
    }

    #[test]
    fn test_fenced_json() {
        let raw = "Here you go:\n```json\n{\"label\": \"sad\", \"intensity\": 0.4, \"reason\": \"r\", \"confidence\": 0.8}\n```\nanything after";
        let c = parse_classification(raw).unwrap();
        assert_eq!(c.label, "sad");
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "```\n{\"label\": \"angry\", \"intensity\": 1.0, \"reason\": \"r\", \"confidence\": 1.0}\n```";
        let c = parse_classification(raw).unwrap();
        assert_eq!(c.label, "angry");
    }

    #[test]
    fn test_first_fence_wins() {
        let raw = "```json\n{\"label\": \"calm\", \"intensity\": 0.2, \"reason\": \"a\", \"confidence\": 0.9}\n```\n```json\n{\"label\": \"angry\"}\n```";
        let c = parse_classification(raw).unwrap();
        assert_eq!(c.label, "calm");
    }

    #[test]
    fn test_numerics_clamped() {
        let c = parse_classification(
            r#"{"label": "happy", "intensity": 1.8, "reason": "r", "confidence": -0.5}"#,
        )
        .unwrap();
        assert!((c.intensity - 1.0).abs() < f32::EPSILON);
        assert!(c.confidence.abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_field_rejected() {
        assert!(parse_classification(r#"{"label": "happy", "intensity": 0.5}"#).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(parse_classification(
            r#"{"label": "happy", "intensity": "high", "reason": "r", "confidence": 0.9}"#
        )
        .is_err());
    }

    #[test]
    fn test_not_json_rejected() {
        assert!(parse_classification("I feel that the user is happy today.").is_err());
    }

    #[test]
    fn test_strip_fences_passthrough() {
        assert_eq!(strip_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
