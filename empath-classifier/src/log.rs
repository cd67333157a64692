//! Append-only JSONL log of classification attempts.
//!
//! Each attempt becomes one line, written with a single `write_all` so
//! concurrent appenders cannot interleave within a line. Only a short
//! excerpt of the message is retained, never the full body.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Longest message excerpt persisted to the log.
pub const EXCERPT_LEN: usize = 80;

/// One classification attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub timestamp: DateTime<Utc>,
    pub role: String,
    pub excerpt: String,
    pub label: String,
    pub intensity: f32,
    pub confidence: f32,
    pub success: bool,
}

impl ClassificationRecord {
    pub fn new(
        role: &str,
        text: &str,
        label: &str,
        intensity: f32,
        confidence: f32,
        success: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: now,
            role: role.to_string(),
            excerpt: excerpt(text),
            label: label.to_string(),
            intensity,
            confidence,
            success,
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LEN {
        text.to_string()
    } else {
        text.chars().take(EXCERPT_LEN).collect()
    }
}

/// Append one record as a single line. Failures are logged and swallowed;
/// the classification itself must never fail because its log did.
pub fn append(path: &Path, record: &ClassificationRecord) {
    let line = match serde_json::to_string(record) {
        Ok(line) => line,
        Err(err) => {
            tracing::warn!(%err, "failed to serialize classification record");
            return;
        }
    };

    let result = (|| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(format!("{line}\n").as_bytes())
    })();

    if let Err(err) = result {
        tracing::warn!(path = %path.display(), %err, "failed to append classification log");
    }
}
