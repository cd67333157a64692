// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! Crash-safe persistence: pretty-printed JSON written via tmp+rename,
//! guarded by an advisory lock file with a staleness timeout, plus the
//! v1 → v2 schema migration applied on read.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::state::{EngineState, RoleBucket, Stimulus, SCHEMA_VERSION};

/// Owns the state file path and the locking discipline around it.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    stale_timeout: Duration,
}

/// Held while a save is in flight; unlinks the lock file on drop.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %err, "failed to release lock file");
        }
    }
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>, stale_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            stale_timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_owned();
        os.push(".tmp");
        PathBuf::from(os)
    }

    fn lock_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_owned();
        os.push(".lock");
        PathBuf::from(os)
    }

    /// Load the state file, migrating v1 documents. A missing or
    /// malformed file yields a freshly built default state; this never
    /// fails.
    pub fn load(&self, config: &EngineConfig, now: DateTime<Utc>) -> EngineState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %err, "unreadable state file, using defaults");
                }
                return EngineState::default_at(config, now);
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "malformed state file, using defaults");
                return EngineState::default_at(config, now);
            }
        };

        match value.get("version").and_then(Value::as_u64) {
            Some(1) => {
                tracing::info!(path = %self.path.display(), "migrating state file v1 -> v2");
                migrate_v1(&value, config, now)
            }
            _ => match serde_json::from_value::<EngineState>(value) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "state file failed schema check, using defaults");
                    EngineState::default_at(config, now)
                }
            },
        }
    }

    /// Write the state atomically: marshal to a sibling `*.tmp`, then
    /// rename over the target. The parent directory is created on demand.
    pub fn save_atomic(&self, state: &EngineState) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| EngineError::io("creating state directory", e))?;
            }
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| EngineError::schema(format!("serializing state: {e}")))?;

        let tmp = self.tmp_path();
        let mut file =
            fs::File::create(&tmp).map_err(|e| EngineError::io("creating temp state file", e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| EngineError::io("writing temp state file", e))?;
        file.sync_all()
            .map_err(|e| EngineError::io("syncing temp state file", e))?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .map_err(|e| EngineError::io("renaming temp state file", e))?;
        tracing::debug!(path = %self.path.display(), "state persisted");
        Ok(())
    }

    /// Try to acquire the advisory lock via exclusive create. A lock file
    /// older than the stale timeout is unlinked and acquisition retried
    /// once. Returns `None` when the lock is genuinely held elsewhere.
    pub fn try_lock(&self) -> Result<Option<LockGuard>, EngineError> {
        let lock = self.lock_path();
        if let Some(parent) = lock.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| EngineError::io("creating state directory", e))?;
            }
        }

        for attempt in 0..2 {
            match fs::OpenOptions::new().write(true).create_new(true).open(&lock) {
                Ok(mut file) => {
                    // Content is informational only
                    let _ = write!(file, "{}", std::process::id());
                    return Ok(Some(LockGuard { path: lock }));
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                    if attempt > 0 || !self.is_lock_stale(&lock) {
                        return Ok(None);
                    }
                    tracing::warn!(path = %lock.display(), "removing stale lock file");
                    let _ = fs::remove_file(&lock);
                }
                Err(err) => return Err(EngineError::io("creating lock file", err)),
            }
        }
        Ok(None)
    }

    fn is_lock_stale(&self, lock: &Path) -> bool {
        let age = fs::metadata(lock)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| mtime.elapsed().ok());
        matches!(age, Some(age) if age > self.stale_timeout)
    }
}

/// Convert a v1 string intensity to its numeric equivalent.
fn intensity_from_value(value: Option<&Value>) -> f32 {
    match value {
        Some(Value::String(s)) => match s.to_lowercase().as_str() {
            "low" => 0.3,
            "medium" => 0.6,
            "high" => 0.9,
            _ => 0.5,
        },
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.5).clamp(0.0, 1.0) as f32,
        _ => 0.5,
    }
}

fn stimulus_from_v1(value: &Value, now: DateTime<Utc>) -> Option<Stimulus> {
    let obj = value.as_object()?;
    let label = obj
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("neutral");
    let timestamp = obj
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .unwrap_or(now);
    let mut stimulus = Stimulus::new(
        label,
        intensity_from_value(obj.get("intensity")),
        obj.get("reason").and_then(Value::as_str).unwrap_or(""),
        obj.get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(1.0) as f32,
        timestamp,
    );
    if let Some(id) = obj.get("id").and_then(Value::as_str) {
        stimulus.id = id.to_string();
    }
    Some(stimulus)
}

fn buckets_from_v1(
    value: Option<&Value>,
    now: DateTime<Utc>,
) -> std::collections::BTreeMap<String, RoleBucket> {
    let mut out = std::collections::BTreeMap::new();
    let Some(obj) = value.and_then(Value::as_object) else {
        return out;
    };
    for (id, bucket) in obj {
        let latest = bucket.get("latest").and_then(|v| stimulus_from_v1(v, now));
        let history = bucket
            .get("history")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| stimulus_from_v1(v, now))
                    .collect()
            })
            .unwrap_or_default();
        out.insert(id.clone(), RoleBucket { latest, history });
    }
    out
}

/// Rebuild a v1 document as a v2 default state, carrying over the
/// per-role buckets with intensities converted from their string form.
/// Anything else in the v1 file is discarded.
pub fn migrate_v1(value: &Value, config: &EngineConfig, now: DateTime<Utc>) -> EngineState {
    let mut state = EngineState::default_at(config, now);
    if value.is_null() {
        return state;
    }
    state.users = buckets_from_v1(value.get("users"), now);
    state.agents = buckets_from_v1(value.get("agents"), now);
    debug_assert_eq!(state.version, SCHEMA_VERSION);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        "2026-01-15T12:00:00Z".parse().unwrap()
    }

    fn store(dir: &tempfile::TempDir) -> StateStore {
        StateStore::new(dir.path().join("agent/emotion-engine.json"), Duration::from_secs(10))
    }

    #[test]
    fn test_load_missing_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = store(&dir).load(&EngineConfig::default(), now());
        assert_eq!(state.version, SCHEMA_VERSION);
        assert_eq!(state.meta.total_updates, 0);
    }

    #[test]
    fn test_load_garbage_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(s.path(), "not json {{{").unwrap();
        let state = s.load(&EngineConfig::default(), now());
        assert_eq!(state.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        let mut state = EngineState::default_at(&EngineConfig::default(), now());
        state.meta.total_updates = 7;
        state.basic_emotions.happiness = 0.4;
        s.save_atomic(&state).unwrap();

        let loaded = s.load(&EngineConfig::default(), now());
        assert_eq!(loaded, state);
        // No temp file left behind
        assert!(!s.tmp_path().exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let s = StateStore::new(
            dir.path().join("deep/nested/agent/emotion-engine.json"),
            Duration::from_secs(10),
        );
        let state = EngineState::default_at(&EngineConfig::default(), now());
        s.save_atomic(&state).unwrap();
        assert!(s.path().exists());
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.save_atomic(&EngineState::default_at(&EngineConfig::default(), now()))
            .unwrap();
        let raw = fs::read_to_string(s.path()).unwrap();
        assert!(raw.contains("\n  \"version\": 2"));
    }

    #[test]
    fn test_lock_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        let guard = s.try_lock().unwrap();
        assert!(guard.is_some());
        // Second acquisition fails while the first guard is alive
        assert!(s.try_lock().unwrap().is_none());
        drop(guard);
        assert!(s.try_lock().unwrap().is_some());
    }

    #[test]
    fn test_stale_lock_reclaimed() {
        let dir = tempfile::tempdir().unwrap();
        let s = StateStore::new(
            dir.path().join("emotion-engine.json"),
            Duration::from_millis(10),
        );
        // Leave a lock file behind without a guard
        let guard = s.try_lock().unwrap().unwrap();
        std::mem::forget(guard);
        std::thread::sleep(Duration::from_millis(50));
        // Old enough to be stale: reclaimed on retry
        assert!(s.try_lock().unwrap().is_some());
    }

    #[test]
    fn test_fresh_lock_not_reclaimed() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        let guard = s.try_lock().unwrap().unwrap();
        std::mem::forget(guard);
        // mtime is fresh, so the lock holds
        assert!(s.try_lock().unwrap().is_none());
        fs::remove_file(s.lock_path()).unwrap();
    }

    #[test]
    fn test_migrate_v1_intensities() {
        let v1 = json!({
            "version": 1,
            "users": {
                "u1": {
                    "latest": { "label": "happy", "intensity": "high", "reason": "r" },
                    "history": [
                        { "label": "happy", "intensity": "high" },
                        { "label": "sad", "intensity": "medium" },
                        { "label": "bored", "intensity": "low" }
                    ]
                }
            },
            "agents": {
                "a1": { "latest": { "label": "curious", "intensity": "medium" }, "history": [] }
            }
        });
        let state = migrate_v1(&v1, &EngineConfig::default(), now());
        assert_eq!(state.version, 2);
        assert!(state.rumination.is_empty());

        let u1 = state.users.get("u1").unwrap();
        assert!((u1.latest.as_ref().unwrap().intensity - 0.9).abs() < f32::EPSILON);
        let intensities: Vec<f32> = u1.history.iter().map(|s| s.intensity).collect();
        assert_eq!(intensities, vec![0.9, 0.6, 0.3]);

        let a1 = state.agents.get("a1").unwrap();
        assert!((a1.latest.as_ref().unwrap().intensity - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_migrate_v1_null_and_unknown() {
        let state = migrate_v1(&Value::Null, &EngineConfig::default(), now());
        assert_eq!(state.version, 2);
        assert!(state.users.is_empty());

        let v1 = json!({
            "version": 1,
            "users": { "u": { "latest": { "label": "happy", "intensity": "extreme" } } }
        });
        let state = migrate_v1(&v1, &EngineConfig::default(), now());
        let latest = state.users.get("u").unwrap().latest.as_ref().unwrap();
        assert!((latest.intensity - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_v1_file_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(
            s.path(),
            json!({
                "version": 1,
                "users": { "u1": { "latest": { "label": "happy", "intensity": "low" } } }
            })
            .to_string(),
        )
        .unwrap();
        let state = s.load(&EngineConfig::default(), now());
        assert_eq!(state.version, 2);
        let latest = state.users.get("u1").unwrap().latest.as_ref().unwrap();
        assert!((latest.intensity - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_migrate_numeric_intensity_passthrough() {
        let v1 = json!({
            "version": 1,
            "users": { "u": { "latest": { "label": "happy", "intensity": 0.45 } } }
        });
        let state = migrate_v1(&v1, &EngineConfig::default(), now());
        let latest = state.users.get("u").unwrap().latest.as_ref().unwrap();
        assert!((latest.intensity - 0.45).abs() < 1e-6);
    }
}
