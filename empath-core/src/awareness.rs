//! Cross-agent awareness — peek at sibling agents' state files to expose
//! what each of them last felt.
//!
//! Relies on the directory convention `<root>/<id>/agent/emotion-engine.json`.
//! Everything here is read-only and failure-tolerant: an unreadable or
//! malformed sibling file is skipped, never an error.

use std::path::Path;

use serde::Serialize;

use crate::state::{EngineState, Stimulus};

/// File name of the per-agent state document under `<id>/agent/`.
pub const STATE_FILE_NAME: &str = "emotion-engine.json";

/// One sibling agent's most recent stimulus.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerState {
    pub id: String,
    pub latest: Option<Stimulus>,
}

/// Scan `agents_root` for sibling agents and read each one's latest
/// stimulus. `current_id` is skipped; at most `limit` peers are returned.
pub fn peek_siblings(agents_root: &Path, current_id: &str, limit: usize) -> Vec<PeerState> {
    let entries = match std::fs::read_dir(agents_root) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(root = %agents_root.display(), %err, "agents root unreadable");
            return Vec::new();
        }
    };

    let mut peers = Vec::new();
    let mut ids: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|id| id != current_id)
        .collect();
    ids.sort_unstable();

    for id in ids {
        if peers.len() >= limit {
            break;
        }
        let path = agents_root.join(&id).join("agent").join(STATE_FILE_NAME);
        let Ok(raw) = std::fs::read_to_string(&path) else {
            continue;
        };
        let Ok(state) = serde_json::from_str::<EngineState>(&raw) else {
            tracing::debug!(path = %path.display(), "skipping malformed sibling state");
            continue;
        };
        peers.push(PeerState {
            latest: latest_agent_stimulus(&state, &id),
            id,
        });
    }
    peers
}

/// The sibling's own agent-bucket latest, falling back to the first agent
/// bucket when the id-keyed one is absent.
fn latest_agent_stimulus(state: &EngineState, id: &str) -> Option<Stimulus> {
    if let Some(bucket) = state.agents.get(id) {
        return bucket.latest.clone();
    }
    state
        .agents
        .values()
        .next()
        .and_then(|bucket| bucket.latest.clone())
}
