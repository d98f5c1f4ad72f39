use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// The single (query, report) pair a session holds. Replaced wholesale on
/// each successful pipeline run; a failed run leaves it untouched.
#[derive(Debug, Clone)]
pub struct CompletedResearch {
    pub query: String,
    pub report: String,
    pub completed_at: DateTime<Utc>,
}

/// In-process session state, one entry per session id. Nothing persists
/// across restarts. Reads hand out clones, so exports never observe a
/// half-written entry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, CompletedResearch>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, session_id: &str, research: CompletedResearch) {
        self.sessions.insert(session_id.to_string(), research);
    }

    pub fn get(&self, session_id: &str) -> Option<CompletedResearch> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }
}
