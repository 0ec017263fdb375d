//! In-memory per-user conversation state.
//!
//! Two independent maps: bounded conversation history (expires after an
//! idle timeout, evaluated lazily on access) and a processed-message
//! ledger for duplicate suppression (never expires, capped per user).
//! Distinct users land on disjoint map entries, so concurrent pipelines
//! for different users are safe; the transport is expected to serialize
//! messages from the same user.

use std::collections::VecDeque;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use haven_core::config::{MAX_HISTORY_TURNS, MAX_SEEN_MESSAGES, SESSION_TIMEOUT_SECS};
use haven_core::types::{ConversationEntry, Role, UserId};

/// Snapshot of store occupancy for monitoring.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub active_conversations: usize,
    pub total_messages: usize,
}

/// Owns all per-user conversation state. Constructed once at startup and
/// injected into the pipeline; nothing else mutates it directly.
pub struct ConversationStore {
    conversations: DashMap<UserId, Vec<ConversationEntry>>,
    seen: DashMap<UserId, VecDeque<String>>,
    max_history: usize,
    max_seen: usize,
    session_timeout: Duration,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_limits(
            MAX_HISTORY_TURNS,
            MAX_SEEN_MESSAGES,
            Duration::seconds(SESSION_TIMEOUT_SECS),
        )
    }

    /// Custom caps and timeout, used by tests and by callers that tune
    /// the session window.
    pub fn with_limits(max_history: usize, max_seen: usize, session_timeout: Duration) -> Self {
        Self {
            conversations: DashMap::new(),
            seen: DashMap::new(),
            max_history,
            max_seen,
            session_timeout,
        }
    }

    /// Append a turn with the current timestamp, evicting the oldest
    /// entry once the history cap is reached.
    pub fn append(&self, user: &UserId, role: Role, content: &str) {
        let mut history = self.conversations.entry(user.clone()).or_default();
        history.push(ConversationEntry::now(role, content));
        if history.len() > self.max_history {
            history.remove(0);
        }
    }

    /// Ordered history for a user, after lazily expiring stale sessions.
    /// Unknown and expired users yield an empty sequence, never an error.
    pub fn history(&self, user: &UserId) -> Vec<ConversationEntry> {
        self.expire_stale();
        self.conversations
            .get(user)
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// True iff the user has no live history (first contact, expired
    /// session, or explicitly cleared).
    pub fn is_new_conversation(&self, user: &UserId) -> bool {
        self.history(user).is_empty()
    }

    /// Drop the conversation history for a user. The duplicate-suppression
    /// ledger has an independent lifecycle and is retained.
    pub fn clear(&self, user: &UserId) {
        self.conversations.remove(user);
        debug!(user = %user, "conversation cleared");
    }

    /// Has this message ID already been processed for this user?
    pub fn seen(&self, user: &UserId, message_id: &str) -> bool {
        self.seen
            .get(user)
            .map(|ids| ids.iter().any(|id| id == message_id))
            .unwrap_or(false)
    }

    /// Record a message ID as processed. Idempotent; oldest IDs are
    /// evicted once the per-user cap is exceeded.
    pub fn mark_seen(&self, user: &UserId, message_id: &str) {
        let mut ids = self.seen.entry(user.clone()).or_default();
        if ids.iter().any(|id| id == message_id) {
            return;
        }
        ids.push_back(message_id.to_string());
        while ids.len() > self.max_seen {
            ids.pop_front();
        }
    }

    /// Occupancy counts after an expiry sweep.
    pub fn stats(&self) -> StoreStats {
        self.expire_stale();
        let total_messages = self.conversations.iter().map(|h| h.len()).sum();
        StoreStats {
            active_conversations: self.conversations.len(),
            total_messages,
        }
    }

    /// Remove every conversation whose last entry is older than the
    /// session timeout. Called from each read path instead of a timer.
    fn expire_stale(&self) {
        let now = Utc::now();
        self.conversations.retain(|user, history| {
            let live = history
                .last()
                .map(|entry| now - entry.timestamp <= self.session_timeout)
                .unwrap_or(false);
            if !live {
                debug!(user = %user, "session expired");
            }
            live
        });
    }
}
