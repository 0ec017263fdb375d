//! Crisis-risk language detection.
//!
//! Pure substring matching over the lower-cased message. The keyword and
//! phrase lists are data, not algorithm: the detector owns its lists so
//! deployments can swap wording without touching the severity rules.

use serde::Serialize;
use tracing::warn;

use haven_core::config::CRISIS_PREVIEW_CHARS;
use haven_core::types::UserId;

/// Built-in keyword list. Any substring hit marks the message as a crisis.
const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "better off dead",
    "no reason to live",
    "self harm",
    "hurt myself",
    "cut myself",
    "overdose",
];

/// Phrases that short-circuit straight to `Severity::High` regardless of
/// how many keywords matched.
const HIGH_SEVERITY_PHRASES: &[&str] = &[
    "kill myself",
    "end my life",
    "want to die",
    "suicide plan",
    "going to kill",
    "better off dead",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Result of classifying one message. Recomputed per message, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisVerdict {
    pub is_crisis: bool,
    pub severity: Severity,
    pub matched_terms: Vec<String>,
}

/// Keyword/phrase matcher with a severity escalation rule.
pub struct CrisisDetector {
    keywords: Vec<String>,
    high_phrases: Vec<String>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self {
            keywords: CRISIS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            high_phrases: HIGH_SEVERITY_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CrisisDetector {
    /// Custom lists for deployments that tune the vocabulary.
    pub fn with_lists(keywords: Vec<String>, high_phrases: Vec<String>) -> Self {
        Self {
            keywords,
            high_phrases,
        }
    }

    /// Classify one message.
    ///
    /// Severity, evaluated only when at least one keyword matched:
    /// - `High` on any high-severity phrase or 3+ matched keywords
    /// - `Medium` on exactly 2 matched keywords
    /// - `Low` otherwise
    pub fn detect(&self, text: &str) -> CrisisVerdict {
        let lower = text.to_lowercase();

        let matched_terms: Vec<String> = self
            .keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()))
            .cloned()
            .collect();

        if matched_terms.is_empty() {
            return CrisisVerdict {
                is_crisis: false,
                severity: Severity::Low,
                matched_terms,
            };
        }

        let has_high_phrase = self.high_phrases.iter().any(|p| lower.contains(p.as_str()));

        let severity = if has_high_phrase || matched_terms.len() >= 3 {
            Severity::High
        } else if matched_terms.len() >= 2 {
            Severity::Medium
        } else {
            Severity::Low
        };

        CrisisVerdict {
            is_crisis: true,
            severity,
            matched_terms,
        }
    }
}

/// Emit a structured warning record for a detected crisis.
///
/// Fire-and-forget observability hook: the pipeline calls this once per
/// detection; nothing is stored here.
pub fn log_detection(user: &UserId, message: &str, verdict: &CrisisVerdict) {
    let preview: String = message.chars().take(CRISIS_PREVIEW_CHARS).collect();
    warn!(
        user = %user,
        severity = %verdict.severity,
        matched = ?verdict.matched_terms,
        preview = %preview,
        "crisis language detected"
    );
}
