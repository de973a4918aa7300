//! Publishing abstraction and implementations
//!
//! This module provides a unified trait for making text publicly visible on
//! a social platform, plus the duplicate-likelihood check against the
//! platform's own recent history. The similarity metric is a one-directional
//! bag-of-words overlap ratio: asymmetric by design, with the candidate's
//! word count as the denominator. Do not symmetrize it.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::Result;
use crate::types::{AccountInfo, PublishReceipt};

pub mod twitter;

// Mock publisher is available for all builds (not just tests) to support
// integration tests
pub mod mock;

pub use twitter::TwitterPublisher;

/// How many recent posts to fetch for the similarity check.
pub const RECENT_HISTORY_LIMIT: usize = 10;

/// Word-overlap ratio above which a candidate counts as a duplicate.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Publisher trait for making text publicly visible on a platform
///
/// Implementations handle authentication, posting, and the read-only history
/// fetch backing the duplicate-likelihood check. Failures are classified
/// into the typed kinds of [`PlatformError`] so callers can tell transient
/// conditions from configuration problems.
///
/// [`PlatformError`]: crate::error::PlatformError
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Authenticate and fetch the account's identity.
    ///
    /// Must be called before posting; implementations may need the account
    /// id it establishes for history lookups.
    async fn verify_credentials(&mut self) -> Result<AccountInfo>;

    /// Attempt to make `text` publicly visible.
    ///
    /// Text over the platform ceiling is truncated before submission,
    /// unconditionally — even if the caller already honored a smaller
    /// budget of its own.
    async fn publish(&self, text: &str) -> Result<PublishReceipt>;

    /// Fetch up to `limit` recent posts from the authenticated account,
    /// most recent first. Bounded at [`RECENT_HISTORY_LIMIT`].
    async fn recent_posts(&self, limit: usize) -> Result<Vec<String>>;

    /// Heuristic duplicate check against the platform's recent history.
    ///
    /// Flags the candidate when its containment similarity with any recent
    /// post exceeds [`SIMILARITY_THRESHOLD`].
    async fn is_likely_duplicate(&self, text: &str) -> Result<bool> {
        let recent = self.recent_posts(RECENT_HISTORY_LIMIT).await?;
        Ok(recent
            .iter()
            .any(|post| containment_similarity(text, post) > SIMILARITY_THRESHOLD))
    }

    /// Lowercase platform identifier (e.g. "twitter")
    fn name(&self) -> &str;

    /// Hard platform ceiling in characters
    fn character_limit(&self) -> usize;
}

/// Share of the candidate's words that also appear in the history item.
///
/// Case-insensitive, whitespace-tokenized, no stemming. One-directional:
/// `containment_similarity(a, b)` and `containment_similarity(b, a)` differ
/// whenever the word counts do.
pub fn containment_similarity(candidate: &str, history_item: &str) -> f64 {
    let candidate_lower = candidate.to_lowercase();
    let candidate_words: HashSet<&str> = candidate_lower.split_whitespace().collect();
    if candidate_words.is_empty() {
        return 0.0;
    }

    let history_lower = history_item.to_lowercase();
    let history_words: HashSet<&str> = history_lower.split_whitespace().collect();

    let shared = candidate_words.intersection(&history_words).count();
    shared as f64 / candidate_words.len() as f64
}

/// Enforce a hard character ceiling: text over `limit` becomes the first
/// `limit - 3` characters plus an ellipsis marker.
pub fn clamp_to_limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let head: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{head}...")
}
