//! Core types for Quotecast

use serde::{Deserialize, Serialize};

/// Where a candidate quote came from.
///
/// `Fallback` marks a quote substituted from the built-in list after the
/// generation service failed, so callers can observe that the generation
/// step degraded without it ever returning an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuoteOrigin {
    Generated,
    Fallback,
}

impl std::fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A candidate quote, not yet confirmed published.
///
/// Discarded once published or rejected; only confirmed-published text ever
/// reaches the posted-quote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub topic: String,
    pub origin: QuoteOrigin,
}

impl Quote {
    pub fn generated(text: String, topic: String) -> Self {
        Self {
            text,
            topic,
            origin: QuoteOrigin::Generated,
        }
    }

    pub fn fallback(text: String, topic: String) -> Self {
        Self {
            text,
            topic,
            origin: QuoteOrigin::Fallback,
        }
    }

    /// Length in characters, the unit every platform limit is stated in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Result descriptor for a confirmed publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Platform-assigned post identifier
    pub id: String,
    /// The text as actually posted (after any platform-ceiling truncation)
    pub text: String,
}

/// Identity of the authenticated account, fetched read-only at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub followers: u64,
    pub following: u64,
}
