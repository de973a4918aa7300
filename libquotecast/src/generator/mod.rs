//! Quote generation
//!
//! This module provides a unified trait for producing candidate quotes and
//! the Gemini-backed implementation. Generation deliberately never fails:
//! any error from the text-generation service is replaced by a pick from a
//! fixed fallback list, marked with [`QuoteOrigin::Fallback`] so callers can
//! still see that the service degraded.
//!
//! [`QuoteOrigin::Fallback`]: crate::types::QuoteOrigin

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::types::Quote;

pub mod gemini;

pub use gemini::GeminiGenerator;

/// Topic labels used when the caller does not supply one.
pub const GENERATOR_TOPICS: &[&str] = &[
    "motivation",
    "success",
    "productivity",
    "mindset",
    "inspiration",
    "perseverance",
    "growth",
    "achievement",
    "leadership",
    "creativity",
    "wisdom",
    "courage",
];

/// Pre-written quotes substituted when the generation service fails.
pub const FALLBACK_QUOTES: &[&str] = &[
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "The only way to do great work is to love what you do.",
    "Don't watch the clock; do what it does. Keep going.",
    "The future belongs to those who believe in the beauty of their dreams.",
];

/// Source of candidate quotes
///
/// Implementations must not fail: the contract is "always return something
/// postable", with degradation visible only through the quote's origin.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Produce a candidate quote of at most `max_length` characters.
    ///
    /// When `topic` is `None` the implementation picks one itself.
    async fn generate(&self, topic: Option<&str>, max_length: usize) -> Quote;
}

/// Pick a topic at random from the fixed label set.
pub fn random_topic() -> String {
    let mut rng = rand::thread_rng();
    GENERATOR_TOPICS
        .choose(&mut rng)
        .copied()
        .unwrap_or(GENERATOR_TOPICS[0])
        .to_string()
}

/// Pick a fallback quote at random from the fixed list.
pub fn random_fallback() -> String {
    let mut rng = rand::thread_rng();
    FALLBACK_QUOTES
        .choose(&mut rng)
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0])
        .to_string()
}

/// Clean up raw generated text: trim, drop double quotes (straight and
/// curly), normalize curly apostrophes.
pub fn tidy(text: &str) -> String {
    text.trim()
        .replace(['"', '\u{201C}', '\u{201D}'], "")
        .replace('\u{2019}', "'")
}

/// Truncate `text` to at most `max_length` characters, cutting only at a
/// word boundary that fits within `max_length - 3` characters and appending
/// an ellipsis marker. Text already within the limit is returned unchanged.
pub fn truncate_at_word_boundary(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let budget = max_length.saturating_sub(3);
    let mut truncated = String::new();
    let mut kept_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let candidate = if truncated.is_empty() {
            word_chars
        } else {
            kept_chars + 1 + word_chars
        };
        if candidate > budget {
            break;
        }
        if !truncated.is_empty() {
            truncated.push(' ');
        }
        truncated.push_str(word);
        kept_chars = candidate;
    }

    truncated.push_str("...");
    truncated
}
