//! Quotecast - AI-generated quotes, posted on a schedule
//!
//! This library provides the core functionality for generating short
//! inspirational quotes with a text-generation service and publishing them
//! to a social platform without repeating itself: a local exact-match
//! history backed by a flat file, a fuzzy similarity check against the
//! platform's recent posts, and a bounded retry loop coordinating the two.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod generator;
pub mod logging;
pub mod platforms;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{build_coordinator, Coordinator, ATTEMPT_DELAY, MAX_ATTEMPTS};
pub use error::{QuotecastError, Result};
pub use store::PostedStore;
pub use types::{AccountInfo, PublishReceipt, Quote, QuoteOrigin};
