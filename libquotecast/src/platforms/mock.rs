//! Mock publisher implementation for testing
//!
//! Provides a configurable publisher that can simulate successful posts,
//! typed failures, and scripted recent history, without credentials or
//! network access. Used by the coordinator tests and the integration suite
//! to verify loop behavior.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::error::{PlatformError, Result};
use crate::platforms::{clamp_to_limit, Publisher};
use crate::types::{AccountInfo, PublishReceipt};

/// Configuration for mock publisher behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Publisher name (e.g. "mock-twitter")
    pub name: String,

    /// Whether credential verification should succeed
    pub verify_succeeds: bool,

    /// Error to return from publish; `None` means publishing succeeds
    pub publish_error: Option<PlatformError>,

    /// Scripted recent history served to the duplicate check
    pub recent: Vec<String>,

    /// Error to return from the recent-history fetch
    pub recent_error: Option<PlatformError>,

    /// Hard character ceiling enforced on publish
    pub character_limit: usize,

    /// Number of times publish has been called
    pub publish_call_count: Arc<Mutex<usize>>,

    /// Number of times recent_posts has been called
    pub recent_call_count: Arc<Mutex<usize>>,

    /// Texts that have been published (for verification)
    pub published: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            verify_succeeds: true,
            publish_error: None,
            recent: Vec::new(),
            recent_error: None,
            character_limit: 280,
            publish_call_count: Arc::new(Mutex::new(0)),
            recent_call_count: Arc::new(Mutex::new(0)),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock publisher for testing
pub struct MockPublisher {
    config: MockConfig,
}

impl MockPublisher {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A publisher where everything succeeds and history is empty
    pub fn success(name: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// A publisher whose publish always fails with the given kind
    pub fn publish_failure(name: &str, error: PlatformError) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            publish_error: Some(error),
            ..Default::default()
        })
    }

    /// A publisher serving the given recent history
    pub fn with_recent(name: &str, recent: Vec<String>) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            recent,
            ..Default::default()
        })
    }

    /// A publisher whose recent-history fetch always fails
    pub fn recent_failure(name: &str, error: PlatformError) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            recent_error: Some(error),
            ..Default::default()
        })
    }

    /// Get the number of times publish was called
    pub fn publish_call_count(&self) -> usize {
        *self.config.publish_call_count.lock().unwrap()
    }

    /// Get the number of times recent_posts was called
    pub fn recent_call_count(&self) -> usize {
        *self.config.recent_call_count.lock().unwrap()
    }

    /// Get all texts that were published
    pub fn published(&self) -> Vec<String> {
        self.config.published.lock().unwrap().clone()
    }

    /// Share the counters and captured posts before handing the publisher off
    pub fn config(&self) -> MockConfig {
        self.config.clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn verify_credentials(&mut self) -> Result<AccountInfo> {
        if self.config.verify_succeeds {
            Ok(AccountInfo {
                id: "0".to_string(),
                handle: self.config.name.clone(),
                display_name: self.config.name.clone(),
                followers: 0,
                following: 0,
            })
        } else {
            Err(PlatformError::Authentication("Mock verification failed".to_string()).into())
        }
    }

    async fn publish(&self, text: &str) -> Result<PublishReceipt> {
        *self.config.publish_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.publish_error {
            return Err(error.clone().into());
        }

        let text = clamp_to_limit(text, self.config.character_limit);
        self.config.published.lock().unwrap().push(text.clone());

        Ok(PublishReceipt {
            id: format!("{}:mock-{}", self.config.name, Uuid::new_v4()),
            text,
        })
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<String>> {
        *self.config.recent_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.recent_error {
            return Err(error.clone().into());
        }

        Ok(self.config.recent.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn character_limit(&self) -> usize {
        self.config.character_limit
    }
}
