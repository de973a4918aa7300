//! End-to-end workflow tests for the generate-and-post loop
//!
//! These tests drive the coordinator with a stub generator and the mock
//! publisher against a real state file, verifying the loop's externally
//! observable contract: what gets published, what gets persisted, and how
//! many attempts are spent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use libquotecast::coordinator::Coordinator;
use libquotecast::error::{PlatformError, QuotecastError};
use libquotecast::generator::QuoteSource;
use libquotecast::platforms::mock::MockPublisher;
use libquotecast::store::PostedStore;
use libquotecast::types::Quote;

/// Generator stub that always returns the same text and counts calls
struct FixedSource {
    text: String,
    calls: Arc<AtomicUsize>,
}

impl FixedSource {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl QuoteSource for FixedSource {
    async fn generate(&self, topic: Option<&str>, _max_length: usize) -> Quote {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Quote::generated(self.text.clone(), topic.unwrap_or("any").to_string())
    }
}

fn topics() -> Vec<String> {
    vec![
        "motivation".to_string(),
        "success".to_string(),
        "inspiration".to_string(),
    ]
}

#[tokio::test]
async fn test_first_invocation_publishes_once_and_persists() -> Result<()> {
    let dir = TempDir::new()?;
    let state_path = dir.path().join("posted_quotes.json");

    let generator = FixedSource::new("X");
    let publisher = MockPublisher::success("mock");
    let mock_state = publisher.config();

    let store = PostedStore::load(&state_path)?;
    let mut coordinator = Coordinator::new(
        Box::new(generator),
        Box::new(publisher),
        store,
        topics(),
        260,
    )
    .with_attempt_delay(Duration::ZERO);

    let receipt = coordinator.run_once().await?;
    assert_eq!(receipt.text, "X");

    // Exactly one publish call
    assert_eq!(*mock_state.publish_call_count.lock().unwrap(), 1);
    assert_eq!(*mock_state.published.lock().unwrap(), vec!["X"]);

    // Exactly one persisted entry
    let persisted: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&state_path)?)?;
    assert_eq!(persisted, vec!["X"]);

    Ok(())
}

#[tokio::test]
async fn test_second_invocation_rejects_duplicate_and_exhausts() -> Result<()> {
    let dir = TempDir::new()?;
    let state_path = dir.path().join("posted_quotes.json");

    // First invocation publishes "X"
    {
        let store = PostedStore::load(&state_path)?;
        let mut coordinator = Coordinator::new(
            Box::new(FixedSource::new("X")),
            Box::new(MockPublisher::success("mock")),
            store,
            topics(),
            260,
        )
        .with_attempt_delay(Duration::ZERO);
        coordinator.run_once().await?;
    }

    // Second invocation with identical stubs: the generator never varies,
    // so every attempt hits the local duplicate and the budget runs out
    let generator = FixedSource::new("X");
    let generated = generator.counter();
    let publisher = MockPublisher::success("mock");
    let mock_state = publisher.config();

    let store = PostedStore::load(&state_path)?;
    let mut coordinator = Coordinator::new(
        Box::new(generator),
        Box::new(publisher),
        store,
        topics(),
        260,
    )
    .with_attempt_delay(Duration::ZERO);

    let result = coordinator.run_once().await;
    assert!(matches!(result, Err(QuotecastError::AttemptsExhausted(5))));
    assert_eq!(generated.load(Ordering::SeqCst), 5);
    assert_eq!(*mock_state.publish_call_count.lock().unwrap(), 0);

    // The state file still holds exactly the one entry
    let persisted: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&state_path)?)?;
    assert_eq!(persisted, vec!["X"]);

    Ok(())
}

#[tokio::test]
async fn test_always_failing_publisher_spends_exactly_five_attempts() -> Result<()> {
    let dir = TempDir::new()?;

    let generator = FixedSource::new("Unpublishable");
    let generated = generator.counter();
    let publisher = MockPublisher::publish_failure(
        "mock",
        PlatformError::Posting("no data returned".to_string()),
    );
    let mock_state = publisher.config();

    let store = PostedStore::load(dir.path().join("posted_quotes.json"))?;
    let mut coordinator = Coordinator::new(
        Box::new(generator),
        Box::new(publisher),
        store,
        topics(),
        260,
    )
    .with_attempt_delay(Duration::ZERO);

    let result = coordinator.run_once().await;
    assert!(matches!(result, Err(QuotecastError::AttemptsExhausted(5))));

    // Exactly five generation attempts, no more
    assert_eq!(generated.load(Ordering::SeqCst), 5);
    assert_eq!(*mock_state.publish_call_count.lock().unwrap(), 5);

    // Nothing reached the store: only confirmed successes are recorded
    assert!(coordinator.store().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_remote_similarity_counts_against_the_budget() -> Result<()> {
    let dir = TempDir::new()?;

    let generator = FixedSource::new("the quick brown fox");
    let generated = generator.counter();
    let publisher = MockPublisher::with_recent("mock", vec!["the quick brown dog".to_string()]);
    let mock_state = publisher.config();

    let store = PostedStore::load(dir.path().join("posted_quotes.json"))?;
    let mut coordinator = Coordinator::new(
        Box::new(generator),
        Box::new(publisher),
        store,
        topics(),
        260,
    )
    .with_attempt_delay(Duration::ZERO);

    let result = coordinator.run_once().await;
    assert!(matches!(result, Err(QuotecastError::AttemptsExhausted(5))));
    assert_eq!(generated.load(Ordering::SeqCst), 5);
    assert_eq!(*mock_state.publish_call_count.lock().unwrap(), 0);

    Ok(())
}
