//! The generate-and-post loop
//!
//! Coordinates one invocation: pick a topic from the rotation, generate a
//! candidate, reject duplicates (exact local match first, then the
//! publisher's fuzzy check against recent history), publish, persist. Up to
//! [`MAX_ATTEMPTS`] attempts per invocation with a fixed delay between them.
//!
//! Failure policy: publish failures whose kind marks a configuration
//! problem (forbidden, authentication) abort the invocation immediately;
//! every other kind just consumes the attempt. A failing remote duplicate
//! check never blocks posting. A failing history write never fails a
//! publish that already happened.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{QuotecastError, Result};
use crate::generator::{GeminiGenerator, QuoteSource};
use crate::platforms::{Publisher, TwitterPublisher};
use crate::store::PostedStore;
use crate::types::{AccountInfo, PublishReceipt};

/// Attempts per invocation.
pub const MAX_ATTEMPTS: usize = 5;

/// Fixed inter-attempt delay, throttling the loop for the external services.
pub const ATTEMPT_DELAY: Duration = Duration::from_secs(2);

pub struct Coordinator {
    generator: Box<dyn QuoteSource>,
    publisher: Box<dyn Publisher>,
    store: PostedStore,
    topics: Vec<String>,
    max_quote_length: usize,
    attempt_delay: Duration,
}

impl Coordinator {
    pub fn new(
        generator: Box<dyn QuoteSource>,
        publisher: Box<dyn Publisher>,
        store: PostedStore,
        topics: Vec<String>,
        max_quote_length: usize,
    ) -> Self {
        Self {
            generator,
            publisher,
            store,
            topics,
            max_quote_length,
            attempt_delay: ATTEMPT_DELAY,
        }
    }

    /// Override the fixed inter-attempt delay. Intended for tests.
    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }

    pub fn store(&self) -> &PostedStore {
        &self.store
    }

    /// Run one invocation: publish one fresh quote or report why not.
    ///
    /// Returns the receipt on success, [`QuotecastError::AttemptsExhausted`]
    /// when every attempt produced a duplicate or a retryable failure, or
    /// the underlying error when a fatal kind makes retrying pointless.
    pub async fn run_once(&mut self) -> Result<PublishReceipt> {
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                sleep(self.attempt_delay).await;
            }

            // Deterministic rotation; randomness lives inside the generator
            // only when no topic list is configured at all
            let topic = if self.topics.is_empty() {
                None
            } else {
                Some(self.topics[attempt % self.topics.len()].as_str())
            };

            let quote = self
                .generator
                .generate(topic, self.max_quote_length)
                .await;
            info!(
                attempt = attempt + 1,
                topic = %quote.topic,
                origin = %quote.origin,
                "candidate: {}",
                quote.text
            );

            if self.store.contains(&quote.text) {
                info!(attempt = attempt + 1, "candidate already posted, trying another");
                continue;
            }

            match self.publisher.is_likely_duplicate(&quote.text).await {
                Ok(true) => {
                    info!(
                        attempt = attempt + 1,
                        "candidate too similar to a recent post, trying another"
                    );
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "recent-history duplicate check failed, continuing without it");
                }
            }

            match self.publisher.publish(&quote.text).await {
                Ok(receipt) => {
                    info!(id = %receipt.id, "published quote");
                    if let Err(e) = self.store.record(&receipt.text) {
                        warn!(
                            error = %e,
                            path = %self.store.path().display(),
                            "failed to persist posted-quote history"
                        );
                    }
                    return Ok(receipt);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(attempt = attempt + 1, error = %e, "publish failed");
                }
            }
        }

        Err(QuotecastError::AttemptsExhausted(MAX_ATTEMPTS))
    }
}

/// Wire a coordinator from configuration: Gemini generator, Twitter
/// publisher (credentials verified), and the posted-quote store.
pub async fn build_coordinator(config: &Config) -> Result<(Coordinator, AccountInfo)> {
    let generator = GeminiGenerator::new(&config.credentials.gemini_api_key)?;
    info!(model = generator.model_name(), "text generator ready");

    let mut publisher = TwitterPublisher::new(&config.credentials.twitter_access_token);
    let account = publisher.verify_credentials().await?;

    let store = PostedStore::load(&config.store.path)?;
    info!(
        entries = store.len(),
        path = %config.store.path.display(),
        "posted-quote history loaded"
    );

    let coordinator = Coordinator::new(
        Box::new(generator),
        Box::new(publisher),
        store,
        config.bot.topics.clone(),
        config.bot.max_quote_length,
    );

    Ok((coordinator, account))
}
