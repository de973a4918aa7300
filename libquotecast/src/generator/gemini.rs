//! Google Gemini quote generation

use async_trait::async_trait;
use gemini_rust::Gemini;
use tracing::{info, warn};

use crate::error::{GenerationError, Result};
use crate::types::Quote;

use super::{random_fallback, random_topic, tidy, truncate_at_word_boundary, QuoteSource};

/// Model served by the default client construction.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

const SYSTEM_PROMPT: &str = "You write short, original motivational quotes. \
Respond with the quote text only: no quotation marks, no hashtags, no commentary.";

/// Quote generator backed by the Gemini API.
pub struct GeminiGenerator {
    client: Gemini,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &GEMINI_MODEL)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Create a generator from an API key.
    ///
    /// Construction failure is a startup problem; once built, generation
    /// itself never fails (see [`QuoteSource`]).
    pub fn new(api_key: &str) -> Result<Self> {
        let client = Gemini::new(api_key.to_string())
            .map_err(|e| GenerationError::ClientCreation(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn model_name(&self) -> &'static str {
        GEMINI_MODEL
    }

    async fn request_quote(
        &self,
        topic: &str,
        max_length: usize,
    ) -> std::result::Result<String, GenerationError> {
        let prompt = build_prompt(topic, max_length);

        let response = self
            .client
            .generate_content()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_user_message(&prompt)
            .with_temperature(0.9)
            .with_max_output_tokens(256)
            .execute()
            .await
            .map_err(|e| GenerationError::Api(e.to_string()))?;

        let text = tidy(&response.text());
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(truncate_at_word_boundary(&text, max_length))
    }
}

#[async_trait]
impl QuoteSource for GeminiGenerator {
    async fn generate(&self, topic: Option<&str>, max_length: usize) -> Quote {
        let topic = topic.map(str::to_string).unwrap_or_else(random_topic);

        match self.request_quote(&topic, max_length).await {
            Ok(text) => {
                info!(topic = %topic, chars = text.chars().count(), "generated quote");
                Quote::generated(text, topic)
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "generation failed, substituting a fallback quote");
                Quote::fallback(random_fallback(), topic)
            }
        }
    }
}

fn build_prompt(topic: &str, max_length: usize) -> String {
    format!(
        "Generate a powerful, original motivational quote about {topic}.\n\
         Requirements:\n\
         - Maximum {max_length} characters\n\
         - Inspiring and actionable\n\
         - Original and unique\n\
         - No quotation marks\n\
         - Professional and positive tone\n\
         \n\
         Generate one quote about {topic}:"
    )
}
