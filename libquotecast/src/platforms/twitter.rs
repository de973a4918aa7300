//! X (Twitter) publisher over the API v2
//!
//! Uses an OAuth 2.0 User Context access token for every call: posting,
//! identity, and the recent-history fetch backing the duplicate check.
//! Failures are classified by HTTP status into the typed platform error
//! kinds; the caller decides what is worth retrying.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PlatformError, Result};
use crate::types::{AccountInfo, PublishReceipt};

use super::{clamp_to_limit, Publisher, RECENT_HISTORY_LIMIT};

/// Hard platform ceiling for a single post.
pub const TWEET_CHAR_LIMIT: usize = 280;

const API_BASE: &str = "https://api.x.com";

/// The authenticated account's id is established by `verify_credentials`
/// and required for timeline lookups.
#[derive(Debug, Clone)]
struct AuthenticatedUser {
    id: String,
    handle: String,
}

pub struct TwitterPublisher {
    http: Client,
    access_token: String,
    api_base: String,
    user: Option<AuthenticatedUser>,
}

impl std::fmt::Debug for TwitterPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterPublisher")
            .field("api_base", &self.api_base)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
    username: String,
    name: String,
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    followers_count: u64,
    #[serde(default)]
    following_count: u64,
}

#[derive(Debug, Deserialize)]
struct TweetEnvelope {
    data: Option<TweetData>,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TimelineEnvelope {
    #[serde(default)]
    data: Vec<TweetData>,
}

impl TwitterPublisher {
    pub fn new(access_token: &str) -> Self {
        Self {
            http: Client::new(),
            access_token: access_token.to_string(),
            api_base: API_BASE.to_string(),
            user: None,
        }
    }

    fn authenticated_user(&self) -> Result<&AuthenticatedUser> {
        self.user.as_ref().ok_or_else(|| {
            PlatformError::Authentication(
                "credentials not verified; call verify_credentials first".to_string(),
            )
            .into()
        })
    }
}

fn classify_status(status: StatusCode, context: &str, body: &str) -> PlatformError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            PlatformError::RateLimit(format!("HTTP 429 from {context}"))
        }
        StatusCode::FORBIDDEN => PlatformError::Forbidden(format!(
            "HTTP 403 from {context}: {body} (the app needs Read and Write access)"
        )),
        StatusCode::UNAUTHORIZED => {
            PlatformError::Authentication(format!("HTTP 401 from {context}: {body}"))
        }
        _ => PlatformError::Posting(format!("HTTP {status} from {context}: {body}")),
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn verify_credentials(&mut self) -> Result<AccountInfo> {
        let url = format!("{}/2/users/me", self.api_base);
        debug!(%url, "fetching authenticated account");

        let response = self
            .http
            .get(&url)
            .query(&[("user.fields", "public_metrics")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, "GET /2/users/me", &body).into());
        }

        let envelope: UserEnvelope = response.json().await.map_err(|e| {
            PlatformError::Posting(format!("malformed response from GET /2/users/me: {e}"))
        })?;
        let data = envelope.data.ok_or_else(|| {
            PlatformError::Authentication("no user data returned for the supplied token".to_string())
        })?;

        self.user = Some(AuthenticatedUser {
            id: data.id.clone(),
            handle: data.username.clone(),
        });
        info!(handle = %data.username, "authenticated with X");

        let metrics = data.public_metrics.unwrap_or_default();
        Ok(AccountInfo {
            id: data.id,
            handle: data.username,
            display_name: data.name,
            followers: metrics.followers_count,
            following: metrics.following_count,
        })
    }

    async fn publish(&self, text: &str) -> Result<PublishReceipt> {
        // The platform ceiling applies regardless of what budget the caller
        // already trimmed to
        let text = clamp_to_limit(text, TWEET_CHAR_LIMIT);

        let url = format!("{}/2/tweets", self.api_base);
        debug!(chars = text.chars().count(), "posting tweet");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, "POST /2/tweets", &body).into());
        }

        let envelope: TweetEnvelope = response.json().await.map_err(|e| {
            PlatformError::Posting(format!("malformed response from POST /2/tweets: {e}"))
        })?;
        let data = envelope
            .data
            .ok_or_else(|| PlatformError::Posting("no data returned for posted tweet".to_string()))?;

        info!(id = %data.id, "tweet posted");
        Ok(PublishReceipt {
            id: data.id,
            text: data.text,
        })
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<String>> {
        let user = self.authenticated_user()?;

        // The timeline endpoint accepts max_results in 5..=100
        let count = limit.clamp(5, RECENT_HISTORY_LIMIT);
        let url = format!("{}/2/users/{}/tweets", self.api_base, user.id);
        debug!(handle = %user.handle, count, "fetching recent posts");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("max_results", count.to_string()),
                ("tweet.fields", "text".to_string()),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, "GET /2/users/:id/tweets", &body).into());
        }

        let envelope: TimelineEnvelope = response.json().await.map_err(|e| {
            PlatformError::Posting(format!(
                "malformed response from GET /2/users/:id/tweets: {e}"
            ))
        })?;

        Ok(envelope.data.into_iter().map(|t| t.text).collect())
    }

    fn name(&self) -> &str {
        "twitter"
    }

    fn character_limit(&self) -> usize {
        TWEET_CHAR_LIMIT
    }
}
