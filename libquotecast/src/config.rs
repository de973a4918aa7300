//! Configuration management for Quotecast
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! an optional TOML file, and environment variables. Credentials are read
//! from the environment only and are required — a missing credential is a
//! fatal startup error. A `.env` file in the working directory is honored.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const DEFAULT_MAX_QUOTE_LENGTH: usize = 260;
pub const DEFAULT_TOPICS: &str = "motivation,success,inspiration";
pub const DEFAULT_POST_INTERVAL_HOURS: u64 = 6;
pub const DEFAULT_STATE_FILE: &str = "posted_quotes.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    pub store: StoreConfig,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Maximum character length requested from the generator
    pub max_quote_length: usize,
    /// Topic rotation, cycled by attempt index
    pub topics: Vec<String>,
    /// Wall-clock interval between scheduled invocations
    pub post_interval_hours: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_quote_length: DEFAULT_MAX_QUOTE_LENGTH,
            topics: split_topics(DEFAULT_TOPICS),
            post_interval_hours: DEFAULT_POST_INTERVAL_HOURS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Flat file holding the JSON array of previously posted quotes
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub twitter_access_token: String,
}

/// On-disk TOML shape; every field is optional so a partial file is fine.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bot: Option<FileBotConfig>,
    store: Option<FileStoreConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileBotConfig {
    max_quote_length: Option<usize>,
    topics: Option<Vec<String>>,
    post_interval_hours: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileStoreConfig {
    path: Option<String>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Reads `.env` best-effort, then the TOML file at `$QUOTECAST_CONFIG`
    /// or `<config dir>/quotecast/config.toml` if one exists, then applies
    /// environment overrides and required credentials.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let file = match resolve_config_path() {
            Some(path) if path.exists() => read_file_config(&path)?,
            _ => FileConfig::default(),
        };

        Self::from_sources(file)
    }

    /// Load configuration from a specific TOML file, which must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = read_file_config(path)?;
        Self::from_sources(file)
    }

    fn from_sources(file: FileConfig) -> Result<Self> {
        let file_bot = file.bot.unwrap_or_default();
        let file_store = file.store.unwrap_or_default();
        let defaults = BotConfig::default();

        let max_quote_length = match env::var("MAX_QUOTE_LENGTH") {
            Ok(value) => parse_setting("MAX_QUOTE_LENGTH", &value)?,
            Err(_) => file_bot
                .max_quote_length
                .unwrap_or(defaults.max_quote_length),
        };

        let topics = match env::var("QUOTE_TOPICS") {
            Ok(value) => {
                let topics = split_topics(&value);
                if topics.is_empty() {
                    return Err(ConfigError::InvalidSetting {
                        name: "QUOTE_TOPICS".to_string(),
                        value,
                    }
                    .into());
                }
                topics
            }
            Err(_) => match file_bot.topics {
                Some(topics) if !topics.is_empty() => topics,
                _ => defaults.topics,
            },
        };

        let post_interval_hours = match env::var("POST_INTERVAL_HOURS") {
            Ok(value) => parse_setting("POST_INTERVAL_HOURS", &value)?,
            Err(_) => file_bot
                .post_interval_hours
                .unwrap_or(defaults.post_interval_hours),
        };

        let store_path = match env::var("QUOTECAST_STATE_FILE") {
            Ok(value) => PathBuf::from(shellexpand::tilde(&value).to_string()),
            Err(_) => file_store
                .path
                .map(|p| PathBuf::from(shellexpand::tilde(&p).to_string()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
        };

        Ok(Self {
            bot: BotConfig {
                max_quote_length,
                topics,
                post_interval_hours,
            },
            store: StoreConfig { path: store_path },
            credentials: Credentials {
                gemini_api_key: required_credential("GEMINI_API_KEY")?,
                twitter_access_token: required_credential("TWITTER_ACCESS_TOKEN")?,
            },
        })
    }
}

/// Resolve the configuration file path following the XDG Base Directory spec
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("QUOTECAST_CONFIG") {
        return Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    dirs::config_dir().map(|dir| dir.join("quotecast").join("config.toml"))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    let config: FileConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;
    Ok(config)
}

fn required_credential(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name.to_string()).into()),
    }
}

fn parse_setting<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

fn split_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
