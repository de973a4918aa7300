//! Error types for Quotecast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuotecastError>;

#[derive(Error, Debug)]
pub enum QuotecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State file error: {0}")]
    Store(#[from] StoreError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("No unique quote published after {0} attempts")]
    AttemptsExhausted(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuotecastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuotecastError::InvalidInput(_) => 3,
            QuotecastError::Platform(e) if e.is_fatal() => 2,
            QuotecastError::Platform(_) => 1,
            QuotecastError::Config(_) => 1,
            QuotecastError::Store(_) => 1,
            QuotecastError::Generation(_) => 1,
            QuotecastError::AttemptsExhausted(_) => 1,
        }
    }

    /// Whether this error signals a configuration problem that retrying
    /// cannot fix (wrong credentials, missing write permission).
    pub fn is_fatal(&self) -> bool {
        match self {
            QuotecastError::Platform(e) => e.is_fatal(),
            QuotecastError::Config(_) => true,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required credential: {0}")]
    MissingCredential(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("Failed to create text-generation client: {0}")]
    ClientCreation(String),

    #[error("Text-generation request failed: {0}")]
    Api(String),

    #[error("Text-generation service returned an empty response")]
    EmptyResponse,
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}

impl PlatformError {
    /// Fatal kinds point at a configuration problem (revoked token, app
    /// without write access) rather than a transient condition, so callers
    /// should stop retrying the current invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlatformError::Authentication(_) | PlatformError::Forbidden(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = QuotecastError::InvalidInput("Empty content".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_authentication_error() {
        let platform_error = PlatformError::Authentication("Bad token".to_string());
        let error = QuotecastError::Platform(platform_error);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_forbidden_error() {
        let platform_error = PlatformError::Forbidden("App lacks write access".to_string());
        let error = QuotecastError::Platform(platform_error);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_retryable_platform_errors() {
        for platform_error in [
            PlatformError::Posting("no data returned".to_string()),
            PlatformError::Network("connection refused".to_string()),
            PlatformError::RateLimit("too many requests".to_string()),
            PlatformError::Validation("empty content".to_string()),
        ] {
            let error = QuotecastError::Platform(platform_error);
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingCredential("GEMINI_API_KEY".to_string());
        let error = QuotecastError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_attempts_exhausted() {
        let error = QuotecastError::AttemptsExhausted(5);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_fatal_platform_kinds() {
        assert!(PlatformError::Authentication("x".to_string()).is_fatal());
        assert!(PlatformError::Forbidden("x".to_string()).is_fatal());
        assert!(!PlatformError::RateLimit("x".to_string()).is_fatal());
        assert!(!PlatformError::Network("x".to_string()).is_fatal());
        assert!(!PlatformError::Posting("x".to_string()).is_fatal());
        assert!(!PlatformError::Validation("x".to_string()).is_fatal());
    }

    #[test]
    fn test_fatal_propagates_through_wrapper() {
        let fatal = QuotecastError::Platform(PlatformError::Forbidden("x".to_string()));
        assert!(fatal.is_fatal());

        let transient = QuotecastError::Platform(PlatformError::Network("x".to_string()));
        assert!(!transient.is_fatal());

        let config = QuotecastError::Config(ConfigError::MissingCredential("X".to_string()));
        assert!(config.is_fatal());

        assert!(!QuotecastError::AttemptsExhausted(5).is_fatal());
    }

    #[test]
    fn test_error_message_formatting_platform() {
        let error = QuotecastError::Platform(PlatformError::RateLimit(
            "HTTP 429 from POST /2/tweets".to_string(),
        ));
        assert_eq!(
            format!("{}", error),
            "Platform error: Rate limit exceeded: HTTP 429 from POST /2/tweets"
        );
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = QuotecastError::Config(ConfigError::MissingCredential(
            "TWITTER_ACCESS_TOKEN".to_string(),
        ));
        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing required credential: TWITTER_ACCESS_TOKEN"
        );
    }

    #[test]
    fn test_error_message_formatting_exhausted() {
        let error = QuotecastError::AttemptsExhausted(5);
        assert_eq!(
            format!("{}", error),
            "No unique quote published after 5 attempts"
        );
    }

    #[test]
    fn test_error_conversion_from_platform_error() {
        let platform_error = PlatformError::Posting("test".to_string());
        let error: QuotecastError = platform_error.into();
        assert!(matches!(error, QuotecastError::Platform(_)));
    }

    #[test]
    fn test_error_conversion_from_store_error() {
        let store_error = StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        ));
        let error: QuotecastError = store_error.into();
        assert!(matches!(error, QuotecastError::Store(_)));
    }

    #[test]
    fn test_platform_error_clone() {
        let original = PlatformError::Network("Connection failed".to_string());
        let cloned = original.clone();
        assert_eq!(format!("{}", original), format!("{}", cloned));
    }

    #[test]
    fn test_invalid_setting_formatting() {
        let error = ConfigError::InvalidSetting {
            name: "MAX_QUOTE_LENGTH".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Invalid value for MAX_QUOTE_LENGTH: lots"
        );
    }
}
