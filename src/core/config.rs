//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation

use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, loaded once at startup from environment variables
/// (a `.env` file is honored via dotenvy in the binary).
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the external AI provider
    pub ai_api_key: String,
    /// Optional OpenAI-compatible base URL override (e.g. the Gemini
    /// compatibility endpoint). None uses the provider default.
    pub ai_base_url: Option<String>,
    /// Model identifier passed to the provider
    pub ai_model: String,
    /// Path to the sqlite session database. None keeps sessions in memory.
    pub database_path: Option<String>,
    /// Cap on how many recent messages feed the prompt context.
    /// None sends the full history.
    pub history_limit: Option<usize>,
    /// Default log level filter for env_logger
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let ai_api_key = env::var("AI_API_KEY").context("AI_API_KEY must be set")?;

        let history_limit = match env::var("HISTORY_LIMIT") {
            Ok(raw) => Some(
                raw.parse::<usize>()
                    .with_context(|| format!("HISTORY_LIMIT is not a number: '{raw}'"))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            ai_api_key,
            ai_base_url: env::var("AI_BASE_URL").ok(),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            database_path: env::var("DATABASE_PATH").ok(),
            history_limit,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them in one test to avoid
    // interference under the parallel test runner.
    #[test]
    fn test_from_env_defaults_and_overrides() {
        env::set_var("AI_API_KEY", "test-key");
        env::remove_var("AI_BASE_URL");
        env::remove_var("AI_MODEL");
        env::remove_var("DATABASE_PATH");
        env::remove_var("HISTORY_LIMIT");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.ai_api_key, "test-key");
        assert_eq!(config.ai_model, "gemini-2.5-flash");
        assert!(config.ai_base_url.is_none());
        assert!(config.database_path.is_none());
        assert!(config.history_limit.is_none());
        assert_eq!(config.log_level, "info");

        env::set_var("AI_MODEL", "gpt-4o");
        env::set_var("HISTORY_LIMIT", "10");
        let config = Config::from_env().expect("config should load");
        assert_eq!(config.ai_model, "gpt-4o");
        assert_eq!(config.history_limit, Some(10));

        env::set_var("HISTORY_LIMIT", "ten");
        assert!(Config::from_env().is_err());

        env::remove_var("AI_API_KEY");
        env::remove_var("AI_MODEL");
        env::remove_var("HISTORY_LIMIT");
        assert!(Config::from_env().is_err());
    }
}
