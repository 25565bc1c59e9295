use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub llm_timeout_secs: u64,
    pub smtp: SmtpConfig,
    /// When set, uploaded résumés are archived here.
    pub upload_dir: Option<PathBuf>,
    /// Extra paragraph about the candidate, appended to every generation prompt.
    pub candidate_background: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            smtp: SmtpConfig {
                host: require_env("SMTP_HOST")?,
                port: parse_env("SMTP_PORT", 587)?,
                username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
                from_address: require_env("MAIL_FROM")?,
            },
            upload_dir: optional_env("UPLOAD_DIR").map(PathBuf::from),
            candidate_background: optional_env("CANDIDATE_BACKGROUND"),
        })
    }
}

/// Where the workflow finds the outreach API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ClientConfig {
            api_url: std::env::var("OUTREACH_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            timeout_secs: parse_env("OUTREACH_TIMEOUT_SECS", 60)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u16 = parse_env("OUTREACH_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("OUTREACH_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("OUTREACH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_optional_env_is_none() {
        std::env::set_var("OUTREACH_TEST_BLANK", "  ");
        assert!(optional_env("OUTREACH_TEST_BLANK").is_none());
    }
}
