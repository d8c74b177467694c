use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Instructional videos describing the B-STAR framework the statement follows.
pub const DEFAULT_REFERENCE_URLS: [&str; 2] = [
    "https://www.youtube.com/watch?v=Brx7McZdMaQ",
    "https://www.youtube.com/watch?v=niRB1LcCBlk",
];

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub statement: StatementSettings,
    pub max_upload_bytes: usize,
    /// Browser origins allowed to call the API. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Everything the generation client needs to reach the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub url_context: bool,
    pub timeout: Duration,
}

/// Form shape and output policy for the statement endpoint.
///
/// Field names are fixed here at startup rather than guessed per request.
#[derive(Debug, Clone)]
pub struct StatementSettings {
    pub job_field: String,
    pub reference_field: String,
    pub cv_field: String,
    pub default_references: Vec<String>,
    pub sanitize_output: bool,
    pub timeout: Duration,
}

impl Default for StatementSettings {
    fn default() -> Self {
        Self {
            job_field: "jobUrl".to_string(),
            reference_field: "referenceUrls".to_string(),
            cv_field: "cv".to_string(),
            default_references: DEFAULT_REFERENCE_URLS.iter().map(|s| s.to_string()).collect(),
            sanitize_output: true,
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = StatementSettings::default();
        let timeout = Duration::from_secs(parse_env("STATEMENT_TIMEOUT_SECS", 60u64)?);

        let default_references = match std::env::var("STATEMENT_REFERENCE_URLS") {
            Ok(raw) => split_locators(&raw),
            Err(_) => defaults.default_references,
        };

        Ok(Config {
            gemini: GeminiSettings {
                api_key: require_env("GEMINI_API_KEY")?,
                api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                url_context: parse_env("GEMINI_URL_CONTEXT", true)?,
                timeout,
            },
            statement: StatementSettings {
                job_field: env_or("STATEMENT_JOB_FIELD", &defaults.job_field),
                reference_field: env_or("STATEMENT_REFERENCE_FIELD", &defaults.reference_field),
                cv_field: env_or("STATEMENT_CV_FIELD", &defaults.cv_field),
                default_references,
                sanitize_output: parse_env("SANITIZE_OUTPUT", true)?,
                timeout,
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024usize)?,
            cors_origins: split_locators(&env_or("CORS_ALLOWED_ORIGINS", "")),
            port: parse_env("PORT", 8080u16)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Splits a list of locators separated by commas or newlines, dropping blanks.
pub fn split_locators(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_locators_handles_commas_and_newlines() {
        let parsed = split_locators("https://a.example, https://b.example\n\nhttps://c.example,");
        assert_eq!(
            parsed,
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_split_locators_blank_input_is_empty() {
        assert!(split_locators("  ,\n ").is_empty());
    }

    #[test]
    fn test_statement_defaults_use_reference_videos() {
        let settings = StatementSettings::default();
        assert_eq!(settings.job_field, "jobUrl");
        assert_eq!(settings.cv_field, "cv");
        assert_eq!(settings.default_references.len(), 2);
        assert_eq!(settings.default_references[0], DEFAULT_REFERENCE_URLS[0]);
        assert!(settings.sanitize_output);
    }
}
