use thiserror::Error;

use crate::app_config::AppConfig;

const DEFAULT_LLM_MODEL: &str = "deepseek/deepseek-chat";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_DATABASE_URL: &str = "sqlite://rivalscan.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable '{0}' is not set")]
    MissingEnvVar(String),
    #[error("environment variable '{var}' is invalid: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    Ok(AppConfig {
        serpapi_key: require("SERPAPI_API_KEY")?,
        openrouter_api_key: require("OPENROUTER_API_KEY")?,
        llm_model: or_default("LLM_MODEL", DEFAULT_LLM_MODEL),
        smtp_host: or_default("SMTP_HOST", DEFAULT_SMTP_HOST),
        sender_address: require("EMAIL_SENDER_ADDRESS")?,
        sender_password: require("EMAIL_SENDER_PASSWORD")?,
        database_url: or_default("RIVALSCAN_DATABASE_URL", DEFAULT_DATABASE_URL),
        cadence_days: parse_u32("RIVALSCAN_CADENCE_DAYS", 7)?,
        search_timeout_secs: parse_u64("RIVALSCAN_SEARCH_TIMEOUT_SECS", 30)?,
        llm_timeout_secs: parse_u64("RIVALSCAN_LLM_TIMEOUT_SECS", 120)?,
        log_level: or_default("RUST_LOG", "info"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn build(env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        build_app_config(|key| env.get(key).cloned().ok_or(std::env::VarError::NotPresent))
    }

    fn minimal_env() -> HashMap<String, String> {
        env_with(&[
            ("SERPAPI_API_KEY", "serp-key"),
            ("OPENROUTER_API_KEY", "router-key"),
            ("EMAIL_SENDER_ADDRESS", "reports@example.com"),
            ("EMAIL_SENDER_PASSWORD", "hunter2"),
        ])
    }

    #[test]
    fn builds_with_defaults_from_minimal_env() {
        let config = build(&minimal_env()).expect("minimal env should be enough");

        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cadence_days, 7);
        assert_eq!(config.search_timeout_secs, 30);
        assert_eq!(config.llm_timeout_secs, 120);
    }

    #[test]
    fn missing_required_var_is_reported_by_name() {
        let mut env = minimal_env();
        env.remove("OPENROUTER_API_KEY");

        let err = build(&env).expect_err("missing key should fail");
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "OPENROUTER_API_KEY"));
    }

    #[test]
    fn invalid_cadence_is_rejected() {
        let mut env = minimal_env();
        env.insert("RIVALSCAN_CADENCE_DAYS".to_string(), "soonish".to_string());

        let err = build(&env).expect_err("non-numeric cadence should fail");
        assert!(
            matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "RIVALSCAN_CADENCE_DAYS")
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = build(&minimal_env()).expect("minimal env should be enough");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("serp-key"));
        assert!(!rendered.contains("router-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("reports@example.com"));
    }
}
