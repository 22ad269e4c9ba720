/// Application configuration for a rivalscan process.
///
/// Built from environment variables by [`crate::config::load_app_config`].
/// Secrets are redacted from the `Debug` output.
#[derive(Clone)]
pub struct AppConfig {
    pub serpapi_key: String,
    pub openrouter_api_key: String,
    pub llm_model: String,
    pub smtp_host: String,
    pub sender_address: String,
    pub sender_password: String,
    pub database_url: String,
    pub cadence_days: u32,
    pub search_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("serpapi_key", &"[redacted]")
            .field("openrouter_api_key", &"[redacted]")
            .field("llm_model", &self.llm_model)
            .field("smtp_host", &self.smtp_host)
            .field("sender_address", &self.sender_address)
            .field("sender_password", &"[redacted]")
            .field("database_url", &self.database_url)
            .field("cadence_days", &self.cadence_days)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
