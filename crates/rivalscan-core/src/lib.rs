//! Shared domain types, configuration, and input validation for rivalscan.

pub mod app_config;
pub mod config;
pub mod types;
pub mod validate;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use types::{Comparison, CompetitorCandidate, ReportDocument, UpdateDigest, DEFAULT_ASPECTS};
pub use validate::{validate_product_name, validate_recipient, ValidationError};
