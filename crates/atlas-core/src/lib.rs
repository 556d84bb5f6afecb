pub mod app_config;
pub mod config;
pub mod forms;
pub mod location;
pub mod sanitize;
pub mod suggestion;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use forms::{
    username_from_email, validate_email, validate_password, validate_required, FieldCheck,
    DEFAULT_MIN_PASSWORD_LENGTH,
};
pub use location::{
    Coordinates, CountryMatch, ParsedLocation, ValidationResult, INVALID_MAPS_URL_MESSAGE,
};
pub use sanitize::{
    sanitize_for_storage, sanitize_for_storage_with_limit, sanitize_user_content,
    DEFAULT_MAX_LENGTH,
};
pub use suggestion::SuggestionDraft;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
