use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoucherError {
    /// Deliberately carries no detail. Missing, inactive and unauthorized
    /// portals all surface as this same error so a caller cannot probe
    /// which portals exist.
    #[error("Not found")]
    NotFound,

    #[error("{reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Directory request failed: {0}")]
    DirectoryError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Seed parsing error: {0}")]
    SeedError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, VoucherError>;
