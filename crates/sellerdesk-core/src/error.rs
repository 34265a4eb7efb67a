use thiserror::Error;

/// Errors raised while loading configuration or draft files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read draft file {path}: {source}")]
    DraftFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse draft file: {0}")]
    DraftFileParse(#[from] serde_yaml::Error),

    #[error("draft file validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid product status code: {0}")]
    InvalidStatus(u8),

    #[error("variation index {index} out of range (len {len})")]
    VariationIndex { index: usize, len: usize },
}
