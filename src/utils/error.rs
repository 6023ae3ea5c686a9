use thiserror::Error;

#[derive(Error, Debug)]
pub enum NamecheapError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("XML parse error at byte {position}: {message}")]
    XmlParseError { message: String, position: u64 },
}

impl NamecheapError {
    pub fn xml(message: impl Into<String>, position: u64) -> Self {
        Self::XmlParseError {
            message: message.into(),
            position,
        }
    }

    /// One-line hint printed by the CLI next to the error.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check network connectivity and the configured endpoint",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "The response could not be rendered as JSON",
            Self::ConfigError { .. } => "Make sure the file is valid TOML with a [client] table",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and retry"
            }
            Self::MissingConfigError { .. } => {
                "Set the value in the config file or the matching NAMECHEAP_* environment variable"
            }
            Self::XmlParseError { .. } => "The provider returned malformed XML; retry later",
        }
    }
}


pub type Result<T> = std::result::Result<T, NamecheapError>;
