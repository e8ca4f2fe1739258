use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    ApiError { status: u16, message: String },

    #[error("Request took too long! Timeout after {seconds} seconds")]
    TimeoutError { seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFoundError { what: String },
}

impl RecipeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Short message suitable for showing on a terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) | Self::TimeoutError { .. } => {
                format!("Could not reach the recipe API: {}", self)
            }
            Self::ApiError { .. } => format!("The recipe API rejected the request: {}", self),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) | Self::TimeoutError { .. } => {
                "Check your network connection and the configured API url"
            }
            Self::ApiError { status: 401, .. } | Self::ApiError { status: 403, .. } => {
                "Check the API key (--api-key or FORKIFY_API_KEY)"
            }
            Self::ApiError { .. } | Self::NotFoundError { .. } => {
                "Check the recipe id or search query and try again"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file or CLI flags",
            Self::IoError(_) => "Make sure the data directory exists and is writable",
            Self::SerializationError(_) => "The stored data looks corrupt; remove it and retry",
            Self::ValidationError { .. } => "Correct the input and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
