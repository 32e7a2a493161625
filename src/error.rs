use std::fmt;

#[derive(Debug)]
pub enum FluxError {
    ConfigError(String),
    ValidationError(String),
    AuthError(String),
    ModelLoadingError(String),
    RateLimitError(String),
    ServerError { status: u16, body: String },
    NetworkError(String),
    SerializationError(String),
    StorageError(String),
}

impl fmt::Display for FluxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluxError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FluxError::ValidationError(msg) => write!(f, "{}", msg),
            FluxError::AuthError(msg) => write!(f, "{}", msg),
            FluxError::ModelLoadingError(msg) => write!(f, "{}", msg),
            FluxError::RateLimitError(msg) => write!(f, "{}", msg),
            FluxError::ServerError { status, body } => {
                write!(f, "Server error: {} - {}", status, body)
            }
            FluxError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            FluxError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            FluxError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for FluxError {}

pub type Result<T> = std::result::Result<T, FluxError>;
