use thiserror::Error;

#[derive(Error, Debug)]
pub enum RxError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("{service} service error: {message}")]
    ServiceError { service: String, message: String },

    #[error("Configuration error for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error for '{field}': {message}")]
    ValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, RxError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    ExternalService,
    Configuration,
    Validation,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RxError {
    pub fn service(service: &str, message: impl Into<String>) -> Self {
        RxError::ServiceError {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RxError::ApiError(_) => ErrorCategory::Network,
            RxError::ServiceError { .. } => ErrorCategory::ExternalService,
            RxError::ConfigValidationError { .. }
            | RxError::MissingConfigError { .. }
            | RxError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RxError::ValidationError { .. } => ErrorCategory::Validation,
            RxError::IoError(_) => ErrorCategory::Io,
            RxError::SerializationError(_) | RxError::ImageError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RxError::ApiError(_) => {
                "Check your network connection and the configured endpoint URLs".to_string()
            }
            RxError::ServiceError { service, .. } => format!(
                "The {} service rejected the request; verify the API key and quota for it",
                service
            ),
            RxError::ConfigValidationError { field, .. }
            | RxError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the services config file", field)
            }
            RxError::MissingConfigError { field } => {
                format!("Add the '{}' entry to the services config file", field)
            }
            RxError::ValidationError { field, .. } => {
                format!("Provide a valid value for '{}' and run again", field)
            }
            RxError::IoError(_) => "Check that the input file exists and is readable".to_string(),
            RxError::SerializationError(_) => {
                "The service returned an unexpected payload; re-run with --verbose".to_string()
            }
            RxError::ImageError(_) => "Use a PNG or JPEG image that decodes correctly".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RxError::ApiError(e) => format!("Could not reach an external service: {}", e),
            RxError::ServiceError { service, message } => {
                format!("The {} service reported an error: {}", service, message)
            }
            RxError::ImageError(_) => "The image could not be decoded".to_string(),
            other => other.to_string(),
        }
    }

    /// Exit code for the CLI, by severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}
