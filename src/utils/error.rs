use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieError {
    #[error("TMDb API key is missing")]
    MissingApiKey,

    #[error("Invalid date: {year}-{month:02} is not a calendar month")]
    InvalidDate { year: i32, month: u32 },

    #[error("TMDb rejected the API key (HTTP 401)")]
    Unauthorized,

    #[error("TMDb rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("TMDb returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode TMDb response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Provider,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MovieError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MovieError::MissingApiKey | MovieError::InvalidDate { .. } => ErrorCategory::Input,
            MovieError::Unauthorized
            | MovieError::RateLimited
            | MovieError::HttpStatus { .. }
            | MovieError::Decode(_) => ErrorCategory::Provider,
            MovieError::Request(_) => ErrorCategory::Network,
            MovieError::ConfigValidationError { .. }
            | MovieError::InvalidConfigValueError { .. }
            | MovieError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MovieError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Provider | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MovieError::MissingApiKey => "Please enter a TMDb API key.".to_string(),
            MovieError::InvalidDate { year, month } => {
                format!("{}-{:02} is not a valid year and month.", year, month)
            }
            MovieError::Unauthorized => "The TMDb API key was rejected.".to_string(),
            MovieError::RateLimited => "TMDb is rate limiting requests.".to_string(),
            MovieError::HttpStatus { status } => {
                format!("TMDb answered with an unexpected status ({}).", status)
            }
            MovieError::Request(_) => "Could not reach TMDb.".to_string(),
            MovieError::Decode(_) => "TMDb sent a response that could not be read.".to_string(),
            MovieError::IoError(e) => format!("File or terminal error: {}", e),
            MovieError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            MovieError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            MovieError::MissingConfigError { field } => format!("{} must be set.", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MovieError::MissingApiKey => {
                "Pass --api-key, set TMDB_API_KEY, or use the `key` command"
            }
            MovieError::InvalidDate { .. } => "Pick a month between 1 and 12",
            MovieError::Unauthorized => "Check that the TMDb API key is a valid v3 key",
            MovieError::RateLimited => "Wait a few seconds and try again",
            MovieError::HttpStatus { .. } | MovieError::Decode(_) => {
                "Try again later; TMDb may be having problems"
            }
            MovieError::Request(_) => "Check your network connection and the --api-base URL",
            MovieError::IoError(_) => "Check file permissions and paths",
            MovieError::ConfigValidationError { .. }
            | MovieError::InvalidConfigValueError { .. }
            | MovieError::MissingConfigError { .. } => {
                "Fix the command-line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MovieError>;
