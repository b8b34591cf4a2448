use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{service} failed: {status}")]
    UpstreamError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("AI usage credits exhausted. Please add more credits to continue.")]
    PaymentRequired,

    #[error("Unknown simulation parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Record extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Invalid request: {message}")]
    RequestError { message: String },
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Parsing,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::ApiError(_) => ErrorCategory::Network,
            PortalError::CsvError(_) | PortalError::IoError(_) => ErrorCategory::Storage,
            PortalError::SerializationError(_) | PortalError::ExtractionError { .. } => {
                ErrorCategory::Parsing
            }
            PortalError::ConfigError { .. }
            | PortalError::PatternError(_)
            | PortalError::MissingConfigError { .. }
            | PortalError::InvalidConfigValueError { .. }
            | PortalError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PortalError::UpstreamError { .. }
            | PortalError::RateLimited
            | PortalError::PaymentRequired => ErrorCategory::Upstream,
            PortalError::UnknownParameter { .. } | PortalError::RequestError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Parsing | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 對應代理函式回傳的 `type` 欄位
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::RateLimited => "rate_limit",
            PortalError::PaymentRequired => "payment_required",
            _ => "server_error",
        }
    }

    /// 對應代理函式回傳的 HTTP 狀態碼
    pub fn status_code(&self) -> u16 {
        match self {
            PortalError::RateLimited => 429,
            PortalError::PaymentRequired => 402,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortalError::RateLimited => "Wait a moment before sending another request",
            PortalError::PaymentRequired => "Top up the AI gateway credits and retry",
            PortalError::UnknownParameter { .. } => {
                "Use one of: gravity, radiation, temperature, pressure, oxygenLevel"
            }
            PortalError::MissingConfigError { .. } => {
                "Set the missing value in the TOML file or as an environment variable"
            }
            _ => match self.category() {
                ErrorCategory::Configuration => "Check the configuration file and environment",
                ErrorCategory::Network => "Check network connectivity and endpoint URLs",
                ErrorCategory::Upstream => "The upstream service rejected the request; retry later",
                ErrorCategory::Parsing => "The upstream response had an unexpected shape",
                ErrorCategory::Storage => "Check that the output path is writable",
                ErrorCategory::Input => "Check the request parameters",
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Upstream => format!("Upstream service problem: {}", self),
            ErrorCategory::Parsing => format!("Could not read the response: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
        }
    }
}
