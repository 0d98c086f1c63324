use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid YouTube URL. Please check and try again.")]
    InvalidVideoUrl { url: String },

    #[error("Could not retrieve a transcript for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("No transcript found for video {video_id} in languages: {languages}")]
    NoTranscriptFound { video_id: String, languages: String },

    #[error("Telegram API call {method} failed: {description}")]
    TelegramError { method: String, description: String },

    #[error("Tutorial generation failed: {message}")]
    GenerationError { message: String },

    #[error("{message}")]
    WebhookRegistrationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    ExternalService,
    UserInput,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn registration(message: impl Into<String>) -> Self {
        Self::WebhookRegistrationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::System,
            Self::SerializationError(_) | Self::XmlError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InvalidVideoUrl { .. } => ErrorCategory::UserInput,
            Self::TranscriptUnavailable { .. }
            | Self::NoTranscriptFound { .. }
            | Self::TelegramError { .. }
            | Self::GenerationError { .. }
            | Self::WebhookRegistrationError { .. } => ErrorCategory::ExternalService,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者輸入或影片本身的問題
            Self::InvalidVideoUrl { .. }
            | Self::TranscriptUnavailable { .. }
            | Self::NoTranscriptFound { .. } => ErrorSeverity::Low,
            // 可重試的外部錯誤
            Self::HttpError(_) | Self::TelegramError { .. } | Self::GenerationError { .. } => {
                ErrorSeverity::Medium
            }
            Self::SerializationError(_) | Self::XmlError(_) | Self::WebhookRegistrationError { .. } => {
                ErrorSeverity::High
            }
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("{} is not configured", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::HttpError(e) if e.is_timeout() => "An upstream service timed out".to_string(),
            Self::HttpError(_) => "Could not reach an upstream service".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check TELEGRAM_BOT_TOKEN, GEMINI_API_KEY and the command-line flags (a .env file is loaded if present)"
            }
            ErrorCategory::Network => "Check network connectivity and retry",
            ErrorCategory::ExternalService => {
                "Check the API credentials and the upstream service status, then retry"
            }
            ErrorCategory::UserInput => "Send a youtube.com or youtu.be video link",
            ErrorCategory::Data => "The upstream response had an unexpected format",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
