use thiserror::Error;
use crate::enums::cache_error::CacheError;
use crate::enums::transport_error::TransportError;

#[derive(Debug, Error)]
pub enum PrNotesError {
    #[error("Configuration Error: {message}")]
    ConfigurationError {
        message: String,
        suggestion: Option<String>,
    },

    #[error("Configuration file error at '{path}': {reason}")]
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("No cached change with id '{id}'")]
    ChangeNotFound {
        id: String,
    },

    #[error("{failed} of {total} generation requests failed")]
    GenerationFailed {
        failed: usize,
        total: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(String),
}

impl PrNotesError {
    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            suggestion: suggestion.map(ToString::to_string),
        }
    }

    pub fn invalid_config(errors: &[String]) -> Self {
        Self::config_error(&errors.join("; "), Some("Fix the listed settings in config.toml"))
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(TransportError::AuthenticationError(_)) => false,
            Self::Transport(_) | Self::GenerationFailed { .. } => true,
            Self::ConfigurationError { .. } | Self::ChangeNotFound { .. } => true,
            Self::Cache(_) | Self::ConfigurationFileError { .. } | Self::Io(_) | Self::Toml(_) => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) | Self::Cache(CacheError::Corruption(_)) => ErrorSeverity::Critical,
            Self::Cache(_) | Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::Transport(_) | Self::GenerationFailed { .. } | Self::Toml(_) => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } | Self::ChangeNotFound { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Run 'prnotes init' or check the path", path, reason)
            }
            Self::Transport(TransportError::AuthenticationError(reason)) => {
                format!("Authentication failed: {}\n💡 Check the API key environment variable named in config.toml", reason)
            }
            Self::Transport(error) => {
                format!("{}\n💡 Check your connection and re-run the command", error)
            }
            Self::Cache(error) => {
                format!("Local cache error: {}\n💡 'prnotes clear' resets the cache", error)
            }
            Self::ChangeNotFound { id } => {
                format!("No cached change with id '{}'\n💡 Run 'prnotes fetch' then 'prnotes list'", id)
            }
            Self::GenerationFailed { failed, total } => {
                format!("{} of {} generation requests failed\n💡 Re-run 'prnotes generate' for the failed ids", failed, total)
            }
            Self::Io(error) => format!("I/O error: {}", error),
            Self::Toml(reason) => format!("Invalid TOML: {}\n💡 Check config.toml syntax", reason),
        }
    }
}

impl From<toml::de::Error> for PrNotesError {
    fn from(error: toml::de::Error) -> Self {
        Self::Toml(error.message().to_string())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for prnotes operations
pub type PrNotesResult<T> = Result<T, PrNotesError>;

pub struct ErrorHandler;

impl ErrorHandler {
    /// Logs the technical detail and prints the user-facing message.
    pub fn handle_error(error: &PrNotesError) {
        let severity = error.severity();

        log::error!("[{}] {:?}", severity.name(), error);
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}
