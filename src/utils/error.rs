use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid rating {value}: ratings range from 1 to 5")]
    InvalidRating { value: i64 },

    #[error("Unknown course: {number}")]
    UnknownCourse { number: String },

    #[error("Unknown subject: {subject}")]
    UnknownSubject { subject: String },

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },
}

impl CatalogError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::ConfigValidationError { .. }
                | Self::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) | Self::Status { .. } => {
                "Could not reach the course API".to_string()
            }
            Self::Serialization(_) => "The course API returned data in an unexpected shape".to_string(),
            Self::UnknownCourse { number } => format!("No course numbered {}", number),
            Self::UnknownSubject { subject } => format!("No subject named {}", subject),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::Status { .. } => {
                "Check the endpoint URLs and your network connection"
            }
            Self::Serialization(_) => "Verify the endpoint serves the course JSON format",
            Self::Io(_) | Self::Csv(_) => "Check that the output stream is writable",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file or command-line flags",
            Self::InvalidRating { .. } => "Use a whole number between 1 and 5",
            Self::UnknownCourse { .. } => "Run `list` or `completed` to see valid course numbers",
            Self::UnknownSubject { .. } => "Run `subjects` to see valid subjects",
            Self::InvalidCommand { .. } => "Type `help` for the list of commands",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
