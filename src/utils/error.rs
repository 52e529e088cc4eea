use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("PDF extraction failed for '{path}': {message}")]
    PdfExtractionError { path: String, message: String },

    #[error("DOCX extraction failed for '{path}': {message}")]
    DocxExtractionError { path: String, message: String },

    #[error("Inbox scan failed for '{path}': {message}")]
    ScanError { path: String, message: String },

    #[error("Datastore error at '{path}': {message}")]
    DatastoreError { path: String, message: String },

    #[error("Relocation of '{path}' failed: {message}")]
    RelocationError { path: String, message: String },

    #[error("Publishing failed: {message}")]
    PublishError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
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
    Configuration,
    Document,
    Filesystem,
    Datastore,
    Publishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::TomlError(_)
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            IntakeError::PdfExtractionError { .. } | IntakeError::DocxExtractionError { .. } => {
                ErrorCategory::Document
            }
            IntakeError::IoError(_)
            | IntakeError::ScanError { .. }
            | IntakeError::RelocationError { .. } => ErrorCategory::Filesystem,
            IntakeError::SerializationError(_) | IntakeError::DatastoreError { .. } => {
                ErrorCategory::Datastore
            }
            IntakeError::PublishError { .. } => ErrorCategory::Publishing,
        }
    }

    /// Per-file document failures are reported and skipped, so they rank lowest.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Document => ErrorSeverity::Low,
            ErrorCategory::Publishing => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Filesystem => ErrorSeverity::High,
            ErrorCategory::Datastore => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::TomlError(_) => "Check the TOML syntax of the configuration file",
            IntakeError::InvalidConfigValueError { .. } | IntakeError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
            IntakeError::PdfExtractionError { .. } | IntakeError::DocxExtractionError { .. } => {
                "Re-export the document or convert it to a supported format"
            }
            IntakeError::ScanError { .. } => "Make sure the inbox directory exists and is readable",
            IntakeError::RelocationError { .. } => {
                "Check permissions on the storage and archive directories"
            }
            IntakeError::DatastoreError { .. } | IntakeError::SerializationError(_) => {
                "Make sure the datastore file exists and contains a JSON array"
            }
            IntakeError::PublishError { .. } => {
                "Make sure git is installed and the repository root is a git checkout"
            }
            IntakeError::IoError(_) => "Check that the paths exist and are accessible",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Document => format!("Could not read document: {}", self),
            ErrorCategory::Filesystem => format!("File system problem: {}", self),
            ErrorCategory::Datastore => format!("Datastore problem: {}", self),
            ErrorCategory::Publishing => format!("Publishing problem: {}", self),
        }
    }

    /// Process exit code for a run that aborted with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
