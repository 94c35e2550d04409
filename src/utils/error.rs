use chrono::NaiveDate;
use thiserror::Error;

/// PESEL 編解碼錯誤，全部可恢復
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeselError {
    #[error("PESEL must be exactly 11 characters long; {input} is {length}")]
    InvalidLength { input: String, length: usize },

    #[error("{input} contains illegal characters")]
    InvalidCharacters { input: String },

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Date out of range: {date}; PESEL number is defined for years 1800-2299")]
    DateOutOfRange { date: NaiveDate },

    #[error("Control number does not match in {input}; expected {expected}, got {got}")]
    ChecksumMismatch { input: String, expected: u8, got: u8 },

    #[error("Invalid date format: {format}")]
    InvalidDateFormat { format: String },
}

impl PeselError {
    /// 報表用的穩定錯誤標籤
    pub fn kind(&self) -> &'static str {
        match self {
            PeselError::InvalidLength { .. } => "invalid_length",
            PeselError::InvalidCharacters { .. } => "invalid_characters",
            PeselError::InvalidDate { .. } => "invalid_date",
            PeselError::DateOutOfRange { .. } => "date_out_of_range",
            PeselError::ChecksumMismatch { .. } => "checksum_mismatch",
            PeselError::InvalidDateFormat { .. } => "invalid_date_format",
        }
    }
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("PESEL error: {0}")]
    Pesel(#[from] PeselError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Io,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::Pesel(_) => ErrorCategory::Input,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(_) | EtlError::SerializationError(_) => ErrorCategory::Processing,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單筆號碼錯誤不影響整批
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::Pesel(PeselError::InvalidDateFormat { .. }) => {
                "Use a strftime date format such as %d-%m-%Y".to_string()
            }
            EtlError::Pesel(PeselError::DateOutOfRange { .. }) => {
                "PESEL numbers exist only for birth dates between 1800-01-01 and 2299-12-31"
                    .to_string()
            }
            EtlError::Pesel(_) => "Check the PESEL number or birth date and try again".to_string(),
            EtlError::IoError(_) => {
                "Make sure the input files exist and the output directory is writable".to_string()
            }
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Try the plain text output format".to_string()
            }
            EtlError::ConfigError { .. } | EtlError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            EtlError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            EtlError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
