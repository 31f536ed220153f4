use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Malformed {field}: '{value}' (expected {expected})")]
    MalformedInput {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Flight code '{code}' not found")]
    UnknownFlight { code: String },

    #[error("Seat {seat} is not available on flight {flight}")]
    SeatUnavailable { flight: String, seat: String },

    #[error("Failed to write report to '{path}': {source}")]
    ReportWriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Flight {code} has no seats; occupancy is undefined")]
    DegenerateFlight { code: String },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Ledger invariant violated for flight {flight}: {message}")]
    InvariantViolation { flight: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Inventory,
    Catalog,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReservationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReservationError::MalformedInput { .. } => ErrorCategory::Input,
            ReservationError::UnknownFlight { .. } | ReservationError::SeatUnavailable { .. } => {
                ErrorCategory::Inventory
            }
            ReservationError::DegenerateFlight { .. }
            | ReservationError::InvalidCatalog { .. }
            | ReservationError::InvariantViolation { .. } => ErrorCategory::Catalog,
            ReservationError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ReservationError::ReportWriteFailure { .. } | ReservationError::IoError(_) => {
                ErrorCategory::Io
            }
        }
    }

    /// Low errors are recovered by asking the operator again; Critical ones
    /// mean the in-memory state can no longer be trusted.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReservationError::MalformedInput { .. }
            | ReservationError::UnknownFlight { .. }
            | ReservationError::SeatUnavailable { .. } => ErrorSeverity::Low,
            ReservationError::ReportWriteFailure { .. } => ErrorSeverity::Medium,
            ReservationError::DegenerateFlight { .. }
            | ReservationError::InvalidCatalog { .. }
            | ReservationError::ConfigValidationError { .. }
            | ReservationError::IoError(_) => ErrorSeverity::High,
            ReservationError::InvariantViolation { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReservationError::MalformedInput { field, expected, .. } => {
                format!("Invalid {} format. Please enter {}.", field, expected)
            }
            ReservationError::UnknownFlight { code } => {
                format!("Flight code '{}' not found. Please try again.", code)
            }
            ReservationError::SeatUnavailable { seat, .. } => {
                format!("Seat {} is not available. Please try a different one.", seat)
            }
            ReservationError::ReportWriteFailure { source, .. } => {
                format!("Error generating report: {}", source)
            }
            ReservationError::DegenerateFlight { code } => {
                format!("Flight {} has no seats configured.", code)
            }
            ReservationError::InvalidCatalog { message } => {
                format!("The flight catalog is invalid: {}", message)
            }
            ReservationError::InvariantViolation { flight, .. } => {
                format!("Seat records for flight {} are inconsistent.", flight)
            }
            ReservationError::ConfigValidationError { field, message } => {
                format!("Invalid setting '{}': {}", field, message)
            }
            ReservationError::IoError(e) => format!("Terminal I/O failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the format shown in the prompt and try again",
            ErrorCategory::Inventory => "Pick a flight and seat from the listed options",
            ErrorCategory::Catalog => "Fix the catalog file and restart the program",
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
            ErrorCategory::Io => "Check permissions and free disk space for the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
