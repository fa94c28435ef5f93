//! Error types for `Quiver`.
//!
//! Every failure of the translation pipeline surfaces as one [`Error`]
//! variant. Requests are rejected on the first error; nothing is retried
//! or downgraded internally.

use thiserror::Error;

/// Result type alias for `Quiver` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, assembling or encoding a request.
///
/// Each variant names the offending field or value so the caller can
/// diagnose a rejection without re-parsing. Error codes follow the
/// pattern `QUIVER-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// Body does not decode as the expected envelope shape (QUIVER-001).
    #[error("[QUIVER-001] Malformed input: {0}")]
    MalformedInput(String),

    /// Target space is unknown to the schema provider (QUIVER-002).
    #[error("[QUIVER-002] Space '{0}' not found")]
    SpaceNotFound(String),

    /// Field referenced by a clause is absent from the space (QUIVER-003).
    #[error("[QUIVER-003] Field '{0}' not found in space fields")]
    FieldNotFound(String),

    /// Field exists but has the wrong type for the clause (QUIVER-004).
    #[error("[QUIVER-004] Field '{field}' is of type {actual}, expected {expected}")]
    FieldTypeMismatch {
        /// Field name.
        field: String,
        /// Kind of field the clause requires.
        expected: &'static str,
        /// Declared type of the field.
        actual: String,
    },

    /// Filter targets a field without an index (QUIVER-005).
    #[error("[QUIVER-005] Field '{0}' is not indexed, please check the space")]
    FieldNotIndexed(String),

    /// Vector clause carries no feature payload (QUIVER-006).
    #[error("[QUIVER-006] Feature is empty for vector field '{0}'")]
    EmptyFeature(String),

    /// Feature length is not a positive multiple of the dimension (QUIVER-007).
    #[error("[QUIVER-007] Dimension mismatch for field '{field}': dimension {dimension}, feature length {actual}")]
    DimensionMismatch {
        /// Field name.
        field: String,
        /// Per-sample element count the field requires.
        dimension: usize,
        /// Number of elements received.
        actual: usize,
    },

    /// Vector clauses disagree on the number of samples (QUIVER-008).
    #[error("[QUIVER-008] Batch size mismatch for field '{field}': expected {expected}, got {actual}")]
    BatchSizeMismatch {
        /// Field whose clause disagreed.
        field: String,
        /// Batch count set by the earlier clauses.
        expected: usize,
        /// Batch count of this clause.
        actual: usize,
    },

    /// Unrecognized vector `format` option (QUIVER-009).
    #[error("[QUIVER-009] Unknown vector process format '{0}'")]
    UnknownFormatOption(String),

    /// Unrecognized score comparison symbol (QUIVER-010).
    #[error("[QUIVER-010] Unknown symbol operator '{0}'")]
    UnknownSymbolOperator(String),

    /// Unrecognized term filter operator (QUIVER-011).
    #[error("[QUIVER-011] Unknown term filter operator '{0}'")]
    UnknownOperatorValue(String),

    /// Range bound cannot be parsed as the field's numeric type (QUIVER-012).
    #[error("[QUIVER-012] Cannot parse range bound {value} for field '{field}': {reason}")]
    RangeBoundParseError {
        /// Field name.
        field: String,
        /// Offending bound as received.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Range filter produced no usable bound encoding (QUIVER-013).
    #[error("[QUIVER-013] Range filter on field '{0}' has no usable bounds")]
    MissingRangeBounds(String),

    /// Requested output field is absent from the space (QUIVER-014).
    #[error("[QUIVER-014] Output field '{0}' does not exist in the space")]
    UnknownOutputField(String),

    /// Index parameters are not a valid JSON object (QUIVER-015).
    #[error("[QUIVER-015] Invalid index params: {0}")]
    InvalidIndexParams(String),

    /// Encoded buffer failed verification (QUIVER-016).
    #[error("[QUIVER-016] Wire format error: {0}")]
    Wire(String),

    /// Configuration error (QUIVER-017).
    #[error("[QUIVER-017] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "QUIVER-003").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "QUIVER-001",
            Self::SpaceNotFound(_) => "QUIVER-002",
            Self::FieldNotFound(_) => "QUIVER-003",
            Self::FieldTypeMismatch { .. } => "QUIVER-004",
            Self::FieldNotIndexed(_) => "QUIVER-005",
            Self::EmptyFeature(_) => "QUIVER-006",
            Self::DimensionMismatch { .. } => "QUIVER-007",
            Self::BatchSizeMismatch { .. } => "QUIVER-008",
            Self::UnknownFormatOption(_) => "QUIVER-009",
            Self::UnknownSymbolOperator(_) => "QUIVER-010",
            Self::UnknownOperatorValue(_) => "QUIVER-011",
            Self::RangeBoundParseError { .. } => "QUIVER-012",
            Self::MissingRangeBounds(_) => "QUIVER-013",
            Self::UnknownOutputField(_) => "QUIVER-014",
            Self::InvalidIndexParams(_) => "QUIVER-015",
            Self::Wire(_) => "QUIVER-016",
            Self::Config(_) => "QUIVER-017",
        }
    }

    /// Returns true if the error was caused by the client request rather
    /// than by the deployment (configuration or a corrupted buffer).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Wire(_) | Self::Config(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<flatbuffers::InvalidFlatbuffer> for Error {
    fn from(err: flatbuffers::InvalidFlatbuffer) -> Self {
        Self::Wire(err.to_string())
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
