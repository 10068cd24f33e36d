//! Error handling for ZoneKit
//!
//! Provides error types for all layers of the editing core:
//! - Validation errors (rejected input, detected before any mutation)
//! - Store errors (lookups against zones that no longer exist)
//! - Service errors (persistence/shader-catalog round-trip failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;
use uuid::Uuid;

/// Validation error type
///
/// Raised by the editor controller before any mutation takes place; a
/// validation failure always leaves the zone store untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Geometry outside the unit square or below the minimum size
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Why the geometry was rejected.
        reason: String,
    },

    /// Zone name exceeds the maximum length
    #[error("Zone name too long: {length} characters")]
    NameTooLong {
        /// The rejected name's length.
        length: usize,
    },

    /// Zone name contains a forbidden character
    #[error("Zone name contains forbidden character {character:?}")]
    ForbiddenCharacter {
        /// The offending character.
        character: char,
    },

    /// Another zone in the layout already uses this name
    #[error("Zone name already in use: {name}")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// Zone number outside [1, 99]
    #[error("Zone number {number} out of range (1-99)")]
    NumberOutOfRange {
        /// The rejected number.
        number: u8,
    },

    /// Another zone in the layout already uses this number
    #[error("Zone number already in use: {number}")]
    DuplicateNumber {
        /// The duplicated number.
        number: u8,
    },

    /// Shader id not present in the shader catalog
    #[error("Unknown shader: {shader_id}")]
    UnknownShader {
        /// The rejected shader id.
        shader_id: String,
    },

    /// Parameter key not declared by the selected shader
    #[error("Shader does not declare parameter '{parameter}'")]
    UnknownShaderParameter {
        /// The rejected parameter key.
        parameter: String,
    },

    /// A field value outside its accepted range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An operation requiring a selection was invoked with none
    #[error("No zones selected")]
    EmptySelection,

    /// Paste was invoked with no decodable zone data on the clipboard
    #[error("Clipboard does not contain zone data")]
    NothingToPaste,
}

/// Store error type
///
/// Raised when an operation targets zone state that is no longer
/// present. Recoverable: the caller is expected to re-fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No zone with this id exists in the store
    #[error("Zone not found: {id}")]
    ZoneNotFound {
        /// The missing zone's id.
        id: Uuid,
    },

    /// All 99 zone numbers are in use
    #[error("No free zone numbers remain")]
    NumbersExhausted,

    /// The zone has no room to expand into
    #[error("Zone {id} cannot expand")]
    CannotFill {
        /// The zone that could not grow.
        id: Uuid,
    },
}

/// External-service error type
///
/// Round-trip failures against the persistence, settings, or shader
/// collaborators. The in-memory editing state is left untouched so the
/// user can retry.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Layout could not be loaded
    #[error("Failed to load layout: {reason}")]
    LoadFailed {
        /// The service's error text.
        reason: String,
    },

    /// Layout could not be saved
    #[error("Failed to save layout: {reason}")]
    SaveFailed {
        /// The service's error text.
        reason: String,
    },

    /// Layout file could not be imported
    #[error("Failed to import layout: {reason}")]
    ImportFailed {
        /// The service's error text.
        reason: String,
    },

    /// Layout could not be exported to a file
    #[error("Failed to export layout: {reason}")]
    ExportFailed {
        /// The service's error text.
        reason: String,
    },

    /// Shader catalog query failed
    #[error("Shader query failed: {reason}")]
    ShaderQueryFailed {
        /// The service's error text.
        reason: String,
    },
}

/// Main error type for ZoneKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Service error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a zone-not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::ZoneNotFound { .. }))
    }

    /// Check if this is an external-service error
    pub fn is_service_error(&self) -> bool {
        matches!(self, Error::Service(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
