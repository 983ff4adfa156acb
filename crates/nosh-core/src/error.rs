//! # Error Types
//!
//! Domain-specific error types for nosh-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nosh-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Per-field schema validation failures           │
//! │                                                                         │
//! │  nosh-client errors (separate crate)                                   │
//! │  └── ClientError      - Network/API failures                           │
//! │                                                                         │
//! │  Flow: ValidationError ──► blocks submit locally (inline per field)    │
//! │        ClientError     ──► one top-level notification, schema kept     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation errors carry the *field path* into the document
//!    (e.g. `menu[0].items[2].name`) so the form can highlight the field
//! 3. Errors are enum variants, never String
//! 4. Session-store operations never produce errors at all

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The schema failed submit-time validation.
    ///
    /// Carries every field failure so the form can surface them all at once
    /// instead of one per round trip.
    #[error("schema validation failed with {} error(s)", .0.len())]
    SchemaInvalid(Vec<ValidationError>),

    /// Single validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A per-field schema validation failure.
///
/// The `field` member is a path into the submitted document, e.g.
/// `menu[1].items[0].price.amount`. Paths are stable across runs: the same
/// invalid document always yields the same errors in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. malformed URL, malformed time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A sequence holds more entries than allowed.
    #[error("{field} must have at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Duplicate value where uniqueness is required (dish ids).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Returns the field path this error points at.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::TooMany { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
