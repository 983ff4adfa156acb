//! # Client Error Types
//!
//! Error types for remote API access.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Api(ApiFault)          │ │
//! │  │  InvalidUrl     │  │  (reqwest)      │  │  {translationKey,       │ │
//! │  │  Io / TomlParse │  │                 │  │   status, message}      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  An Api fault is surfaced to the owner as ONE dismissible notification │
//! │  keyed by translationKey; the edited schema is retained client-side.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// API Fault
// =============================================================================

/// The structured error object the API returns for non-2xx responses.
///
/// `translation_key` selects the localized message shown to the user;
/// `message` is the untranslated human-readable fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{status}] {message} ({translation_key})")]
pub struct ApiFault {
    /// i18n key for the localized notification, e.g. "errors.menu.saveFailed".
    pub translation_key: String,

    /// HTTP status the API responded with.
    pub status: u16,

    /// Human-readable message (untranslated).
    pub message: String,
}

impl ApiFault {
    /// Fallback fault for a non-2xx response whose body is not the
    /// structured shape (proxies, gateway timeouts, HTML error pages).
    pub fn unstructured(status: u16, body: impl Into<String>) -> Self {
        ApiFault {
            translation_key: "errors.unknown".to_string(),
            status,
            message: body.into(),
        }
    }
}

// =============================================================================
// Client Error
// =============================================================================

/// Client error type covering configuration, transport, and API failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The configured base URL is not a valid http(s) URL.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or write the config file.
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file.
    #[error("Config parse failed: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize the config file.
    #[error("Config serialize failed: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to read a schema document from disk.
    #[error("Failed to read schema file {path}: {source}")]
    SchemaFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // =========================================================================
    // API Errors
    // =========================================================================
    /// The API answered with a non-2xx status.
    #[error("API error: {0}")]
    Api(ApiFault),

    /// A 2xx response carried a body we could not decode.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The schema document failed whole-document validation.
    #[error("Schema has {0} validation error(s)")]
    SchemaInvalid(usize),
}

impl ClientError {
    /// The parsed fault, when this error is an API rejection.
    pub fn api_fault(&self) -> Option<&ApiFault> {
        match self {
            ClientError::Api(fault) => Some(fault),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
