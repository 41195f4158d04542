//! Error types for icon resolution.
//!
//! This module defines [`IconifyError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `IconifyError` for domain-specific failures that need distinct
//!   handling (bad identifier, missing icon, stale metadata)
//! - Use `anyhow::Error` (via `IconifyError::Other`) for unexpected errors
//! - Every failure is scoped to a single identifier's resolution attempt;
//!   none is fatal to the process

use thiserror::Error;

/// Core error type for icon resolution.
#[derive(Debug, Error)]
pub enum IconifyError {
    /// Malformed `pack:name` identifier. No I/O was performed.
    #[error("Icon must be in the format 'pack:name', got '{input}'")]
    InvalidIdentifier { input: String },

    /// The remote API confirmed the icon does not exist.
    #[error("Icon not found in remote registry: {icon}")]
    IconNotFound { icon: String },

    /// A metadata stamp exists but could not be parsed.
    #[error("Corrupt cache metadata at {path}")]
    MetadataCorrupt { path: String },

    /// Local store failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network transport failure, including timeouts.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Metadata stamp serialization failure.
    #[error("Metadata serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for icon resolution operations.
pub type Result<T> = std::result::Result<T, IconifyError>;
