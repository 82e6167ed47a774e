//! Error types for the configload import pipeline.
//!
//! - [`CsvError`] - CSV acquisition errors (file, encoding, structure)
//! - [`RegistryError`] - host snapshot loading errors
//! - [`ImportError`] - per-record import failures reported by importers
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Validation findings are NOT errors: column and row problems are returned
//! in-band as structured results ([`crate::schema::ColumnValidation`],
//! [`crate::validate::RowValidation`]) so the caller decides how to proceed.
//! Error conversion is automatic via `From`, allowing `?` across boundaries.

use thiserror::Error;

// =============================================================================
// CSV Acquisition Errors
// =============================================================================

/// Errors while reading and decoding a CSV source.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the detected encoding.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Malformed CSV structure.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// The file contains no data at all.
    #[error("CSV file is empty")]
    EmptyFile,

    /// The header row contains no usable column names.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors while loading a host configuration snapshot.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// IO error.
    #[error("Registry IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Registry JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Import Errors
// =============================================================================

/// A per-record failure reported by an importer implementation.
///
/// The job runner logs these and moves on to the next record; one bad record
/// never aborts the batch.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The host rejected the record, with field-level error messages.
    #[error("Failed to import {kind} '{handle}': {errors:?}")]
    SaveFailed {
        kind: &'static str,
        handle: String,
        errors: Vec<String>,
    },

    /// None of a section's entry type handles resolved to an existing entry type.
    #[error("No valid entry types found for section '{0}'")]
    NoEntryTypes(String),

    /// None of a section's site settings referenced an existing site.
    #[error("No valid site settings found for section '{0}'")]
    NoSiteSettings(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV acquisition error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Host snapshot error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The requested entity type is not supported.
    #[error("Unknown element type: {0}")]
    UnknownEntityType(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV acquisition.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
