//! # Configload - CMS configuration import from CSV
//!
//! Configload validates and transforms CSV files describing CMS
//! configuration entities (sites, entry types, sections, filesystems, asset
//! volumes) into import-ready records, then pushes them into a host through
//! an importer trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Validate   │────▶│  Transform  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (cols+rows) │     │  (records)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                                             ┌──────▼──────┐
//!                                                             │   Import    │
//!                                                             │  (upsert)   │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use configload::{run_file, HostSnapshot};
//!
//! let host = HostSnapshot::from_file("registry.json")?;
//! let report = run_file("sites", "sites.csv", host.registries())?;
//! if report.valid() {
//!     println!("{} records ready", report.records.unwrap().len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Import-ready records and canonical enums
//! - [`schema`] - Allowed and required columns per entity type
//! - [`validators`] - Cell-level predicates
//! - [`registry`] - Host lookups (existing sites, groups, handles)
//! - [`parser`] - CSV parsing with encoding and delimiter auto-detection
//! - [`validate`] - Per-entity row validation
//! - [`transform`] - Row transforms, section grouping, and the pipeline
//! - [`import`] - Upsert job runner
//! - [`logs`] - Broadcast log channel

// Core modules
pub mod error;
pub mod models;

// Schema and cell predicates
pub mod schema;
pub mod validators;

// Host lookups
pub mod registry;

// Parsing
pub mod parser;

// Validation
pub mod validate;

// Transformation
pub mod transform;

// Import
pub mod import;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult, ImportError, ImportResult, PipelineError, PipelineResult, RegistryError,
    RegistryResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AssetVolumeRecord, DefaultPlacement, EntityType, EntryTypeRecord, FilesystemRecord,
    PreviewTargetRecord, PropagationMethod, SectionRecord, SectionType, SiteRecord,
    SiteSettingsRecord, TranslationMethod, HOME_URI,
};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{allowed_columns, required_columns, validate_columns, ColumnValidation};

// =============================================================================
// Re-exports - Registry
// =============================================================================

pub use registry::{
    EntryTypeLookup, FilesystemLookup, HostSnapshot, Registries, SiteGroup, SiteLookup,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_file,
    parse_file_with_delimiter, ParsedCsv,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validate::{validate_rows, RowValidation};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{run_bytes, run_file, PipelineReport, TransformedRecords};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use import::{
    run_import, ConfigImporter, ImportAction, ImportFailure, ImportSummary, NoProgress,
    ProgressSink,
};
