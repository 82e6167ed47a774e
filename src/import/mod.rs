//! Import job runner.
//!
//! Transformed records are pushed into the host through the
//! [`ConfigImporter`] trait; the runner upserts each record by handle,
//! reports fractional progress, and keeps going past individual failures so
//! one bad record never aborts the batch.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{ImportError, ImportResult};
use crate::logs::{log_error, log_info, log_success};
use crate::models::{
    AssetVolumeRecord, EntityType, EntryTypeRecord, FilesystemRecord, SectionRecord, SiteRecord,
};
use crate::transform::TransformedRecords;

/// Whether an upsert created a new entity or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Created,
    Updated,
}

/// Persistence boundary towards the host CMS.
///
/// Implementations look the entity up by handle and either update it in
/// place or create it, returning which of the two happened.
pub trait ConfigImporter {
    fn import_site(&mut self, site: &SiteRecord) -> ImportResult<ImportAction>;
    fn import_entry_type(&mut self, entry_type: &EntryTypeRecord) -> ImportResult<ImportAction>;
    fn import_section(&mut self, section: &SectionRecord) -> ImportResult<ImportAction>;
    fn import_filesystem(&mut self, filesystem: &FilesystemRecord) -> ImportResult<ImportAction>;
    fn import_asset(&mut self, volume: &AssetVolumeRecord) -> ImportResult<ImportAction>;
}

/// Receives fractional progress while a job runs.
pub trait ProgressSink {
    fn set_progress(&mut self, fraction: f64, description: &str);
}

/// Progress sink that discards everything.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_progress(&mut self, _fraction: f64, _description: &str) {}
}

/// One record that failed to import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub handle: String,
    pub message: String,
}

/// Outcome of an import job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub job_id: Uuid,
    pub entity_type: EntityType,
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    /// True when every record imported.
    pub fn complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Import a batch of transformed records.
///
/// Progress is reported after each record as `(index + 1) / total` with the
/// record's handle in the description. Failures are collected, not fatal.
pub fn run_import(
    records: &TransformedRecords,
    importer: &mut dyn ConfigImporter,
    progress: &mut dyn ProgressSink,
) -> ImportSummary {
    let entity_type = records.entity_type();
    let total = records.len();
    let job_id = Uuid::new_v4();

    log_info(format!(
        "Import job {job_id}: {total} {entity_type} record(s)"
    ));

    let mut summary = ImportSummary {
        job_id,
        entity_type,
        total,
        created: 0,
        updated: 0,
        failures: Vec::new(),
    };

    match records {
        TransformedRecords::Sites(sites) => {
            for (index, site) in sites.iter().enumerate() {
                let result = importer.import_site(site);
                record_outcome(&mut summary, progress, index, &site.handle, result);
            }
        }
        TransformedRecords::EntryTypes(entry_types) => {
            for (index, entry_type) in entry_types.iter().enumerate() {
                let result = importer.import_entry_type(entry_type);
                record_outcome(&mut summary, progress, index, &entry_type.handle, result);
            }
        }
        TransformedRecords::Sections(sections) => {
            for (index, section) in sections.iter().enumerate() {
                let result = importer.import_section(section);
                record_outcome(&mut summary, progress, index, &section.handle, result);
            }
        }
        TransformedRecords::Filesystems(filesystems) => {
            for (index, filesystem) in filesystems.iter().enumerate() {
                let result = importer.import_filesystem(filesystem);
                record_outcome(&mut summary, progress, index, &filesystem.handle, result);
            }
        }
        TransformedRecords::Assets(volumes) => {
            for (index, volume) in volumes.iter().enumerate() {
                let result = importer.import_asset(volume);
                record_outcome(&mut summary, progress, index, &volume.handle, result);
            }
        }
    }

    if summary.complete() {
        log_success(format!(
            "Import job {job_id} done: {} created, {} updated",
            summary.created, summary.updated
        ));
    } else {
        log_error(format!(
            "Import job {job_id} finished with {} failure(s)",
            summary.failures.len()
        ));
    }

    summary
}

fn record_outcome(
    summary: &mut ImportSummary,
    progress: &mut dyn ProgressSink,
    index: usize,
    handle: &str,
    result: ImportResult<ImportAction>,
) {
    match result {
        Ok(ImportAction::Created) => summary.created += 1,
        Ok(ImportAction::Updated) => summary.updated += 1,
        Err(error) => {
            log_error(format!("Failed to import \"{handle}\": {error}"));
            summary.failures.push(ImportFailure {
                handle: handle.to_string(),
                message: error.to_string(),
            });
        }
    }
    progress.set_progress(
        (index + 1) as f64 / summary.total as f64,
        &format!("Importing {}: {handle}", summary.entity_type),
    );
}
