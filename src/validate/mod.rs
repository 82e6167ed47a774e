//! Row-level validation: per-entity rule sets over raw CSV cells.
//!
//! Each row is zipped against the declared columns and checked by the rule
//! set for its entity type. All findings for a row accumulate; nothing
//! short-circuits at the first failure. Errors are keyed by 1-based row
//! number, counting the header as row 1 (so the first data row is row 2).
//!
//! Validation only inspects string shape and queries the read-only host
//! lookups; it never coerces values. That is the transformer's job.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::EntityType;
use crate::registry::{site_group_exists, Registries};
use crate::validators::{
    is_positive_integer, is_truthy, is_valid_boolean_string, is_valid_custom_translation_method,
    is_valid_default_placement, is_valid_language_code, is_valid_propagation_method,
    is_valid_section_type, is_valid_translation_method,
};

/// Outcome of a row-level check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowValidation {
    pub valid: bool,
    /// Error messages keyed by 1-based row number (header is row 1).
    pub row_errors: BTreeMap<u32, Vec<String>>,
}

impl RowValidation {
    fn from_errors(row_errors: BTreeMap<u32, Vec<String>>) -> Self {
        Self {
            valid: row_errors.is_empty(),
            row_errors,
        }
    }
}

/// A single row's cells, keyed by column name.
///
/// Cells are zipped positionally against the declared columns; a short row
/// yields empty strings for its trailing columns, and a duplicated column
/// name keeps the last cell.
type RowMap<'a> = HashMap<&'a str, &'a str>;

fn row_map<'a>(columns: &'a [String], row: &'a [String]) -> RowMap<'a> {
    let mut map = HashMap::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        map.insert(column.as_str(), row.get(i).map(String::as_str).unwrap_or(""));
    }
    map
}

fn cell<'a>(row: &RowMap<'a>, column: &str) -> &'a str {
    row.get(column).copied().unwrap_or("")
}

/// Validate all data rows for `entity_type`.
///
/// An unrecognized entity type produces no per-row errors; the column check
/// has already reported it.
pub fn validate_rows(
    entity_type: &str,
    columns: &[String],
    rows: &[Vec<String>],
    registries: Registries<'_>,
) -> RowValidation {
    let Some(entity) = EntityType::parse(entity_type) else {
        return RowValidation::from_errors(BTreeMap::new());
    };

    let mut row_errors = BTreeMap::new();

    for (index, row) in rows.iter().enumerate() {
        let data = row_map(columns, row);
        // +2: the header is row 1 and the index is 0-based.
        let row_number = index as u32 + 2;

        let errors = match entity {
            EntityType::Sites => validate_site_row(&data, row_number, registries),
            EntityType::EntryTypes => validate_entry_type_row(&data, row_number),
            EntityType::Sections => validate_section_row(&data, row_number, registries),
            EntityType::Filesystems => validate_filesystem_row(&data, row_number),
            EntityType::Assets => validate_asset_row(&data, row_number, registries),
        };

        if !errors.is_empty() {
            row_errors.insert(row_number, errors);
        }
    }

    RowValidation::from_errors(row_errors)
}

// =============================================================================
// Per-entity rule sets
// =============================================================================

fn validate_site_row(row: &RowMap<'_>, row_number: u32, registries: Registries<'_>) -> Vec<String> {
    let mut errors = Vec::new();

    validate_boolean_values(&["primary", "hasUrls", "enabled"], row, row_number, &mut errors);

    let language = cell(row, "language");
    if !language.is_empty() && !is_valid_language_code(language) {
        errors.push(format!(
            "Row {row_number}: \"{language}\" is not a valid language code (e.g., en, en-US, de-DE)."
        ));
    }

    if is_truthy(cell(row, "hasUrls")) && cell(row, "baseUrl").is_empty() {
        errors.push(format!(
            "Row {row_number}: When \"hasUrls\" is true, \"baseUrl\" must be set."
        ));
    }

    let group = cell(row, "group");
    if !group.is_empty() && !site_group_exists(registries.sites, group) {
        errors.push(format!("Row {row_number}: Site group \"{group}\" not found."));
    }

    errors
}

fn validate_entry_type_row(row: &RowMap<'_>, row_number: u32) -> Vec<String> {
    let mut errors = Vec::new();

    validate_boolean_values(&["showSlug", "showStatusField"], row, row_number, &mut errors);

    validate_translation_pair(
        "titleTranslationMethod",
        "titleTranslationKeyFormat",
        row,
        row_number,
        &mut errors,
    );

    // The slug pair only matters when the slug field is shown at all.
    if is_truthy(cell(row, "showSlug")) {
        validate_translation_pair(
            "slugTranslationMethod",
            "slugTranslationKeyFormat",
            row,
            row_number,
            &mut errors,
        );
    }

    errors
}

fn validate_section_row(
    row: &RowMap<'_>,
    row_number: u32,
    registries: Registries<'_>,
) -> Vec<String> {
    let mut errors = Vec::new();

    let raw_type = cell(row, "type");
    let section_type = raw_type.trim().to_lowercase();

    if !section_type.is_empty() && !is_valid_section_type(&section_type) {
        errors.push(format!(
            "Row {row_number}: \"{raw_type}\" is not a valid section type. Must be single, channel, or structure."
        ));
    }

    let propagation_method = cell(row, "propagationMethod");
    if !propagation_method.is_empty() && !is_valid_propagation_method(propagation_method) {
        errors.push(format!(
            "Row {row_number}: \"{propagation_method}\" is not a valid propagation method."
        ));
    }

    // Type-conditional fields.
    let max_levels = cell(row, "maxLevels");
    let default_placement = cell(row, "defaultPlacement");
    let site_home = cell(row, "siteHome");

    match section_type.as_str() {
        "structure" => {
            if !max_levels.is_empty() && !is_positive_integer(max_levels) {
                errors.push(format!(
                    "Row {row_number}: \"maxLevels\" must be a positive integer."
                ));
            }
            if !default_placement.is_empty() && !is_valid_default_placement(default_placement) {
                errors.push(format!(
                    "Row {row_number}: \"{default_placement}\" is not a valid default placement."
                ));
            }
            if !site_home.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"siteHome\" is only allowed for single sections."
                ));
            }
        }
        "single" => {
            validate_boolean_values(&["siteHome"], row, row_number, &mut errors);
            if !max_levels.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"maxLevels\" is only allowed for structure sections."
                ));
            }
            if !default_placement.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"defaultPlacement\" is only allowed for structure sections."
                ));
            }
        }
        "channel" => {
            if !max_levels.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"maxLevels\" is only allowed for structure sections."
                ));
            }
            if !default_placement.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"defaultPlacement\" is only allowed for structure sections."
                ));
            }
            if !site_home.is_empty() {
                errors.push(format!(
                    "Row {row_number}: \"siteHome\" is only allowed for single sections."
                ));
            }
        }
        _ => {}
    }

    let site = cell(row, "site");
    if !site.is_empty() && !registries.sites.site_exists(site) {
        errors.push(format!(
            "Row {row_number}: Site with handle \"{site}\" not found."
        ));
    }

    // A URI needs a template to render; a template needs a URI unless the row
    // is a single or a homepage, which get the __home__ URI at import time.
    let site_uri = cell(row, "siteUri");
    let site_template = cell(row, "siteTemplate");
    if !site_uri.is_empty() && site_template.is_empty() {
        errors.push(format!(
            "Row {row_number}: When \"siteUri\" is set, \"siteTemplate\" must also be set."
        ));
    }
    if !site_template.is_empty()
        && site_uri.is_empty()
        && section_type != "single"
        && !is_truthy(site_home)
    {
        errors.push(format!(
            "Row {row_number}: When \"siteTemplate\" is set, \"siteUri\" must also be set."
        ));
    }

    let entry_types = cell(row, "entryTypes");
    if !entry_types.is_empty() {
        for handle in entry_types.split(',').map(str::trim) {
            if !handle.is_empty() && !registries.entry_types.entry_type_exists(handle) {
                errors.push(format!(
                    "Row {row_number}: Entry type with handle \"{handle}\" not found."
                ));
            }
        }
    }

    validate_boolean_values(&["siteDefaultStatus"], row, row_number, &mut errors);

    errors
}

fn validate_filesystem_row(row: &RowMap<'_>, row_number: u32) -> Vec<String> {
    let mut errors = Vec::new();

    validate_boolean_values(&["publicUrls"], row, row_number, &mut errors);

    if is_truthy(cell(row, "publicUrls")) && cell(row, "baseUrl").is_empty() {
        errors.push(format!(
            "Row {row_number}: When \"publicUrls\" is true, \"baseUrl\" must be set."
        ));
    }

    errors
}

fn validate_asset_row(row: &RowMap<'_>, row_number: u32, registries: Registries<'_>) -> Vec<String> {
    let mut errors = Vec::new();

    let fs_handle = cell(row, "fsHandle");
    if !fs_handle.is_empty() && !registries.filesystems.filesystem_exists(fs_handle) {
        errors.push(format!(
            "Row {row_number}: Filesystem with handle \"{fs_handle}\" not found."
        ));
    }

    let transform_fs_handle = cell(row, "transformFsHandle");
    if !transform_fs_handle.is_empty()
        && !registries.filesystems.filesystem_exists(transform_fs_handle)
    {
        errors.push(format!(
            "Row {row_number}: Transform filesystem with handle \"{transform_fs_handle}\" not found."
        ));
    }

    validate_translation_pair(
        "titleTranslationMethod",
        "titleTranslationKeyFormat",
        row,
        row_number,
        &mut errors,
    );
    validate_translation_pair(
        "altTranslationMethod",
        "altTranslationKeyFormat",
        row,
        row_number,
        &mut errors,
    );

    errors
}

// =============================================================================
// Shared rules
// =============================================================================

fn validate_boolean_values(
    columns: &[&str],
    row: &RowMap<'_>,
    row_number: u32,
    errors: &mut Vec<String>,
) {
    for column in columns {
        let value = cell(row, column);
        if !value.is_empty() && !is_valid_boolean_string(value) {
            errors.push(format!(
                "Row {row_number}: \"{column}\" must be a boolean value (true/false, 1/0, yes/no)."
            ));
        }
    }
}

fn validate_translation_pair(
    method_column: &str,
    format_column: &str,
    row: &RowMap<'_>,
    row_number: u32,
    errors: &mut Vec<String>,
) {
    let method = cell(row, method_column);
    if method.is_empty() {
        return;
    }

    if !is_valid_translation_method(method) {
        errors.push(format!(
            "Row {row_number}: \"{method_column}\" must be a valid translation method."
        ));
        return;
    }

    if is_valid_custom_translation_method(method) && cell(row, format_column).is_empty() {
        errors.push(format!(
            "Row {row_number}: \"{format_column}\" must be set when using custom translation methods."
        ));
    }
}

// =============================================================================
// Tests
// =============================================================================
