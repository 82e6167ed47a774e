//! End-to-end pipeline: parse, validate columns, validate rows, transform.
//!
//! Each stage gates the next. A column failure stops before row inspection,
//! a row failure stops before transformation, and only a fully valid file
//! produces records. The report carries whatever stages ran, so callers can
//! serialize it as-is for display.

use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_error, log_info, log_success};
use crate::models::{
    AssetVolumeRecord, EntityType, EntryTypeRecord, FilesystemRecord, SectionRecord, SiteRecord,
};
use crate::parser;
use crate::registry::Registries;
use crate::schema::{validate_columns, ColumnValidation};
use crate::validate::{validate_rows, RowValidation};

use super::{
    transform_assets, transform_entry_types, transform_filesystems, transform_sections,
    transform_sites,
};

/// Records produced by a successful pipeline run, tagged by entity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entityType", content = "records", rename_all = "camelCase")]
pub enum TransformedRecords {
    Sites(Vec<SiteRecord>),
    EntryTypes(Vec<EntryTypeRecord>),
    Sections(Vec<SectionRecord>),
    Filesystems(Vec<FilesystemRecord>),
    Assets(Vec<AssetVolumeRecord>),
}

impl TransformedRecords {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Sites(_) => EntityType::Sites,
            Self::EntryTypes(_) => EntityType::EntryTypes,
            Self::Sections(_) => EntityType::Sections,
            Self::Filesystems(_) => EntityType::Filesystems,
            Self::Assets(_) => EntityType::Assets,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sites(records) => records.len(),
            Self::EntryTypes(records) => records.len(),
            Self::Sections(records) => records.len(),
            Self::Filesystems(records) => records.len(),
            Self::Assets(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a pipeline run. Stages that never ran are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub entity_type: EntityType,
    pub encoding: String,
    pub delimiter: char,
    /// Number of data rows in the file after blank-row filtering.
    pub row_count: usize,
    pub column_validation: ColumnValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_validation: Option<RowValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<TransformedRecords>,
}

impl PipelineReport {
    /// True when every stage ran and passed.
    pub fn valid(&self) -> bool {
        self.records.is_some()
    }
}

/// Run the full pipeline over a CSV file, detecting encoding and delimiter.
pub fn run_file(
    entity_type: &str,
    path: impl AsRef<std::path::Path>,
    registries: Registries<'_>,
) -> PipelineResult<PipelineReport> {
    let path = path.as_ref();
    log_info(format!("Reading {}", path.display()));
    let bytes = std::fs::read(path).map_err(crate::error::CsvError::Io)?;
    run_bytes(entity_type, &bytes, None, registries)
}

/// Run the full pipeline over raw CSV bytes.
pub fn run_bytes(
    entity_type: &str,
    bytes: &[u8],
    delimiter: Option<char>,
    registries: Registries<'_>,
) -> PipelineResult<PipelineReport> {
    let entity = EntityType::parse(entity_type)
        .ok_or_else(|| PipelineError::UnknownEntityType(entity_type.to_string()))?;

    let parsed = parser::parse_bytes(bytes, delimiter)?;
    log_info(format!(
        "Parsed {} rows ({} encoding, '{}' delimiter)",
        parsed.rows.len(),
        parsed.encoding,
        parsed.delimiter
    ));

    let column_validation = validate_columns(entity.as_str(), &parsed.columns);
    if !column_validation.valid {
        log_error(format!("Column check failed for {entity}"));
        return Ok(PipelineReport {
            entity_type: entity,
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
            row_count: parsed.rows.len(),
            column_validation,
            row_validation: None,
            records: None,
        });
    }

    let row_validation = validate_rows(entity.as_str(), &parsed.columns, &parsed.rows, registries);
    if !row_validation.valid {
        log_error(format!(
            "Row check failed for {entity}: {} row(s) with errors",
            row_validation.row_errors.len()
        ));
        return Ok(PipelineReport {
            entity_type: entity,
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
            row_count: parsed.rows.len(),
            column_validation,
            row_validation: Some(row_validation),
            records: None,
        });
    }

    let records = match entity {
        EntityType::Sites => TransformedRecords::Sites(transform_sites(
            &parsed.columns,
            &parsed.rows,
            registries.sites,
        )),
        EntityType::EntryTypes => {
            TransformedRecords::EntryTypes(transform_entry_types(&parsed.columns, &parsed.rows))
        }
        EntityType::Sections => {
            TransformedRecords::Sections(transform_sections(&parsed.columns, &parsed.rows))
        }
        EntityType::Filesystems => {
            TransformedRecords::Filesystems(transform_filesystems(&parsed.columns, &parsed.rows))
        }
        EntityType::Assets => {
            TransformedRecords::Assets(transform_assets(&parsed.columns, &parsed.rows))
        }
    };

    log_success(format!("Transformed {} {} record(s)", records.len(), entity));

    Ok(PipelineReport {
        entity_type: entity,
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        row_count: parsed.rows.len(),
        column_validation,
        row_validation: Some(row_validation),
        records: Some(records),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HostSnapshot;

    #[test]
    fn test_valid_sites_file_end_to_end() {
        let host = HostSnapshot::default().with_site_groups([(1, "Main")]);
        let csv = "handle;name;language;baseUrl;hasUrls\n\
                   default;Default Site;en;@web;true\n\
                   german;German Site;de-DE;@webDe;true";

        let report = run_bytes("sites", csv.as_bytes(), None, host.registries()).unwrap();

        assert!(report.valid());
        assert_eq!(report.delimiter, ';');
        assert_eq!(report.row_count, 2);
        let Some(TransformedRecords::Sites(sites)) = report.records else {
            panic!("expected site records");
        };
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].group_id, Some(1));
        assert_eq!(sites[1].language, "de-DE");
    }

    #[test]
    fn test_invalid_columns_stop_before_rows() {
        let host = HostSnapshot::default();
        let csv = "handle;name;language;bogus\na;A;en;x";

        let report = run_bytes("sites", csv.as_bytes(), None, host.registries()).unwrap();

        assert!(!report.valid());
        assert!(!report.column_validation.valid);
        assert_eq!(
            report.column_validation.invalid_columns,
            vec!["bogus".to_string()]
        );
        assert!(report.row_validation.is_none());
        assert!(report.records.is_none());
    }

    #[test]
    fn test_invalid_rows_stop_before_transform() {
        let host = HostSnapshot::default();
        let csv = "handle,name,basePath,publicUrls,baseUrl\n\
                   test,Test,@webroot/test,true,";

        let report = run_bytes("filesystems", csv.as_bytes(), None, host.registries()).unwrap();

        assert!(!report.valid());
        assert!(report.column_validation.valid);
        let row_validation = report.row_validation.unwrap();
        assert!(!row_validation.valid);
        assert!(row_validation.row_errors[&2][0].contains("baseUrl"));
        assert!(report.records.is_none());
    }

    #[test]
    fn test_sections_grouped_through_pipeline() {
        let host = HostSnapshot::default()
            .with_sites(["default", "german"])
            .with_entry_types(["post"]);
        let csv = "handle;name;type;entryTypes;site;siteUri;siteTemplate\n\
                   blog;Blog;channel;post;default;blog/{slug};blog/_entry\n\
                   blog;Blog;channel;post;german;blog/{slug};blog/_entry";

        let report = run_bytes("sections", csv.as_bytes(), None, host.registries()).unwrap();

        assert!(report.valid());
        let Some(TransformedRecords::Sections(sections)) = report.records else {
            panic!("expected section records");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].site_settings.len(), 2);
    }

    #[test]
    fn test_unknown_entity_type_is_an_error() {
        let host = HostSnapshot::default();
        let result = run_bytes("widgets", b"handle\na", None, host.registries());
        assert!(matches!(result, Err(PipelineError::UnknownEntityType(t)) if t == "widgets"));
    }

    #[test]
    fn test_report_serializes_with_tagged_records() {
        let host = HostSnapshot::default();
        let csv = "handle;name;basePath\nlocal;Local;@webroot/uploads";

        let report = run_bytes("filesystems", csv.as_bytes(), None, host.registries()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["entityType"], "filesystems");
        assert_eq!(json["records"]["entityType"], "filesystems");
        assert_eq!(json["records"]["records"][0]["handle"], "local");
        assert_eq!(json["records"]["records"][0]["basePath"], "@webroot/uploads");
    }
}
