//! Column schema registry: allowed and required CSV columns per entity type.
//!
//! Column validation runs before any row inspection and short-circuits row
//! validation when it fails. Matching is exact and case-sensitive; order of
//! the supplied columns never matters.

use serde::{Deserialize, Serialize};

use crate::models::EntityType;

const SITE_COLUMNS: &[&str] = &[
    "handle", "name", "language", "baseUrl", "primary", "hasUrls", "enabled", "group",
];

const ENTRY_TYPE_COLUMNS: &[&str] = &[
    "handle",
    "name",
    "description",
    "titleTranslationMethod",
    "titleTranslationKeyFormat",
    "showSlug",
    "slugTranslationMethod",
    "slugTranslationKeyFormat",
    "showStatusField",
];

const SECTION_COLUMNS: &[&str] = &[
    "handle",
    "name",
    "type",
    "entryTypes",
    "site",
    "siteUri",
    "siteTemplate",
    "siteHome",
    "siteDefaultStatus",
    "enableVersioning",
    "propagationMethod",
    "maxAuthors",
    "maxLevels",
    "defaultPlacement",
    "enablePreviewTargets",
    "previewTargetLabel",
    "previewTargetUrlFormat",
    "previewTargetAutoRefresh",
];

const FILESYSTEM_COLUMNS: &[&str] = &["handle", "name", "basePath", "publicUrls", "baseUrl"];

const ASSET_COLUMNS: &[&str] = &[
    "handle",
    "name",
    "fsHandle",
    "subpath",
    "transformFsHandle",
    "transformSubpath",
    "titleTranslationMethod",
    "titleTranslationKeyFormat",
    "altTranslationMethod",
    "altTranslationKeyFormat",
];

/// Columns a CSV for the given entity type may carry.
pub fn allowed_columns(entity: EntityType) -> &'static [&'static str] {
    match entity {
        EntityType::Sites => SITE_COLUMNS,
        EntityType::EntryTypes => ENTRY_TYPE_COLUMNS,
        EntityType::Sections => SECTION_COLUMNS,
        EntityType::Filesystems => FILESYSTEM_COLUMNS,
        EntityType::Assets => ASSET_COLUMNS,
    }
}

/// Columns a CSV for the given entity type must carry.
pub fn required_columns(entity: EntityType) -> &'static [&'static str] {
    match entity {
        EntityType::Sites => &["handle", "name", "language"],
        EntityType::EntryTypes => &["handle", "name"],
        EntityType::Sections => &["handle", "name", "type", "entryTypes"],
        EntityType::Filesystems => &["handle", "name", "basePath"],
        EntityType::Assets => &["handle", "name", "fsHandle"],
    }
}

/// Wire names of all supported entity types.
pub fn supported_entity_types() -> Vec<&'static str> {
    EntityType::ALL.iter().map(|e| e.as_str()).collect()
}

/// Outcome of a column-level check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValidation {
    pub valid: bool,
    /// Supplied columns not in the allowed set.
    pub invalid_columns: Vec<String>,
    /// Required columns absent from the supplied set.
    pub missing_required: Vec<String>,
    /// Set only for an unrecognized entity type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ColumnValidation {
    fn unknown_entity_type(entity_type: &str) -> Self {
        Self {
            valid: false,
            invalid_columns: Vec::new(),
            missing_required: Vec::new(),
            error: Some(format!("Unknown element type: {entity_type}")),
        }
    }
}

/// Validate CSV headers against the allowed and required columns for
/// `entity_type`. An unrecognized entity type yields an explicit error result
/// rather than a panic or an `Err`.
pub fn validate_columns(entity_type: &str, columns: &[String]) -> ColumnValidation {
    let Some(entity) = EntityType::parse(entity_type) else {
        return ColumnValidation::unknown_entity_type(entity_type);
    };

    let allowed = allowed_columns(entity);
    let required = required_columns(entity);

    let invalid_columns: Vec<String> = columns
        .iter()
        .filter(|col| !allowed.contains(&col.as_str()))
        .cloned()
        .collect();

    let missing_required: Vec<String> = required
        .iter()
        .filter(|col| !columns.iter().any(|c| c == *col))
        .map(|col| col.to_string())
        .collect();

    ColumnValidation {
        valid: invalid_columns.is_empty() && missing_required.is_empty(),
        invalid_columns,
        missing_required,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_required_is_subset_of_allowed() {
        for entity in EntityType::ALL {
            let allowed = allowed_columns(entity);
            for col in required_columns(entity) {
                assert!(allowed.contains(col), "{entity}: {col} missing from allowed");
            }
        }
    }

    #[test]
    fn test_valid_with_required_only() {
        let result = validate_columns("sites", &cols(&["handle", "name", "language"]));
        assert!(result.valid);
        assert!(result.invalid_columns.is_empty());
        assert!(result.missing_required.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_valid_with_all_allowed() {
        for entity in EntityType::ALL {
            let all: Vec<String> = allowed_columns(entity).iter().map(|s| s.to_string()).collect();
            let result = validate_columns(entity.as_str(), &all);
            assert!(result.valid, "{entity} full column set should validate");
        }
    }

    #[test]
    fn test_invalid_columns_detected() {
        let result = validate_columns(
            "sites",
            &cols(&["handle", "name", "language", "invalidColumn", "anotherInvalid"]),
        );
        assert!(!result.valid);
        assert!(result.invalid_columns.contains(&"invalidColumn".to_string()));
        assert!(result.invalid_columns.contains(&"anotherInvalid".to_string()));
    }

    #[test]
    fn test_missing_required_detected() {
        let result = validate_columns("sites", &cols(&["handle", "name"]));
        assert!(!result.valid);
        assert_eq!(result.missing_required, vec!["language".to_string()]);
    }

    #[test]
    fn test_empty_columns_reports_all_required() {
        let result = validate_columns("sections", &[]);
        assert!(!result.valid);
        assert_eq!(
            result.missing_required,
            cols(&["handle", "name", "type", "entryTypes"])
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let result = validate_columns("filesystems", &cols(&["basePath", "name", "handle"]));
        assert!(result.valid);
    }

    #[test]
    fn test_column_match_is_case_sensitive() {
        let result = validate_columns("sites", &cols(&["Handle", "name", "language"]));
        assert!(!result.valid);
        assert!(result.invalid_columns.contains(&"Handle".to_string()));
        assert!(result.missing_required.contains(&"handle".to_string()));
    }

    #[test]
    fn test_unknown_entity_type() {
        let result = validate_columns("widgets", &cols(&["handle"]));
        assert!(!result.valid);
        assert!(result.invalid_columns.is_empty());
        assert!(result.missing_required.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Unknown element type: widgets")
        );
    }

    #[test]
    fn test_supported_entity_types() {
        assert_eq!(
            supported_entity_types(),
            vec!["sites", "entryTypes", "sections", "filesystems", "assets"]
        );
    }
}
