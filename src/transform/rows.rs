//! Per-row transforms: one CSV row becomes one record.

use crate::models::{
    AssetVolumeRecord, EntryTypeRecord, FilesystemRecord, SiteRecord, TranslationMethod,
};
use crate::registry::{find_group_by_name, SiteLookup};

use super::RowView;

/// Transform site rows. Group names are resolved against the host's
/// registered site groups; rows without a group get the first registered
/// group, and an unknown name resolves to `None`.
pub fn transform_sites(
    columns: &[String],
    rows: &[Vec<String>],
    sites: &dyn SiteLookup,
) -> Vec<SiteRecord> {
    rows.iter()
        .map(|row| {
            let view = RowView::new(columns, row);
            SiteRecord {
                handle: view.required("handle"),
                name: view.required("name"),
                language: view.required("language"),
                base_url: view.opt("baseUrl"),
                primary: view.flag_or_false("primary"),
                has_urls: view.flag_or_true("hasUrls"),
                enabled: view.flag_or_true("enabled"),
                group_id: resolve_group_id(view.get("group"), sites),
            }
        })
        .collect()
}

fn resolve_group_id(group_name: &str, sites: &dyn SiteLookup) -> Option<i64> {
    if group_name.is_empty() {
        return sites.site_groups().first().map(|group| group.id);
    }
    find_group_by_name(sites, group_name).map(|group| group.id)
}

pub fn transform_entry_types(columns: &[String], rows: &[Vec<String>]) -> Vec<EntryTypeRecord> {
    rows.iter()
        .map(|row| {
            let view = RowView::new(columns, row);
            EntryTypeRecord {
                handle: view.required("handle"),
                name: view.required("name"),
                description: view.opt("description"),
                title_translation_method: translation_method(&view, "titleTranslationMethod"),
                title_translation_key_format: view.opt("titleTranslationKeyFormat"),
                show_slug: view.flag_or_true("showSlug"),
                slug_translation_method: translation_method(&view, "slugTranslationMethod"),
                slug_translation_key_format: view.opt("slugTranslationKeyFormat"),
                show_status_field: view.flag_or_true("showStatusField"),
            }
        })
        .collect()
}

pub fn transform_filesystems(columns: &[String], rows: &[Vec<String>]) -> Vec<FilesystemRecord> {
    rows.iter()
        .map(|row| {
            let view = RowView::new(columns, row);
            FilesystemRecord {
                handle: view.required("handle"),
                name: view.required("name"),
                base_path: view.required("basePath"),
                has_urls: view.flag_or_false("publicUrls"),
                url: view.opt("baseUrl"),
            }
        })
        .collect()
}

pub fn transform_assets(columns: &[String], rows: &[Vec<String>]) -> Vec<AssetVolumeRecord> {
    rows.iter()
        .map(|row| {
            let view = RowView::new(columns, row);
            AssetVolumeRecord {
                handle: view.required("handle"),
                name: view.required("name"),
                fs_handle: view.required("fsHandle"),
                subpath: view.opt("subpath"),
                transform_fs_handle: view.opt("transformFsHandle"),
                transform_subpath: view.opt("transformSubpath"),
                title_translation_method: translation_method(&view, "titleTranslationMethod"),
                title_translation_key_format: view.opt("titleTranslationKeyFormat"),
                alt_translation_method: translation_method(&view, "altTranslationMethod"),
                alt_translation_key_format: view.opt("altTranslationKeyFormat"),
            }
        })
        .collect()
}

/// Read a translation method cell, accepting both tokens and display labels.
/// Empty or unparseable cells fall back to per-site translation.
pub(crate) fn translation_method(view: &RowView<'_>, column: &str) -> TranslationMethod {
    TranslationMethod::parse(view.get(column)).unwrap_or(TranslationMethod::Site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HostSnapshot;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_minimal_site_gets_defaults() {
        let host = HostSnapshot::default();
        let records = transform_sites(
            &cols(&["handle", "name", "language"]),
            &rows(&[&["default", "Default Site", "en"]]),
            &host,
        );

        assert_eq!(records.len(), 1);
        let site = &records[0];
        assert_eq!(site.handle, "default");
        assert!(!site.primary);
        assert!(site.has_urls);
        assert!(site.enabled);
        assert_eq!(site.base_url, None);
        assert_eq!(site.group_id, None);
    }

    #[test]
    fn test_site_empty_group_uses_first_registered() {
        let host = HostSnapshot::default().with_site_groups([(7, "Main"), (9, "Satellites")]);
        let records = transform_sites(
            &cols(&["handle", "name", "language", "group"]),
            &rows(&[
                &["default", "Default", "en", ""],
                &["de", "German", "de", "Satellites"],
                &["fr", "French", "fr", "Unknown"],
            ]),
            &host,
        );

        assert_eq!(records[0].group_id, Some(7));
        assert_eq!(records[1].group_id, Some(9));
        assert_eq!(records[2].group_id, None);
    }

    #[test]
    fn test_site_explicit_flags() {
        let host = HostSnapshot::default();
        let records = transform_sites(
            &cols(&["handle", "name", "language", "primary", "hasUrls", "enabled", "baseUrl"]),
            &rows(&[&["default", "Default", "en", "yes", "false", "0", "@web"]]),
            &host,
        );

        let site = &records[0];
        assert!(site.primary);
        assert!(!site.has_urls);
        assert!(!site.enabled);
        assert_eq!(site.base_url.as_deref(), Some("@web"));
    }

    #[test]
    fn test_entry_type_translation_labels_normalized() {
        let records = transform_entry_types(
            &cols(&["handle", "name", "titleTranslationMethod", "slugTranslationMethod"]),
            &rows(&[&["article", "Article", "Translate for each site group", "custom"]]),
        );

        let entry_type = &records[0];
        assert_eq!(entry_type.title_translation_method, TranslationMethod::SiteGroup);
        assert_eq!(entry_type.slug_translation_method, TranslationMethod::Custom);
        assert!(entry_type.show_slug);
        assert!(entry_type.show_status_field);
    }

    #[test]
    fn test_entry_type_missing_method_defaults_to_site() {
        let records = transform_entry_types(
            &cols(&["handle", "name"]),
            &rows(&[&["article", "Article"]]),
        );
        assert_eq!(records[0].title_translation_method, TranslationMethod::Site);
        assert_eq!(records[0].slug_translation_method, TranslationMethod::Site);
        assert_eq!(records[0].description, None);
    }

    #[test]
    fn test_filesystem_url_only_with_public_urls() {
        let records = transform_filesystems(
            &cols(&["handle", "name", "basePath", "publicUrls", "baseUrl"]),
            &rows(&[
                &["web", "Web", "@webroot/uploads", "true", "@web/uploads"],
                &["private", "Private", "@root/private", "", ""],
            ]),
        );

        assert!(records[0].has_urls);
        assert_eq!(records[0].url.as_deref(), Some("@web/uploads"));
        assert!(!records[1].has_urls);
        assert_eq!(records[1].url, None);
    }

    #[test]
    fn test_asset_optional_fields() {
        let records = transform_assets(
            &cols(&["handle", "name", "fsHandle", "subpath", "transformFsHandle"]),
            &rows(&[&["images", "Images", "local", "img", ""]]),
        );

        let volume = &records[0];
        assert_eq!(volume.fs_handle, "local");
        assert_eq!(volume.subpath.as_deref(), Some("img"));
        assert_eq!(volume.transform_fs_handle, None);
        assert_eq!(volume.title_translation_method, TranslationMethod::Site);
    }
}
