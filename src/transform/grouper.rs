//! Section grouping: CSV rows sharing a handle collapse into one section.
//!
//! Section-level properties come from the group's first row. Every row with
//! a non-empty `site` cell contributes one per-site settings entry, and rows
//! with both preview target cells contribute preview targets. Sections are
//! emitted in the order their handles first appear in the file.

use std::collections::HashMap;

use crate::models::{
    DefaultPlacement, PropagationMethod, PreviewTargetRecord, SectionRecord, SectionType,
    SiteSettingsRecord,
};

use super::RowView;

pub fn transform_sections(columns: &[String], rows: &[Vec<String>]) -> Vec<SectionRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<RowView<'_>>> = HashMap::new();

    for row in rows {
        let view = RowView::new(columns, row);
        let handle = view.get("handle").to_string();
        if !grouped.contains_key(&handle) {
            order.push(handle.clone());
        }
        grouped.entry(handle).or_default().push(view);
    }

    order
        .iter()
        .filter_map(|handle| grouped.get(handle))
        .map(|group| transform_group(group))
        .collect()
}

fn transform_group(group: &[RowView<'_>]) -> SectionRecord {
    let first = &group[0];

    let entry_type_handles: Vec<String> = first
        .get("entryTypes")
        .split(',')
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(str::to_string)
        .collect();

    let site_settings: Vec<SiteSettingsRecord> = group
        .iter()
        .filter(|view| !view.get("site").is_empty())
        .map(|view| SiteSettingsRecord {
            site_handle: view.required("site"),
            uri_format: view.opt("siteUri"),
            template: view.opt("siteTemplate"),
            enabled_by_default: view.flag_or_true("siteDefaultStatus"),
            is_homepage: view.flag_or_false("siteHome"),
        })
        .collect();

    let enable_preview_targets = first.flag_or_true("enablePreviewTargets");

    let preview_targets: Vec<PreviewTargetRecord> = if enable_preview_targets {
        group
            .iter()
            .filter(|view| {
                !view.get("previewTargetLabel").is_empty()
                    && !view.get("previewTargetUrlFormat").is_empty()
            })
            .map(|view| PreviewTargetRecord {
                label: view.required("previewTargetLabel"),
                url_format: view.required("previewTargetUrlFormat"),
                refresh: view.flag_or_true("previewTargetAutoRefresh"),
            })
            .collect()
    } else {
        Vec::new()
    };

    SectionRecord {
        handle: first.required("handle"),
        name: first.required("name"),
        section_type: SectionType::parse(&first.get("type").trim().to_lowercase())
            .unwrap_or(SectionType::Channel),
        entry_type_handles,
        site_settings,
        propagation_method: PropagationMethod::parse(first.get("propagationMethod"))
            .unwrap_or(PropagationMethod::All),
        max_authors: first
            .get("maxAuthors")
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(1),
        max_levels: first.get("maxLevels").parse::<u32>().ok().filter(|&n| n > 0),
        default_placement: DefaultPlacement::parse(first.get("defaultPlacement")),
        enable_versioning: first.flag_or_true("enableVersioning"),
        enable_preview_targets,
        preview_targets,
    }
}
