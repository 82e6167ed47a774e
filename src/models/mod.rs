//! Record types produced by the transformer and consumed by importers.
//!
//! Every record is an immutable value shape keyed by `handle` (the natural
//! key used for upsert matching). Records serialize to camelCase JSON so a
//! host system can hand them through a queue and rehydrate them unchanged:
//!
//! - [`SiteRecord`] - a site with locale and URL settings
//! - [`EntryTypeRecord`] - an entry type with title/slug translation settings
//! - [`SectionRecord`] - a section, its site settings and preview targets
//! - [`FilesystemRecord`] - a local filesystem definition
//! - [`AssetVolumeRecord`] - an asset volume bound to a filesystem
//!
//! The enums ([`TranslationMethod`], [`SectionType`], [`PropagationMethod`],
//! [`DefaultPlacement`]) each accept both their internal token and the
//! human-readable label a CMS control panel shows, via `parse`.

use serde::{Deserialize, Serialize};

/// URI format sentinel for homepage entries, applied at import time.
pub const HOME_URI: &str = "__home__";

// =============================================================================
// Entity Types
// =============================================================================

/// The five supported import targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Sites,
    EntryTypes,
    Sections,
    Filesystems,
    Assets,
}

impl EntityType {
    /// All supported entity types, in display order.
    pub const ALL: [EntityType; 5] = [
        EntityType::Sites,
        EntityType::EntryTypes,
        EntityType::Sections,
        EntityType::Filesystems,
        EntityType::Assets,
    ];

    /// Parse the wire name (`sites`, `entryTypes`, ...). Exact match.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sites" => Some(Self::Sites),
            "entryTypes" => Some(Self::EntryTypes),
            "sections" => Some(Self::Sections),
            "filesystems" => Some(Self::Filesystems),
            "assets" => Some(Self::Assets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sites => "sites",
            Self::EntryTypes => "entryTypes",
            Self::Sections => "sections",
            Self::Filesystems => "filesystems",
            Self::Assets => "assets",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Translation Method
// =============================================================================

/// Policy controlling whether/how a field's value varies per site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationMethod {
    None,
    Site,
    SiteGroup,
    Language,
    Custom,
}

impl TranslationMethod {
    /// Parse an internal token or a control-panel label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" | "Not translatable" => Some(Self::None),
            "site" | "Translate for each site" => Some(Self::Site),
            "siteGroup" | "Translate for each site group" => Some(Self::SiteGroup),
            "language" | "Translate for each language" => Some(Self::Language),
            "custom" | "Custom…" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Site => "site",
            Self::SiteGroup => "siteGroup",
            Self::Language => "language",
            Self::Custom => "custom",
        }
    }
}

// =============================================================================
// Section Type
// =============================================================================

/// Structural kind of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Single,
    Channel,
    Structure,
}

impl SectionType {
    /// Parse the lowercase token. Callers lowercase/trim raw CSV cells first.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "channel" => Some(Self::Channel),
            "structure" => Some(Self::Structure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Channel => "channel",
            Self::Structure => "structure",
        }
    }
}

// =============================================================================
// Propagation Method
// =============================================================================

/// Policy controlling which sites an entry is automatically saved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropagationMethod {
    None,
    SiteGroup,
    Language,
    All,
    Custom,
}

impl PropagationMethod {
    /// Parse an internal token or a control-panel label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" | "Only save entries to the site they were created in" => Some(Self::None),
            "siteGroup" | "Save entries to other sites in the same site group" => {
                Some(Self::SiteGroup)
            }
            "language" | "Save entries to other sites with the same language" => {
                Some(Self::Language)
            }
            "all" | "Save entries to all sites enabled for this section" => Some(Self::All),
            "custom" | "Let each entry choose which sites it should be saved to" => {
                Some(Self::Custom)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SiteGroup => "siteGroup",
            Self::Language => "language",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }
}

// =============================================================================
// Default Placement
// =============================================================================

/// Where new structure entries land within their level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPlacement {
    Beginning,
    End,
}

impl DefaultPlacement {
    /// Parse an internal token or a control-panel label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginning" | "Before other entries" => Some(Self::Beginning),
            "end" | "After other entries" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginning => "beginning",
            Self::End => "end",
        }
    }
}

// =============================================================================
// Site
// =============================================================================

/// A site ready for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub handle: String,
    pub name: String,
    /// Locale code, e.g. `en` or `de-DE`.
    pub language: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default = "default_true")]
    pub has_urls: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Resolved site group id; `None` when the named group was not found.
    #[serde(default)]
    pub group_id: Option<i64>,
}

// =============================================================================
// Entry Type
// =============================================================================

/// An entry type ready for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTypeRecord {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_translation_method")]
    pub title_translation_method: TranslationMethod,
    #[serde(default)]
    pub title_translation_key_format: Option<String>,
    #[serde(default = "default_true")]
    pub show_slug: bool,
    #[serde(default = "default_translation_method")]
    pub slug_translation_method: TranslationMethod,
    #[serde(default)]
    pub slug_translation_key_format: Option<String>,
    #[serde(default = "default_true")]
    pub show_status_field: bool,
}

// =============================================================================
// Section
// =============================================================================

/// A section ready for import, with per-site settings and preview targets
/// collected from every CSV row sharing the section's handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub handle: String,
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default)]
    pub entry_type_handles: Vec<String>,
    #[serde(default)]
    pub site_settings: Vec<SiteSettingsRecord>,
    #[serde(default = "default_propagation_method")]
    pub propagation_method: PropagationMethod,
    #[serde(default = "default_max_authors")]
    pub max_authors: u32,
    /// Structure sections only.
    #[serde(default)]
    pub max_levels: Option<u32>,
    /// Structure sections only.
    #[serde(default)]
    pub default_placement: Option<DefaultPlacement>,
    #[serde(default = "default_true")]
    pub enable_versioning: bool,
    #[serde(default = "default_true")]
    pub enable_preview_targets: bool,
    #[serde(default)]
    pub preview_targets: Vec<PreviewTargetRecord>,
}

/// Per-site settings nested in a [`SectionRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsRecord {
    pub site_handle: String,
    #[serde(default)]
    pub uri_format: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default = "default_true")]
    pub enabled_by_default: bool,
    #[serde(default)]
    pub is_homepage: bool,
}

impl SiteSettingsRecord {
    /// The URI format an importer should persist. Homepage entries always use
    /// the [`HOME_URI`] sentinel, regardless of any `uriFormat` cell.
    pub fn import_uri_format(&self) -> Option<String> {
        if self.is_homepage {
            Some(HOME_URI.to_string())
        } else {
            self.uri_format.clone()
        }
    }

    /// Whether the site settings give entries routable URLs: true when an
    /// effective URI format or a template is present.
    pub fn import_has_urls(&self) -> bool {
        self.import_uri_format().is_some() || self.template.is_some()
    }
}

/// A live-preview target nested in a [`SectionRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTargetRecord {
    pub label: String,
    pub url_format: String,
    #[serde(default = "default_true")]
    pub refresh: bool,
}

// =============================================================================
// Filesystem
// =============================================================================

/// A local filesystem ready for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemRecord {
    pub handle: String,
    pub name: String,
    pub base_path: String,
    #[serde(default)]
    pub has_urls: bool,
    #[serde(default)]
    pub url: Option<String>,
}

// =============================================================================
// Asset Volume
// =============================================================================

/// An asset volume ready for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetVolumeRecord {
    pub handle: String,
    pub name: String,
    pub fs_handle: String,
    #[serde(default)]
    pub subpath: Option<String>,
    #[serde(default)]
    pub transform_fs_handle: Option<String>,
    #[serde(default)]
    pub transform_subpath: Option<String>,
    #[serde(default = "default_translation_method")]
    pub title_translation_method: TranslationMethod,
    #[serde(default)]
    pub title_translation_key_format: Option<String>,
    #[serde(default = "default_translation_method")]
    pub alt_translation_method: TranslationMethod,
    #[serde(default)]
    pub alt_translation_key_format: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_translation_method() -> TranslationMethod {
    TranslationMethod::Site
}

fn default_propagation_method() -> PropagationMethod {
    PropagationMethod::All
}

fn default_max_authors() -> u32 {
    1
}

// =============================================================================
// Tests
// =============================================================================
