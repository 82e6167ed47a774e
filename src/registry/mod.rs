//! Read-only lookups into the host system's existing configuration.
//!
//! The validator and transformer never mutate the host; they only ask whether
//! handles exist and what site groups are registered. The lookups are passed
//! in explicitly (no ambient globals) so tests and the CLI can run against an
//! in-memory [`HostSnapshot`] loaded from JSON.
//!
//! Lookups must not fail: an unknown handle is simply "not found".

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{RegistryError, RegistryResult};

/// A registered site group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteGroup {
    pub id: i64,
    pub name: String,
}

/// Site lookups: existence by handle, plus the registered groups in order.
pub trait SiteLookup {
    fn site_exists(&self, handle: &str) -> bool;
    fn site_groups(&self) -> Vec<SiteGroup>;
}

/// Entry type existence by handle.
pub trait EntryTypeLookup {
    fn entry_type_exists(&self, handle: &str) -> bool;
}

/// Filesystem existence by handle.
pub trait FilesystemLookup {
    fn filesystem_exists(&self, handle: &str) -> bool;
}

/// Bundle of host lookups threaded through validation and transformation.
#[derive(Clone, Copy)]
pub struct Registries<'a> {
    pub sites: &'a dyn SiteLookup,
    pub entry_types: &'a dyn EntryTypeLookup,
    pub filesystems: &'a dyn FilesystemLookup,
}

/// In-memory snapshot of the host configuration.
///
/// Serializable so the CLI can load one from a JSON file, and cheap to build
/// inline in tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSnapshot {
    /// Handles of existing sites.
    pub sites: Vec<String>,
    /// Registered site groups, in registration order.
    pub site_groups: Vec<SiteGroup>,
    /// Handles of existing entry types.
    pub entry_types: Vec<String>,
    /// Handles of existing filesystems.
    pub filesystems: Vec<String>,
}

impl HostSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// View this snapshot as a lookup bundle.
    pub fn registries(&self) -> Registries<'_> {
        Registries {
            sites: self,
            entry_types: self,
            filesystems: self,
        }
    }

    pub fn with_sites<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sites = handles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_site_groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'static str)>,
    {
        self.site_groups = groups
            .into_iter()
            .map(|(id, name)| SiteGroup {
                id,
                name: name.to_string(),
            })
            .collect();
        self
    }

    pub fn with_entry_types<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_types = handles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filesystems<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filesystems = handles.into_iter().map(Into::into).collect();
        self
    }
}

impl SiteLookup for HostSnapshot {
    fn site_exists(&self, handle: &str) -> bool {
        self.sites.iter().any(|h| h == handle)
    }

    fn site_groups(&self) -> Vec<SiteGroup> {
        self.site_groups.clone()
    }
}

impl EntryTypeLookup for HostSnapshot {
    fn entry_type_exists(&self, handle: &str) -> bool {
        self.entry_types.iter().any(|h| h == handle)
    }
}

impl FilesystemLookup for HostSnapshot {
    fn filesystem_exists(&self, handle: &str) -> bool {
        self.filesystems.iter().any(|h| h == handle)
    }
}

/// Find a site group by exact name.
pub fn find_group_by_name(sites: &dyn SiteLookup, name: &str) -> Option<SiteGroup> {
    sites.site_groups().into_iter().find(|g| g.name == name)
}

/// True when a site group with the given name is registered.
pub fn site_group_exists(sites: &dyn SiteLookup, name: &str) -> bool {
    find_group_by_name(sites, name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookups() {
        let snapshot = HostSnapshot::default()
            .with_sites(["default", "german"])
            .with_site_groups([(1, "Main"), (2, "Marketing")])
            .with_entry_types(["post"])
            .with_filesystems(["local"]);

        assert!(snapshot.site_exists("default"));
        assert!(!snapshot.site_exists("french"));
        assert!(snapshot.entry_type_exists("post"));
        assert!(!snapshot.entry_type_exists("page"));
        assert!(snapshot.filesystem_exists("local"));
        assert!(!snapshot.filesystem_exists("s3"));

        assert!(site_group_exists(&snapshot, "Marketing"));
        assert!(!site_group_exists(&snapshot, "marketing"));
        assert_eq!(find_group_by_name(&snapshot, "Main").map(|g| g.id), Some(1));
    }

    #[test]
    fn test_empty_snapshot_finds_nothing() {
        let snapshot = HostSnapshot::default();
        assert!(!snapshot.site_exists("default"));
        assert!(snapshot.site_groups().is_empty());
        assert!(!site_group_exists(&snapshot, "Main"));
    }

    #[test]
    fn test_snapshot_deserializes_with_missing_fields() {
        let snapshot: HostSnapshot =
            serde_json::from_str(r#"{"sites":["default"]}"#).unwrap();
        assert!(snapshot.site_exists("default"));
        assert!(snapshot.entry_types.is_empty());
    }

    #[test]
    fn test_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.json");
        std::fs::write(
            &path,
            r#"{"sites":["default"],"siteGroups":[{"id":7,"name":"Main"}]}"#,
        )
        .unwrap();

        let snapshot = HostSnapshot::from_file(&path).unwrap();
        assert!(snapshot.site_exists("default"));
        assert_eq!(snapshot.site_groups[0].id, 7);

        assert!(HostSnapshot::from_file(dir.path().join("missing.json")).is_err());
    }
}
