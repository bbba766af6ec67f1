//! Version registry (`versions.json`) for the versioned docs deployment.
//!
//! # Document
//!
//! ```json
//! {
//!   "latest": {
//!     "path": "/latest/",
//!     "label": "Latest (main)",
//!     "version": "main",
//!     "updated": "2025-01-01T12:00:00Z"
//!   },
//!   "stable": "v0.2.1",
//!   "versions": [
//!     { "version": "v0.2.1", "path": "/v0.2.1/", "label": "0.2.1", "releaseDate": "..." },
//!     { "version": "v0.2.0", "path": "/v0.2.0/", "label": "0.2.0", "releaseDate": "..." }
//!   ]
//! }
//! ```
//!
//! Each run loads the document (or starts from the default), applies exactly
//! one [`Update`], and writes the whole document back.

mod error;

pub use error::RegistryError;

use crate::utils::{date, version::VersionKey};
use chrono::{DateTime, Utc};
use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{cmp::Reverse, fs, path::Path};

/// Version argument selecting the rolling snapshot instead of a release.
pub const LATEST_TOKEN: &str = "latest";

// ============================================================================
// Document Types
// ============================================================================

/// Root of `versions.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub latest: Latest,

    /// Version of the newest release, `None` until the first release.
    #[serde(default)]
    pub stable: Option<String>,

    /// Releases, newest first.
    #[serde(default)]
    pub versions: Vec<Release>,

    /// Fields written by other tooling, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rolling snapshot built from the main branch.
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default)]
pub struct Latest {
    #[educe(Default = "/latest/")]
    pub path: String,

    #[educe(Default = "Latest")]
    pub label: String,

    #[educe(Default = "main")]
    pub version: String,

    /// Last deploy of the snapshot.
    pub updated: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One published release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub version: String,
    pub path: String,
    pub label: String,
    pub release_date: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Release {
    pub fn new(version: &str, label: &str, released: DateTime<Utc>) -> Self {
        Self {
            version: version.to_owned(),
            path: format!("/{version}/"),
            label: label.to_owned(),
            release_date: date::to_iso_utc(released),
            extra: Map::new(),
        }
    }

    pub fn key(&self) -> VersionKey {
        VersionKey::parse(&self.version)
    }
}

// ============================================================================
// Updates
// ============================================================================

/// The single mutation applied per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update<'a> {
    /// Refresh the rolling snapshot.
    Latest { label: &'a str },
    /// Add or replace a release.
    Release { version: &'a str, label: &'a str },
}

impl<'a> Update<'a> {
    /// `latest` selects the snapshot; anything else is a release id.
    pub fn new(version: &'a str, label: &'a str) -> Self {
        if version == LATEST_TOKEN {
            Self::Latest { label }
        } else {
            Self::Release { version, label }
        }
    }

    /// Version string as given on the command line.
    pub const fn version(&self) -> &'a str {
        match *self {
            Self::Latest { .. } => LATEST_TOKEN,
            Self::Release { version, .. } => version,
        }
    }
}

impl Registry {
    /// Load from `path`, or start from the default document if absent.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|err| RegistryError::Read(path.to_path_buf(), err))?;
        serde_json::from_str(&content).map_err(|err| RegistryError::Parse(path.to_path_buf(), err))
    }

    /// Write the whole document as 2-space indented JSON.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| RegistryError::Write(path.to_path_buf(), err))?;
        }
        fs::write(path, json).map_err(|err| RegistryError::Write(path.to_path_buf(), err))
    }

    pub fn apply(&mut self, update: Update<'_>, now: DateTime<Utc>) {
        match update {
            Update::Latest { label } => self.touch_latest(label, now),
            Update::Release { version, label } => self.release(version, label, now),
        }
    }

    /// Stamp the snapshot. Releases and `stable` are left alone.
    pub fn touch_latest(&mut self, label: &str, now: DateTime<Utc>) {
        self.latest.updated = Some(date::to_iso_utc(now));
        self.latest.label = label.to_owned();
    }

    /// Insert `version`, replacing any record with the same id, then re-rank.
    pub fn release(&mut self, version: &str, label: &str, now: DateTime<Utc>) {
        self.versions.retain(|r| r.version != version);
        self.versions.push(Release::new(version, label, now));
        self.sort_versions();
    }

    /// Stable sort, newest first; unparseable ids keep their relative order
    /// at the tail.
    fn sort_versions(&mut self) {
        self.versions.sort_by_key(|r| Reverse(r.key()));
        self.stable = self.versions.first().map(|r| r.version.clone());
    }
}

/// Load the registry at `path`, apply `update`, and save it back.
pub fn update_registry(
    path: &Path,
    update: Update<'_>,
    now: DateTime<Utc>,
) -> Result<Registry, RegistryError> {
    let mut registry = Registry::load(path)?;
    registry.apply(update, now);
    registry.save(path)?;
    Ok(registry)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    fn versions(registry: &Registry) -> Vec<&str> {
        registry.versions.iter().map(|r| r.version.as_str()).collect()
    }

    fn released(list: &[&str]) -> Registry {
        let mut registry = Registry::default();
        for v in list {
            registry.release(v, v, at(1));
        }
        registry
    }

    // ------------------------------------------------------------------------
    // Defaults and mode selection
    // ------------------------------------------------------------------------

    #[test]
    fn test_default_document() {
        let registry = Registry::default();

        assert_eq!(registry.latest.path, "/latest/");
        assert_eq!(registry.latest.version, "main");
        assert_eq!(registry.latest.updated, None);
        assert_eq!(registry.stable, None);
        assert!(registry.versions.is_empty());
    }

    #[test]
    fn test_default_document_json_shape() {
        let json = serde_json::to_value(Registry::default()).unwrap();

        assert_eq!(json["latest"]["path"], "/latest/");
        assert_eq!(json["latest"]["version"], "main");
        assert!(json["latest"]["updated"].is_null());
        assert!(json["stable"].is_null());
        assert_eq!(json["versions"], serde_json::json!([]));
    }

    #[test]
    fn test_update_mode_selection() {
        assert_eq!(Update::new("latest", "L"), Update::Latest { label: "L" });
        assert_eq!(
            Update::new("v1.0.0", "1.0"),
            Update::Release { version: "v1.0.0", label: "1.0" }
        );
        // Only the exact token selects the snapshot
        assert!(matches!(Update::new("Latest", "L"), Update::Release { .. }));
        assert_eq!(Update::new("latest", "L").version(), "latest");
    }

    // ------------------------------------------------------------------------
    // Latest-snapshot mode
    // ------------------------------------------------------------------------

    #[test]
    fn test_touch_latest_leaves_releases_alone() {
        let mut registry = released(&["v0.1.0", "v0.2.0"]);
        let before = registry.versions.clone();

        registry.apply(Update::new("latest", "Latest (main)"), at(3));

        assert_eq!(registry.latest.label, "Latest (main)");
        assert_eq!(registry.latest.updated.as_deref(), Some("2025-06-03T12:00:00Z"));
        assert_eq!(registry.versions, before);
        assert_eq!(registry.stable.as_deref(), Some("v0.2.0"));
    }

    #[test]
    fn test_touch_latest_on_empty_keeps_stable_null() {
        let mut registry = Registry::default();
        registry.apply(Update::new("latest", "Snapshot"), at(3));

        assert_eq!(registry.stable, None);
        assert!(registry.versions.is_empty());
    }

    // ------------------------------------------------------------------------
    // Release mode
    // ------------------------------------------------------------------------

    #[test]
    fn test_release_record_shape() {
        let mut registry = Registry::default();
        registry.apply(Update::new("v1.2.3", "1.2.3"), at(2));

        let record = &registry.versions[0];
        assert_eq!(record.version, "v1.2.3");
        assert_eq!(record.path, "/v1.2.3/");
        assert_eq!(record.label, "1.2.3");
        assert_eq!(record.release_date, "2025-06-02T12:00:00Z");
        assert_eq!(registry.stable.as_deref(), Some("v1.2.3"));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut registry = released(&["v0.1.0", "v0.2.0"]);
        registry.release("v0.1.0", "first label", at(2));
        registry.release("v0.1.0", "second label", at(3));

        let matching: Vec<_> = registry.versions.iter().filter(|r| r.version == "v0.1.0").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].label, "second label");
        assert_eq!(registry.versions.len(), 2);
    }

    #[test]
    fn test_release_sorts_numerically() {
        let registry = released(&["v0.1.9", "v0.1.10", "v0.1.2"]);
        assert_eq!(versions(&registry), vec!["v0.1.10", "v0.1.9", "v0.1.2"]);
    }

    #[test]
    fn test_stable_tracks_first_release() {
        let mut registry = released(&["v1.0.0"]);
        assert_eq!(registry.stable.as_deref(), Some("v1.0.0"));

        // Backport release does not take over stable
        registry.release("v0.9.5", "0.9.5", at(2));
        assert_eq!(registry.stable.as_deref(), Some("v1.0.0"));

        registry.release("v1.1.0", "1.1.0", at(3));
        assert_eq!(registry.stable.as_deref(), Some("v1.1.0"));
        assert_eq!(registry.stable.as_deref(), Some(registry.versions[0].version.as_str()));
    }

    #[test]
    fn test_unparseable_versions_sort_last_in_order() {
        let registry = released(&["banana", "v0.1.0", "nightly", "v0.0.1"]);
        assert_eq!(versions(&registry), vec!["v0.1.0", "v0.0.1", "banana", "nightly"]);
        assert_eq!(registry.stable.as_deref(), Some("v0.1.0"));
    }

    #[test]
    fn test_only_unparseable_versions() {
        let registry = released(&["banana"]);
        assert_eq!(registry.stable.as_deref(), Some("banana"));
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::load(&dir.path().join("versions.json")).unwrap();
        assert_eq!(registry, Registry::default());
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(&path, "{ not json").unwrap();

        let result = Registry::load(&path);
        assert!(matches!(result, Err(RegistryError::Parse(..))));
    }

    #[test]
    fn test_save_pretty_two_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");

        released(&["v1.0.0"]).save(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("{\n  \"latest\": {\n    \"path\": \"/latest/\""));
        assert!(content.contains("\"releaseDate\": \"2025-06-01T12:00:00Z\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site/versions.json");

        Registry::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_roundtrip_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(
            &path,
            r#"{
              "latest": { "path": "/latest/", "label": "L", "version": "main", "updated": null, "badge": "dev" },
              "stable": "v0.1.0",
              "versions": [
                { "version": "v0.1.0", "path": "/v0.1.0/", "label": "0.1.0", "releaseDate": "2024-01-01T00:00:00Z", "eol": true }
              ],
              "generator": "ci"
            }"#,
        )
        .unwrap();

        let registry = update_registry(&path, Update::new("v0.2.0", "0.2.0"), at(4)).unwrap();
        assert_eq!(versions(&registry), vec!["v0.2.0", "v0.1.0"]);

        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["generator"], "ci");
        assert_eq!(json["latest"]["badge"], "dev");
        assert_eq!(json["versions"][1]["eol"], true);
        assert_eq!(json["stable"], "v0.2.0");
    }

    #[test]
    fn test_load_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(&path, r#"{ "latest": { "label": "Snapshot" } }"#).unwrap();

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.latest.label, "Snapshot");
        assert_eq!(registry.latest.path, "/latest/");
        assert_eq!(registry.stable, None);
        assert!(registry.versions.is_empty());
    }

    #[test]
    fn test_update_registry_failure_keeps_old_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(&path, "[1, 2").unwrap();

        let result = update_registry(&path, Update::new("v1.0.0", "1.0.0"), at(5));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }

    #[test]
    fn test_update_registry_rerun_same_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");

        update_registry(&path, Update::new("v0.3.0", "old"), at(1)).unwrap();
        update_registry(&path, Update::new("v0.3.0", "new"), at(2)).unwrap();

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.versions.len(), 1);
        assert_eq!(registry.versions[0].label, "new");
        assert_eq!(registry.versions[0].release_date, "2025-06-02T12:00:00Z");
    }
}
