//! The resolved skill metadata record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::requirements::Requirements;

/// Normalized metadata for one skill repository.
///
/// Wire names follow the established skill.json conventions, including the
/// camelCase `systemDeps`/`desktopFile` flags. Keys contributed by the
/// package descriptor or the readme that have no typed field land in
/// `extra`, so the record round-trips open-ended sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    pub authorname: String,
    pub foldername: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub url: String,
    pub skillname: String,
    /// License kind; never absent, defaults to `"unknown"`.
    #[serde(default = "default_license")]
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,
    /// Icon URL, or a bare filename when the remote copy was unconfirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(rename = "systemDeps", default)]
    pub system_deps: bool,
    #[serde(rename = "desktopFile", default)]
    pub desktop_file: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_license() -> String {
    "unknown".to_string()
}
