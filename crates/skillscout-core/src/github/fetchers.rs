//! Artifact fetchers: resolved location to validated content.
//!
//! Text artifacts come back opaque. Structured artifacts are decoded here,
//! and a document that fails to decode is reported as the artifact's
//! NotFound kind rather than as a transport error. A fetch that fails in
//! flight maps to the same NotFound kind; there is no retry at this layer.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::convert;
use crate::error::{ResolveError, Result};
use crate::licenses;
use crate::requirements::Requirements;
use crate::transport::Transport;

use super::{locators, urls};

fn get_text(transport: &dyn Transport, url: &str) -> Option<String> {
    transport
        .get(url)
        .ok()
        .filter(|r| r.is_success())
        .map(|r| r.body)
}

/// Raw readme text.
pub fn fetch_readme(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let located = locators::locate_readme(transport, url, branch)?;
    get_text(transport, &located).ok_or(ResolveError::ReadmeNotFound)
}

/// Readme-derived partial record.
pub fn fetch_readme_record(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Map<String, Value>> {
    Ok(convert::readme_to_record(&fetch_readme(transport, url, branch)?))
}

/// Raw license text.
pub fn fetch_license(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let located = locators::locate_license(transport, url, branch)?;
    get_text(transport, &located).ok_or(ResolveError::LicenseNotFound)
}

/// License kind plus the raw text it was classified from.
pub fn fetch_license_data(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<(String, String)> {
    let text = fetch_license(transport, url, branch)?;
    Ok((licenses::classify(&text), text))
}

/// Raw desktop-entry text.
pub fn fetch_desktop(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let located = locators::locate_desktop(transport, url, branch)?;
    get_text(transport, &located).ok_or(ResolveError::DesktopNotFound)
}

/// Desktop-entry-derived record.
pub fn fetch_desktop_record(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Map<String, Value>> {
    Ok(convert::desktop_to_record(&fetch_desktop(transport, url, branch)?))
}

/// Direct download link for `url`, confirmed to exist.
///
/// A blob URL resolves to its raw-content form. A repository URL renders
/// the branch archive link for the given or URL-embedded branch and
/// probes it before handing it back.
pub fn download_url(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    if let Ok(raw) = urls::blob_to_raw(url) {
        return Ok(raw);
    }
    let archive = urls::match_url_template(url, urls::DOWNLOAD, branch)?;
    if transport.exists(&archive) {
        return Ok(archive);
    }
    Err(ResolveError::InvalidUrl(url.to_string()))
}

/// Package descriptor JSON as a mapping.
///
/// Decode failures and empty or non-object documents are `JsonNotFound`.
pub fn fetch_skill_json(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Map<String, Value>> {
    let located = locators::locate_skill_json(transport, url, branch)?;
    let body = get_text(transport, &located).ok_or(ResolveError::JsonNotFound)?;
    let value: Value = serde_json::from_str(&body).map_err(|_| ResolveError::JsonNotFound)?;
    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        _ => Err(ResolveError::JsonNotFound),
    }
}

/// Non-comment, non-blank lines of the flat python requirements file.
pub fn fetch_requirements(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Vec<String>> {
    let located = locators::locate_requirements(transport, url, branch)?;
    let body = get_text(transport, &located).ok_or(ResolveError::RequirementsNotFound)?;
    Ok(requirement_lines(&body))
}

/// Non-comment, non-blank lines of the skill requirements file.
pub fn fetch_skill_requirements(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Vec<String>> {
    let located = locators::locate_skill_requirements(transport, url, branch)?;
    let body = get_text(transport, &located).ok_or(ResolveError::SkillRequirementsNotFound)?;
    Ok(requirement_lines(&body))
}

fn requirement_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct ManifestGroups {
    #[serde(default)]
    python: Option<Vec<String>>,
    #[serde(default)]
    system: Option<Map<String, Value>>,
    #[serde(default)]
    skill: Option<Vec<String>>,
}

impl ManifestGroups {
    fn into_requirements(self) -> Requirements {
        Requirements {
            python: self.python.unwrap_or_default(),
            system: self.system.unwrap_or_default(),
            skill: self.skill.unwrap_or_default(),
        }
    }

    fn declares_any(&self) -> bool {
        self.python.is_some() || self.system.is_some() || self.skill.is_some()
    }
}

/// Dependency manifest, validated and recovered when malformed.
///
/// The document must carry a top-level `dependencies` key. Manifests in
/// the wild sometimes declare the groups at the top level instead, so that
/// shape is accepted with a warning. A document with neither shape, or one
/// that is empty (comment-only templates decode to null), is
/// `InvalidManifest`.
pub fn fetch_manifest(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<Requirements> {
    let located = locators::locate_manifest(transport, url, branch)?;
    let body = get_text(transport, &located).ok_or(ResolveError::ManifestNotFound)?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&body).map_err(|_| ResolveError::InvalidManifest(located.clone()))?;
    if document.is_null() {
        return Err(ResolveError::InvalidManifest(located));
    }
    if let Some(dependencies) = document.get("dependencies") {
        if dependencies.is_null() {
            return Ok(Requirements::default());
        }
        let groups: ManifestGroups = serde_yaml::from_value(dependencies.clone())
            .map_err(|_| ResolveError::InvalidManifest(located))?;
        return Ok(groups.into_requirements());
    }
    warn!(url = %located, "manifest missing dependencies key, attempting recovery");
    let groups: ManifestGroups = serde_yaml::from_value(document)
        .map_err(|_| ResolveError::InvalidManifest(located.clone()))?;
    if !groups.declares_any() {
        return Err(ResolveError::InvalidManifest(located));
    }
    Ok(groups.into_requirements())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use std::collections::HashMap;

    struct Canned(HashMap<String, String>);

    impl Canned {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
            )
        }
    }

    impl Transport for Canned {
        fn get(&self, url: &str) -> anyhow::Result<HttpResponse> {
            match self.0.get(url) {
                Some(body) => Ok(HttpResponse {
                    status: 200,
                    body: body.clone(),
                }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                }),
            }
        }
    }

    const REPO: &str = "https://github.com/org/repo";

    #[test]
    fn download_url_converts_blob_references() {
        let transport = Canned::new(&[]);
        let found = download_url(
            &transport,
            "https://github.com/org/repo/blob/main/res/skill.json",
            None,
        )
        .unwrap();
        assert_eq!(
            found,
            "https://raw.githubusercontent.com/org/repo/main/res/skill.json"
        );
    }

    #[test]
    fn download_url_probes_the_branch_archive() {
        let transport = Canned::new(&[("https://github.com/org/repo/archive/v1.0.zip", "zip")]);
        let found = download_url(&transport, REPO, Some("v1.0")).unwrap();
        assert_eq!(found, "https://github.com/org/repo/archive/v1.0.zip");
    }

    #[test]
    fn download_url_rejects_a_missing_archive() {
        let transport = Canned::new(&[]);
        let result = download_url(&transport, REPO, Some("v1.0"));
        assert!(matches!(result, Err(ResolveError::InvalidUrl(_))));
    }

    #[test]
    fn desktop_record_is_parsed_key_value() {
        let transport = Canned::new(&[(
            "https://raw.githubusercontent.com/org/repo/main/res/desktop/repo.desktop",
            "[Desktop Entry]\nName=Parrot\nIcon=parrot.png\n",
        )]);
        let record = fetch_desktop_record(&transport, REPO, Some("main")).unwrap();
        assert_eq!(record["Name"], "Parrot");
        assert_eq!(record["Icon"], "parrot.png");
    }
}
