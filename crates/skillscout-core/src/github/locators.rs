//! Artifact locators.
//!
//! Every locator walks the same ladder: render each candidate template,
//! probe it, return the first location that exists. If no candidate pans
//! out, the input URL itself is reinterpreted as a direct file reference,
//! then probed verbatim, and only then does the artifact-specific NotFound
//! kind come back. Blob-view candidates are returned in their raw-content
//! form so callers can fetch them as-is.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::transport::Transport;

use super::urls;

/// Where an icon ended up.
///
/// `File` carries a bare filename taken from a desktop entry whose remote
/// existence could not be confirmed. It is not a URL; callers must not
/// fetch it blindly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconLocation {
    Url(String),
    File(String),
}

/// Render a candidate template and turn blob views into raw-content URLs.
fn render(url: &str, template: &str, branch: Option<&str>) -> Result<String> {
    let resolved = urls::match_url_template(url, template, branch)?;
    Ok(urls::blob_to_raw(&resolved).unwrap_or(resolved))
}

/// First candidate that answers the existence probe.
fn first_existing(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
    candidates: &[String],
) -> Option<String> {
    for template in candidates {
        if let Ok(resolved) = render(url, template, branch) {
            if transport.exists(&resolved) {
                return Some(resolved);
            }
            debug!(candidate = %resolved, "candidate location missing");
        }
    }
    None
}

fn locate_with_fallback(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
    candidates: &[String],
    missing: ResolveError,
) -> Result<String> {
    if let Some(found) = first_existing(transport, url, branch, candidates) {
        return Ok(found);
    }
    // the input may itself be a direct reference to the artifact
    if let Ok(raw) = urls::blob_to_raw(url) {
        return Ok(raw);
    }
    if transport.exists(url) {
        return Ok(url.to_string());
    }
    Err(missing)
}

fn locate_template_only(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
    template: &str,
    missing: ResolveError,
) -> Result<String> {
    if let Ok(resolved) = render(url, template, branch) {
        if transport.exists(&resolved) {
            return Ok(resolved);
        }
    }
    Err(missing)
}

fn blob_candidates(files: &[&str]) -> Vec<String> {
    files
        .iter()
        .map(|f| format!("{}/{}", urls::BLOB, f))
        .collect()
}

pub fn locate_readme(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let candidates = blob_candidates(urls::README_FILES);
    locate_with_fallback(transport, url, branch, &candidates, ResolveError::ReadmeNotFound)
}

pub fn locate_license(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let candidates = blob_candidates(urls::LICENSE_FILES);
    locate_with_fallback(
        transport,
        url,
        branch,
        &candidates,
        ResolveError::LicenseNotFound,
    )
}

pub fn locate_skill_json(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<String> {
    let candidates = blob_candidates(urls::JSON_FILES);
    locate_with_fallback(transport, url, branch, &candidates, ResolveError::JsonNotFound)
}

pub fn locate_desktop(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Result<String> {
    let candidates = vec![urls::DESKTOP_FILE.to_string()];
    locate_with_fallback(
        transport,
        url,
        branch,
        &candidates,
        ResolveError::DesktopNotFound,
    )
}

pub fn locate_requirements(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<String> {
    locate_template_only(
        transport,
        url,
        branch,
        urls::REQUIREMENTS,
        ResolveError::RequirementsNotFound,
    )
}

pub fn locate_skill_requirements(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<String> {
    locate_template_only(
        transport,
        url,
        branch,
        urls::SKILL_REQUIREMENTS,
        ResolveError::SkillRequirementsNotFound,
    )
}

pub fn locate_manifest(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
) -> Result<String> {
    locate_template_only(
        transport,
        url,
        branch,
        urls::MANIFEST,
        ResolveError::ManifestNotFound,
    )
}

/// Locate the skill icon.
///
/// Conventional repository locations first; after that the desktop entry's
/// `Icon` field names a file that is checked at the conventional icon path.
/// If the remote copy cannot be confirmed the bare filename is handed back.
pub fn locate_icon(
    transport: &dyn Transport,
    url: &str,
    branch: Option<&str>,
    desktop: Option<&Map<String, Value>>,
) -> Result<IconLocation> {
    let candidates = blob_candidates(urls::ICON_FILES);
    if let Some(found) = first_existing(transport, url, branch, &candidates) {
        return Ok(IconLocation::Url(found));
    }

    let icon_file = desktop
        .and_then(|d| d.get("Icon"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());
    if let Some(icon_file) = icon_file {
        let template = urls::ICON.replace("{icon}", icon_file);
        if let Ok(resolved) = render(url, &template, branch) {
            if transport.exists(&resolved) {
                return Ok(IconLocation::Url(resolved));
            }
        }
        // not confirmable remotely: hand the filename back as-is
        return Ok(IconLocation::File(icon_file.to_string()));
    }
    Err(ResolveError::IconNotFound)
}
