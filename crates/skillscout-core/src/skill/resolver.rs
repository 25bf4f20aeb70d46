//! The skill resolver: orchestrates locators, fetchers and merging.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::github::locators::{self, IconLocation};
use crate::github::{fetchers, releases, urls};
use crate::merge::{MergeOptions, merge_record};
use crate::requirements;
use crate::transport::{HttpTransport, Transport};

use super::schema::SkillRecord;

const VIRAL_TAG: &str = "viral-license";
const PERMISSIVE_TAG: &str = "permissive-license";
const NO_LICENSE_TAG: &str = "no-license";

/// Resolves a repository URL into a [`SkillRecord`].
///
/// Every artifact is independent and best-effort: a missing readme,
/// license, icon, descriptor or manifest leaves its fields at their
/// defaults. Only an unusable input URL fails the resolution.
pub struct SkillResolver {
    transport: Box<dyn Transport>,
}

impl SkillResolver {
    /// Resolver backed by the default blocking HTTP transport.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_transport(Box::new(HttpTransport::new()?)))
    }

    /// Resolver over a caller-supplied transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Resolve `url` into a skill record, optionally pinned to `branch`.
    pub fn resolve(&self, url: &str, branch: Option<&str>) -> Result<SkillRecord> {
        let transport = self.transport.as_ref();
        let (author, repo) = urls::author_repo(url)?;

        let mut data = Map::new();
        data.insert("authorname".into(), Value::String(author.clone()));
        data.insert("foldername".into(), Value::String(repo.clone()));
        data.insert("license".into(), Value::String("unknown".into()));
        data.insert("tags".into(), Value::Array(Vec::new()));

        // branch: caller > URL-embedded > latest release > unknown
        let mut branch: Option<String> = branch.map(str::to_string);
        if branch.is_none() {
            match urls::branch_from_url(url) {
                Ok(embedded) => branch = Some(embedded),
                Err(_) => {
                    let releases = releases::list_releases(transport, url)?;
                    if let Some(latest) = releases.first() {
                        debug!(release = %latest.name, "assuming latest release as branch");
                        branch = Some(latest.name.clone());
                        data.insert("version".into(), Value::String(latest.name.clone()));
                        data.insert(
                            "download_url".into(),
                            Value::String(latest.tarball_url.clone()),
                        );
                    }
                }
            }
        }
        if let Some(b) = &branch {
            data.insert("branch".into(), Value::String(b.clone()));
        }

        let url = urls::normalize(url)?;
        data.insert("url".into(), Value::String(url.clone()));

        let aggregated = requirements::aggregate(transport, &url, branch.as_deref());
        data.insert("requirements".into(), serde_json::to_value(&aggregated)?);

        // package descriptor wins over readme-derived data, so it merges
        // with overriding semantics and the readme only fills gaps
        match fetchers::fetch_skill_json(transport, &url, branch.as_deref()) {
            Ok(descriptor) => merge_record(&mut data, &descriptor, &MergeOptions::overriding()),
            Err(ResolveError::JsonNotFound) => {}
            Err(e) => return Err(e),
        }
        match fetchers::fetch_readme_record(transport, &url, branch.as_deref()) {
            Ok(readme) => {
                merge_record(&mut data, &readme, &MergeOptions::filling());
                // an explicit branch statement in the readme is authoritative
                if let Some(declared) = readme.get("branch").and_then(Value::as_str) {
                    branch = Some(declared.to_string());
                }
            }
            Err(ResolveError::ReadmeNotFound) => {}
            Err(e) => return Err(e),
        }

        // the URL-derived name is a last resort behind both sources
        if !data.contains_key("skillname") {
            data.insert(
                "skillname".into(),
                Value::String(urls::skill_name_from_url(&url)?),
            );
        }

        // the branch may have changed since the release lookup, so the
        // download link is recomputed from whatever won
        if let Some(b) = &branch {
            data.insert("branch".into(), Value::String(b.clone()));
            let download = urls::match_url_template(&url, urls::DOWNLOAD, Some(b))?;
            data.insert("download_url".into(), Value::String(download));
        }

        match fetchers::fetch_license_data(transport, &url, branch.as_deref()) {
            Ok((kind, text)) => {
                data.insert("license".into(), Value::String(kind));
                data.insert("license_text".into(), Value::String(text));
            }
            Err(ResolveError::LicenseNotFound) => {}
            Err(e) => return Err(e),
        }

        // one desktop fetch feeds both the icon hint and the presence flag
        let desktop_record =
            fetchers::fetch_desktop_record(transport, &url, branch.as_deref()).ok();
        match locators::locate_icon(transport, &url, branch.as_deref(), desktop_record.as_ref()) {
            Ok(IconLocation::Url(icon)) | Ok(IconLocation::File(icon)) => {
                data.insert("icon".into(), Value::String(icon));
            }
            Err(ResolveError::IconNotFound) => {}
            Err(e) => return Err(e),
        }

        let system_deps = data
            .get("requirements")
            .and_then(|r| r.get("system"))
            .and_then(Value::as_object)
            .is_some_and(|system| !system.is_empty());
        data.insert("systemDeps".into(), Value::Bool(system_deps));
        data.insert("desktopFile".into(), Value::Bool(desktop_record.is_some()));

        let license = data
            .get("license")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        if let Some(tag) = license_tag(&license) {
            push_unique_tag(&mut data, tag);
        }

        Ok(serde_json::from_value(Value::Object(data))?)
    }
}

/// At most one license-related tag applies to a record.
fn license_tag(license: &str) -> Option<&'static str> {
    if crate::licenses::is_viral(license) {
        Some(VIRAL_TAG)
    } else if crate::licenses::is_permissive(license) {
        Some(PERMISSIVE_TAG)
    } else if license.contains("unknown") {
        Some(NO_LICENSE_TAG)
    } else {
        None
    }
}

fn push_unique_tag(data: &mut Map<String, Value>, tag: &str) {
    let tags = data
        .entry("tags".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(tags) = tags {
        let tag = Value::String(tag.to_string());
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
}
