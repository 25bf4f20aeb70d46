//! GitHub URL dialect: well-known location templates and URL decomposition.
//!
//! Templates are parameterized by `{author}`, `{repo}` and `{branch}`.
//! Substitution is pure string work; nothing here touches the network.

use url::Url;

use crate::error::{ResolveError, Result};

pub const BASE: &str = "https://github.com/{author}/{repo}";
pub const BLOB: &str = "https://github.com/{author}/{repo}/blob/{branch}";
pub const DOWNLOAD: &str = "https://github.com/{author}/{repo}/archive/{branch}.zip";
pub const TAGS: &str = "https://github.com/{author}/{repo}/tags";
pub const DESKTOP_FILE: &str =
    "https://github.com/{author}/{repo}/blob/{branch}/res/desktop/{repo}.desktop";
pub const ICON: &str = "https://github.com/{author}/{repo}/blob/{branch}/res/icon/{icon}";
pub const REQUIREMENTS: &str = "https://github.com/{author}/{repo}/blob/{branch}/requirements.txt";
pub const SKILL_REQUIREMENTS: &str =
    "https://github.com/{author}/{repo}/blob/{branch}/skill_requirements.txt";
pub const MANIFEST: &str = "https://github.com/{author}/{repo}/blob/{branch}/manifest.yml";

const RAW_HOST: &str = "https://raw.githubusercontent.com";

/// Readme filenames tried in priority order.
pub const README_FILES: &[&str] = &["README.md", "README.rst", "README.txt", "README", "readme.md"];

/// License filenames tried in priority order.
pub const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.md", "LICENSE.txt", "UNLICENSE", "License"];

/// Repository-relative icon locations, tried with the repo name as stem.
pub const ICON_FILES: &[&str] = &[
    "res/icon/{repo}",
    "res/icon/{repo}.png",
    "res/icon/{repo}.svg",
    "res/icon/{repo}.jpg",
];

/// Package descriptor locations.
pub const JSON_FILES: &[&str] = &["res/desktop/skill.json", "skill.json"];

fn parse(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|_| ResolveError::InvalidUrl(url.to_string()))?;
    match parsed.host_str() {
        Some("github.com") | Some("www.github.com") | Some("raw.githubusercontent.com") => {
            Ok(parsed)
        }
        _ => Err(ResolveError::InvalidUrl(url.to_string())),
    }
}

fn path_segments(parsed: &Url) -> Vec<String> {
    parsed
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Split a repository URL into its (author, repo) pair.
pub fn author_repo(url: &str) -> Result<(String, String)> {
    let parsed = parse(url)?;
    let segments = path_segments(&parsed);
    match (segments.first(), segments.get(1)) {
        (Some(author), Some(repo)) => {
            let repo = repo.trim_end_matches(".git");
            if author.is_empty() || repo.is_empty() {
                return Err(ResolveError::InvalidUrl(url.to_string()));
            }
            Ok((author.clone(), repo.to_string()))
        }
        _ => Err(ResolveError::InvalidUrl(url.to_string())),
    }
}

/// Canonical repository URL: scheme, host and the (author, repo) pair only.
pub fn normalize(url: &str) -> Result<String> {
    let (author, repo) = author_repo(url)?;
    Ok(BASE.replace("{author}", &author).replace("{repo}", &repo))
}

/// Branch embedded in the URL itself, via `/tree/<branch>` or `/blob/<branch>/…`
/// on the web host, or the third path segment on the raw-content host.
pub fn branch_from_url(url: &str) -> Result<String> {
    let parsed = parse(url)?;
    let segments = path_segments(&parsed);
    if parsed.host_str() == Some("raw.githubusercontent.com") {
        return segments
            .get(2)
            .cloned()
            .ok_or_else(|| ResolveError::InvalidBranch(url.to_string()));
    }
    match (segments.get(2).map(String::as_str), segments.get(3)) {
        (Some("tree"), Some(branch)) | (Some("blob"), Some(branch)) => Ok(branch.clone()),
        _ => Err(ResolveError::InvalidBranch(url.to_string())),
    }
}

/// Convert a single-file blob view into its raw-content URL.
///
/// Raw-content URLs pass through unchanged. Anything that is not a
/// single-file reference is `InvalidUrl`.
pub fn blob_to_raw(url: &str) -> Result<String> {
    let parsed = parse(url)?;
    if parsed.host_str() == Some("raw.githubusercontent.com") {
        return Ok(url.trim().to_string());
    }
    let segments = path_segments(&parsed);
    if segments.len() >= 5 && segments[2] == "blob" {
        let author = &segments[0];
        let repo = &segments[1];
        let rest = segments[3..].join("/");
        return Ok(format!("{}/{}/{}/{}", RAW_HOST, author, repo, rest));
    }
    Err(ResolveError::InvalidUrl(url.to_string()))
}

/// Human-readable skill name derived from the repo name.
///
/// Splits on `-`/`_` and drops the conventional noise words.
pub fn skill_name_from_url(url: &str) -> Result<String> {
    let (_, repo) = author_repo(url)?;
    let words: Vec<&str> = repo
        .split(['-', '_'])
        .filter(|w| !w.is_empty() && !matches!(w.to_lowercase().as_str(), "skill" | "mycroft"))
        .collect();
    if words.is_empty() {
        Ok(repo)
    } else {
        Ok(words.join(" "))
    }
}

/// Substitute a location template against a repository URL.
///
/// Fails with `InvalidUrl` when the URL does not decompose into an
/// (author, repo) pair, and with `InvalidBranch` when the template needs a
/// branch that neither the argument nor the URL provides. Never performs
/// I/O and never checks reachability.
pub fn match_url_template(url: &str, template: &str, branch: Option<&str>) -> Result<String> {
    let (author, repo) = author_repo(url)?;
    let mut resolved = template
        .replace("{author}", &author)
        .replace("{repo}", &repo);
    if resolved.contains("{branch}") {
        let branch = match branch {
            Some(b) => b.to_string(),
            None => branch_from_url(url)?,
        };
        resolved = resolved.replace("{branch}", &branch);
    }
    Ok(resolved)
}
