//! Release listing by scraping the tags index page.
//!
//! The page presents, per release and in document order, a tag link, a
//! commit link and two archive links. That ordering drives a small
//! accumulator: the tag opens a record, the tarball link closes it. An
//! anchor run that never completes the shape is dropped, not an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::transport::Transport;

use super::urls;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s[^>]*?href="([^"]+)""#).expect("href pattern compiles")
});

/// Commit a release points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub url: String,
}

/// One published release, complete with both archive links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub commit: CommitRef,
    pub zipball_url: String,
    pub tarball_url: String,
}

#[derive(Default)]
struct ReleaseAccumulator {
    name: Option<String>,
    commit: Option<CommitRef>,
    zipball_url: Option<String>,
}

impl ReleaseAccumulator {
    /// Close the record; incomplete accumulators yield nothing.
    fn close(self, tarball_url: String) -> Option<Release> {
        match (self.name, self.commit, self.zipball_url) {
            (Some(name), Some(commit), Some(zipball_url)) => Some(Release {
                name,
                commit,
                zipball_url,
                tarball_url,
            }),
            _ => {
                debug!("skipping incomplete release anchor sequence");
                None
            }
        }
    }
}

/// Run the anchor-order state machine over a tags index page.
///
/// Only anchors under the repository author are considered. Output
/// preserves page order; index 0 is the most recent release.
pub fn parse_releases_page(html: &str, author: &str, normalized_url: &str) -> Vec<Release> {
    let author_prefix = format!("/{}", author);
    let tag_prefix = format!("{}/releases/tag/", normalized_url);
    let commit_prefix = format!("{}/commit/", normalized_url);
    let archive_prefix = format!("{}/archive", normalized_url);

    let mut releases = Vec::new();
    let mut current = ReleaseAccumulator::default();
    for capture in HREF_RE.captures_iter(html) {
        let href = &capture[1];
        if !href.starts_with(&author_prefix) {
            continue;
        }
        let link = format!("https://github.com{}", href);
        if let Some(name) = link.strip_prefix(&tag_prefix) {
            // a repeated tag link overwrites the in-progress name
            current.name = Some(name.to_string());
        } else if let Some(sha) = link.strip_prefix(&commit_prefix) {
            current.commit = Some(CommitRef {
                sha: sha.to_string(),
                url: link,
            });
        } else if link.starts_with(&archive_prefix) {
            if link.ends_with(".zip") {
                current.zipball_url = Some(link);
            } else if link.ends_with(".tar.gz") {
                // the tarball is always the last link of a release
                if let Some(release) = std::mem::take(&mut current).close(link) {
                    releases.push(release);
                }
            }
        }
    }
    releases
}

/// List a repository's releases, most recent first.
///
/// Listing is best-effort: an unreachable or missing tags page yields an
/// empty list rather than an error.
pub fn list_releases(transport: &dyn Transport, url: &str) -> Result<Vec<Release>> {
    let (author, _) = urls::author_repo(url)?;
    let normalized = urls::normalize(url)?;
    let tags_url = urls::match_url_template(url, urls::TAGS, None)?;
    let html = match transport.get(&tags_url) {
        Ok(response) if response.is_success() => response.body,
        _ => return Ok(Vec::new()),
    };
    Ok(parse_releases_page(&html, &author, &normalized))
}
