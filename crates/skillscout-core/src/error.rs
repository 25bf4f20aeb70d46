//! Error types for skill metadata resolution.
//!
//! Every optional artifact gets its own NotFound variant so callers can
//! absorb exactly the failures they expect and let everything else surface.

use thiserror::Error;

/// Failure kinds produced while resolving a repository into a skill record.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input is not a repository URL in the modeled forge dialect.
    #[error("not a valid repository url: {0}")]
    InvalidUrl(String),

    /// No branch is embedded in the URL and none was supplied.
    #[error("no branch could be determined for {0}")]
    InvalidBranch(String),

    /// The manifest exists but does not declare any dependency group.
    #[error("invalid dependency manifest at {0}")]
    InvalidManifest(String),

    #[error("readme not found")]
    ReadmeNotFound,

    #[error("license not found")]
    LicenseNotFound,

    #[error("icon not found")]
    IconNotFound,

    #[error("package descriptor json not found")]
    JsonNotFound,

    #[error("desktop entry not found")]
    DesktopNotFound,

    #[error("dependency manifest not found")]
    ManifestNotFound,

    #[error("requirements file not found")]
    RequirementsNotFound,

    #[error("skill requirements file not found")]
    SkillRequirementsNotFound,

    /// The merged working record could not be shaped into a `SkillRecord`.
    #[error("failed to shape skill record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
