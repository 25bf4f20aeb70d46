//! Skillscout Core Library
//!
//! Resolves a forge repository URL into a normalized skill metadata record
//! by probing well-known file locations (readme, license, desktop entry,
//! icon, dependency manifest, package descriptor) and merging whatever is
//! found. Every source is optional; resolution degrades to a partial
//! record instead of failing.

pub mod convert;
pub mod error;
pub mod github;
pub mod licenses;
pub mod merge;
pub mod requirements;
pub mod skill;
pub mod transport;

/// Re-exports of commonly used types
pub mod prelude {
    // Resolution
    pub use crate::skill::{SkillRecord, SkillResolver};

    // Errors
    pub use crate::error::{ResolveError, Result};

    // Transport
    pub use crate::transport::{HttpResponse, HttpTransport, Transport};

    // Artifacts
    pub use crate::github::{CommitRef, IconLocation, Release};
    pub use crate::requirements::Requirements;
}
