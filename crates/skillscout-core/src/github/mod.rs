//! GitHub-dialect resolution: URL templates, artifact locators, fetchers
//! and the release lister.
//!
//! This is the only forge whose URL dialect is modeled. Everything here is
//! synchronous and best-effort; first candidate success short-circuits the
//! remaining probes.

pub mod fetchers;
pub mod locators;
pub mod releases;
pub mod urls;

pub use locators::IconLocation;
pub use releases::{CommitRef, Release, list_releases};
