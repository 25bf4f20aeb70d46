//! License text classification.
//!
//! A pure keyword classifier over the license text, returning an SPDX-ish
//! kind string, plus the viral/permissive predicates used for tagging.

/// Classify raw license text into a kind string, or `"unknown"`.
pub fn classify(text: &str) -> String {
    let text = text.to_lowercase();
    let kind = if text.contains("gnu affero") || text.contains("agpl") {
        "agpl-3.0"
    } else if text.contains("gnu lesser") || text.contains("lgpl") {
        "lgpl-3.0"
    } else if text.contains("gnu general public license") || text.contains("gpl") {
        if text.contains("version 2") {
            "gpl-2.0"
        } else {
            "gpl-3.0"
        }
    } else if text.contains("mozilla public license") {
        "mpl-2.0"
    } else if text.contains("eclipse public license") {
        "epl-2.0"
    } else if text.contains("apache license") {
        "apache-2.0"
    } else if text.contains("this is free and unencumbered software") || text.contains("unlicense")
    {
        "unlicense"
    } else if text.contains("permission is hereby granted, free of charge")
        || text.contains("mit license")
    {
        "mit"
    } else if text.contains("redistribution and use in source and binary forms") {
        "bsd-3-clause"
    } else if text.contains("internet systems consortium") || text.contains("isc license") {
        "isc"
    } else if text.contains("do what the fuck you want") || text.contains("wtfpl") {
        "wtfpl"
    } else if text.contains("cc0") {
        "cc0-1.0"
    } else {
        "unknown"
    };
    kind.to_string()
}

/// Copyleft families whose terms propagate to derived works.
pub fn is_viral(kind: &str) -> bool {
    ["gpl", "agpl", "lgpl"].iter().any(|p| kind.starts_with(p))
}

/// Families that allow reuse with minimal obligations.
pub fn is_permissive(kind: &str) -> bool {
    ["mit", "apache", "bsd", "isc", "unlicense", "wtfpl", "cc0"]
        .iter()
        .any(|p| kind.starts_with(p))
}
