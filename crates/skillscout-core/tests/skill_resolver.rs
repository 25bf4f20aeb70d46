//! End-to-end resolution against a canned transport.

mod support;

use serde_json::json;
use skillscout_core::skill::SkillResolver;
use support::CannedTransport;

const REPO: &str = "https://github.com/org/skill-weather";
const RAW: &str = "https://raw.githubusercontent.com/org/skill-weather";

fn tags_page() -> String {
    [
        "/org/skill-weather/releases/tag/v0.2",
        "/org/skill-weather/commit/abc123",
        "/org/skill-weather/archive/v0.2.zip",
        "/org/skill-weather/archive/v0.2.tar.gz",
        "/org/skill-weather/releases/tag/v0.1",
        "/org/skill-weather/commit/def456",
        "/org/skill-weather/archive/v0.1.zip",
        "/org/skill-weather/archive/v0.1.tar.gz",
    ]
    .iter()
    .map(|href| format!("<a href=\"{}\">link</a>", href))
    .collect()
}

#[test]
fn resolves_fully_populated_repository() {
    let transport = CannedTransport::new()
        .ok("https://github.com/org/skill-weather/tags", &tags_page())
        .ok(
            &format!("{}/v0.2/manifest.yml", RAW),
            "dependencies:\n  python:\n    - requests\n  system:\n    pkcon:\n      - libglib\n",
        )
        .ok(
            &format!("{}/v0.2/requirements.txt", RAW),
            "flask\n# comment\n\nflask\nrequests\n",
        )
        .ok(
            &format!("{}/v0.2/res/desktop/skill.json", RAW),
            r#"{"skillname": "Weather", "examples": ["what is the weather"], "tags": ["weather"]}"#,
        )
        .ok(
            &format!("{}/v0.2/README.md", RAW),
            "# Weather Skill\n\n## About\nChecks the weather.\n\n## Examples\n- \"what is the weather\"\n- \"will it rain\"\n",
        )
        .ok(
            &format!("{}/v0.2/LICENSE", RAW),
            "Apache License\nVersion 2.0, January 2004\n",
        )
        .ok(
            &format!("{}/v0.2/res/desktop/skill-weather.desktop", RAW),
            "[Desktop Entry]\nName=Weather\nIcon=weather.png\n",
        )
        .ok(&format!("{}/v0.2/res/icon/weather.png", RAW), "png-bytes");

    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, None).unwrap();

    assert_eq!(record.authorname, "org");
    assert_eq!(record.foldername, "skill-weather");
    assert_eq!(record.url, REPO);
    // latest release drives branch and version
    assert_eq!(record.branch.as_deref(), Some("v0.2"));
    assert_eq!(record.version.as_deref(), Some("v0.2"));
    // download link recomputed for the winning branch
    assert_eq!(
        record.download_url.as_deref(),
        Some("https://github.com/org/skill-weather/archive/v0.2.zip")
    );
    // descriptor value beats both the derived name and the readme title
    assert_eq!(record.skillname, "Weather");
    assert_eq!(record.extra["description"], "Checks the weather.");
    assert_eq!(
        record.extra["examples"],
        json!(["what is the weather", "will it rain"])
    );
    assert_eq!(record.license, "apache-2.0");
    assert!(record.license_text.as_deref().unwrap().contains("Apache"));
    assert_eq!(record.tags, vec!["weather", "permissive-license"]);
    assert_eq!(record.requirements.python, vec!["requests", "flask"]);
    assert!(record.requirements.skill.is_empty());
    assert!(record.requirements.system.contains_key("pkcon"));
    assert!(record.system_deps);
    assert!(record.desktop_file);
    assert_eq!(
        record.icon.as_deref(),
        Some("https://raw.githubusercontent.com/org/skill-weather/v0.2/res/icon/weather.png")
    );
}

#[test]
fn bare_repository_yields_default_record() {
    let resolver = SkillResolver::with_transport(Box::new(CannedTransport::new()));
    let record = resolver.resolve(REPO, None).unwrap();

    assert_eq!(record.authorname, "org");
    assert_eq!(record.foldername, "skill-weather");
    assert_eq!(record.skillname, "weather");
    assert_eq!(record.license, "unknown");
    assert!(record.license_text.is_none());
    assert!(record.requirements.is_empty());
    assert!(!record.system_deps);
    assert!(!record.desktop_file);
    assert_eq!(record.tags, vec!["no-license"]);
    assert!(record.branch.is_none());
    assert!(record.version.is_none());
    assert!(record.download_url.is_none());
    assert!(record.icon.is_none());
}

#[test]
fn invalid_url_propagates() {
    let resolver = SkillResolver::with_transport(Box::new(CannedTransport::new()));
    let result = resolver.resolve("https://example.com/not/a/forge", None);
    assert!(matches!(
        result,
        Err(skillscout_core::error::ResolveError::InvalidUrl(_))
    ));
}

#[test]
fn readme_title_replaces_derived_skillname() {
    let transport = CannedTransport::new().ok(
        &format!("{}/main/README.md", RAW),
        "# Weather Skill\n\n## About\nChecks the weather.\n",
    );

    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, Some("main")).unwrap();
    assert_eq!(record.skillname, "Weather Skill");
}

#[test]
fn descriptor_scalar_beats_readme_scalar() {
    let transport = CannedTransport::new()
        .ok(
            &format!("{}/main/res/desktop/skill.json", RAW),
            r#"{"skillname": "Json Name"}"#,
        )
        .ok(&format!("{}/main/README.md", RAW), "# Readme Name\n");

    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, Some("main")).unwrap();
    assert_eq!(record.skillname, "Json Name");
}

#[test]
fn readme_branch_overrides_and_recomputes_download() {
    let transport = CannedTransport::new().ok(
        &format!("{}/main/README.md", RAW),
        "# Timer\n\n## Branch\ntesting\n",
    );

    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, Some("main")).unwrap();

    assert_eq!(record.branch.as_deref(), Some("testing"));
    assert_eq!(
        record.download_url.as_deref(),
        Some("https://github.com/org/skill-weather/archive/testing.zip")
    );
}

#[test]
fn branch_embedded_in_url_wins_over_releases() {
    // tags page exists but must not be consulted
    let transport = CannedTransport::new().ok(
        "https://github.com/org/skill-weather/tags",
        &tags_page(),
    );
    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver
        .resolve("https://github.com/org/skill-weather/tree/dev", None)
        .unwrap();
    assert_eq!(record.branch.as_deref(), Some("dev"));
    assert!(record.version.is_none());
    assert_eq!(
        record.download_url.as_deref(),
        Some("https://github.com/org/skill-weather/archive/dev.zip")
    );
}

#[test]
fn viral_license_tagging() {
    let transport = CannedTransport::new().ok(
        &format!("{}/main/LICENSE", RAW),
        "GNU GENERAL PUBLIC LICENSE\nVersion 3, 29 June 2007\n",
    );
    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, Some("main")).unwrap();
    assert_eq!(record.license, "gpl-3.0");
    assert_eq!(record.tags, vec!["viral-license"]);
}

#[test]
fn recognized_but_unclassified_license_gets_no_tag() {
    let transport = CannedTransport::new().ok(
        &format!("{}/main/LICENSE", RAW),
        "Mozilla Public License Version 2.0\n",
    );
    let resolver = SkillResolver::with_transport(Box::new(transport));
    let record = resolver.resolve(REPO, Some("main")).unwrap();
    assert_eq!(record.license, "mpl-2.0");
    assert!(record.tags.is_empty());
}
