//! Readme markdown to a partial skill record.
//!
//! Follows the loose conventions of community skill readmes: a `#` title
//! naming the skill, then `##` sections for description, examples,
//! category, tags and an optional explicit branch declaration.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[[^\]]*\]\([^)]*\)|<[^>]*>").expect("markup pattern compiles")
});

/// Extract a partial record from readme markdown.
///
/// Recognized keys: `skillname`, `description`, `examples`, `category`,
/// `categories`, `tags` and `branch`. Unrecognized sections are ignored.
pub fn readme_to_record(text: &str) -> Map<String, Value> {
    let mut record = Map::new();
    let mut title: Option<String> = None;
    let mut section = String::new();
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            section = heading.trim().to_lowercase();
            sections.push((section.clone(), Vec::new()));
            continue;
        }
        if let Some(heading) = line.strip_prefix("# ") {
            if title.is_none() {
                title = clean_title(heading);
            }
            section.clear();
            continue;
        }
        if !section.is_empty() {
            if let Some((_, body)) = sections.last_mut() {
                body.push(line.to_string());
            }
        }
    }

    if let Some(title) = title {
        record.insert("skillname".into(), Value::String(title));
    }

    for (name, body) in &sections {
        match name.as_str() {
            "description" | "about" => {
                let description = paragraph(body);
                if !description.is_empty() {
                    record.insert("description".into(), Value::String(description));
                }
            }
            "examples" | "usage" => {
                let examples = bullets(body);
                if !examples.is_empty() {
                    record.insert("examples".into(), Value::Array(examples));
                }
            }
            "category" => {
                let listed = bullets(body);
                let first = listed
                    .first()
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| first_line(body));
                if let Some(first) = first {
                    record.insert("category".into(), Value::String(first));
                }
                if !listed.is_empty() {
                    record.insert("categories".into(), Value::Array(listed));
                }
            }
            "tags" => {
                let tags = bullets(body);
                if !tags.is_empty() {
                    record.insert("tags".into(), Value::Array(tags));
                }
            }
            "branch" => {
                if let Some(line) = first_line(body) {
                    if let Some(branch) = line.split_whitespace().next() {
                        record.insert("branch".into(), Value::String(branch.to_string()));
                    }
                }
            }
            _ => {}
        }
    }

    record
}

/// Title text with markdown images/links and stray symbols stripped.
fn clean_title(heading: &str) -> Option<String> {
    let cleaned: String = MARKUP_RE
        .replace_all(heading, "")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '\''))
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn paragraph(body: &[String]) -> String {
    body.iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('-') && !l.starts_with('*'))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bullets(body: &[String]) -> Vec<Value> {
    body.iter()
        .filter_map(|l| {
            let l = l.trim();
            l.strip_prefix("- ").or_else(|| l.strip_prefix("* "))
        })
        .map(|item| item.trim().trim_matches(['"', '`', '\'']).to_string())
        .filter(|item| !item.is_empty())
        .map(Value::String)
        .collect()
}

fn first_line(body: &[String]) -> Option<String> {
    body.iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const README: &str = "\
# Weather Skill ☁\n\
\n\
## About\n\
Reports current conditions\n\
and forecasts.\n\
\n\
## Examples\n\
- \"what's the weather\"\n\
- `will it rain tomorrow`\n\
\n\
## Category\n\
**Daily**\n\
\n\
## Tags\n\
- #weather\n\
- #forecast\n";

    #[test]
    fn extracts_conventional_sections() {
        let record = readme_to_record(README);
        assert_eq!(record["skillname"], "Weather Skill");
        assert_eq!(
            record["description"],
            "Reports current conditions and forecasts."
        );
        assert_eq!(
            record["examples"],
            json!(["what's the weather", "will it rain tomorrow"])
        );
        assert_eq!(record["category"], "**Daily**");
        assert_eq!(record["tags"], json!(["#weather", "#forecast"]));
        assert!(!record.contains_key("branch"));
    }

    #[test]
    fn title_markup_is_stripped() {
        let record = readme_to_record("# ![icon](res/icon/timer.png) Timer <img src=\"x\">\n");
        assert_eq!(record["skillname"], "Timer");
    }

    #[test]
    fn explicit_branch_declaration() {
        let record = readme_to_record("# Timer\n\n## Branch\ntesting\n");
        assert_eq!(record["branch"], "testing");
    }

    #[test]
    fn empty_readme_yields_empty_record() {
        assert!(readme_to_record("").is_empty());
    }
}
