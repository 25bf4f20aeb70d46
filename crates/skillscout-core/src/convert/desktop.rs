//! Desktop-entry text to a flat key/value record.

use serde_json::{Map, Value};

/// Parse INI-style `Key=Value` lines from a desktop entry.
///
/// Group headers and comment lines are skipped; later duplicates overwrite
/// earlier ones.
pub fn desktop_to_record(text: &str) -> Map<String, Value> {
    let mut record = Map::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with(';')
            || (line.starts_with('[') && line.ends_with(']'))
        {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            record.insert(
                key.trim().to_string(),
                Value::String(value.trim().to_string()),
            );
        }
    }
    record
}
