//! Partial-record merging.
//!
//! Source records are open-ended JSON mappings. Merging is key-wise:
//! scalars replace (or are kept, for lower-priority sources), arrays union
//! without duplicates, and nested mappings merge recursively.

use serde_json::{Map, Value};

/// Knobs for [`merge_record`].
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Union arrays instead of replacing them.
    pub merge_lists: bool,
    /// Ignore incoming values that are null/empty.
    pub skip_empty: bool,
    /// Drop exact duplicates when unioning arrays.
    pub no_dupes: bool,
    /// Keep an already-set non-empty scalar instead of overwriting it.
    /// Used for lower-priority sources; arrays still union.
    pub keep_existing: bool,
}

impl MergeOptions {
    /// Higher-priority source: overwrites scalars, unions lists.
    pub fn overriding() -> Self {
        Self {
            merge_lists: true,
            skip_empty: true,
            no_dupes: true,
            keep_existing: false,
        }
    }

    /// Lower-priority source: only fills gaps, still unions lists.
    pub fn filling() -> Self {
        Self {
            keep_existing: true,
            ..Self::overriding()
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Merge `incoming` into `base` key by key.
pub fn merge_record(
    base: &mut Map<String, Value>,
    incoming: &Map<String, Value>,
    options: &MergeOptions,
) {
    for (key, value) in incoming {
        if options.skip_empty && is_empty_value(value) {
            continue;
        }
        match (base.get_mut(key), value) {
            (Some(Value::Array(existing)), Value::Array(new)) if options.merge_lists => {
                for item in new {
                    if options.no_dupes && existing.contains(item) {
                        continue;
                    }
                    existing.push(item.clone());
                }
            }
            (Some(Value::Object(existing)), Value::Object(new)) => {
                merge_record(existing, new, options);
            }
            (Some(existing), _) if options.keep_existing && !is_empty_value(existing) => {}
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
