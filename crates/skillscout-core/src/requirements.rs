//! Dependency aggregation across manifest and flat requirements files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ResolveError;
use crate::github::fetchers;
use crate::transport::Transport;

/// Aggregated dependency record.
///
/// `python` and `skill` behave as ordered sets; `system` keys are
/// forge-defined and passed through opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub python: Vec<String>,
    #[serde(default)]
    pub system: Map<String, Value>,
    #[serde(default)]
    pub skill: Vec<String>,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.python.is_empty() && self.system.is_empty() && self.skill.is_empty()
    }
}

/// Union `extra` into `target`, preserving first-seen order and dropping
/// exact duplicates.
fn union_into(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Merge the three independent dependency sources into one record.
///
/// Each source is optional; a missing or invalid manifest contributes
/// nothing rather than failing the aggregate.
pub fn aggregate(transport: &dyn Transport, url: &str, branch: Option<&str>) -> Requirements {
    let mut requirements = match fetchers::fetch_manifest(transport, url, branch) {
        Ok(manifest) => manifest,
        Err(ResolveError::InvalidManifest(source)) => {
            warn!(%source, "ignoring invalid manifest");
            Requirements::default()
        }
        Err(_) => Requirements::default(),
    };
    if let Ok(lines) = fetchers::fetch_requirements(transport, url, branch) {
        union_into(&mut requirements.python, lines);
    }
    if let Ok(lines) = fetchers::fetch_skill_requirements(transport, url, branch) {
        union_into(&mut requirements.skill, lines);
    }
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_dedupes_and_keeps_order() {
        let mut target = vec!["requests".to_string()];
        union_into(
            &mut target,
            vec![
                "flask".to_string(),
                "flask".to_string(),
                "requests".to_string(),
            ],
        );
        assert_eq!(target, vec!["requests", "flask"]);
    }

    #[test]
    fn default_is_empty_skeleton() {
        let requirements = Requirements::default();
        assert!(requirements.is_empty());
        assert_eq!(
            serde_json::to_value(&requirements).unwrap(),
            serde_json::json!({"python": [], "system": {}, "skill": []})
        );
    }
}
