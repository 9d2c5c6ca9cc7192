use std::collections::HashSet;

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::model::ComponentVersionEntry;

/// Result of one allow-list merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub entries: Vec<Value>,
    pub changed: bool,
}

/// Merge a desired component-version set into an existing allow-list.
///
/// Two passes over the desired-type set: first update entries whose `type`
/// is desired, then append desired types that were not present, in
/// desired-set order. Existing entries are never removed and keep their
/// relative order, entries missing `type` or `version` pass through
/// untouched, and applying the same set twice reports no change the second
/// time.
pub fn merge_allowed_versions(
    existing: &[Value],
    desired_types: &[String],
    desired_version: &str,
) -> MergeOutcome {
    let mut entries = Vec::with_capacity(existing.len() + desired_types.len());
    let mut found: HashSet<String> = HashSet::new();
    let mut changed = false;

    for entry in existing {
        let Ok(parsed) = serde_json::from_value::<ComponentVersionEntry>(entry.clone()) else {
            warn!(entry = %entry, "allow-list entry missing type or version, leaving untouched");
            entries.push(entry.clone());
            continue;
        };

        if !desired_types.contains(&parsed.component_type) {
            entries.push(entry.clone());
            continue;
        }

        if found.contains(&parsed.component_type) {
            warn!(
                component = %parsed.component_type,
                "duplicate allow-list entry, leaving untouched"
            );
            entries.push(entry.clone());
            continue;
        }

        if parsed.version == desired_version {
            found.insert(parsed.component_type);
            entries.push(entry.clone());
            continue;
        }

        let mut updated = entry.clone();
        if let Some(obj) = updated.as_object_mut() {
            obj.insert(
                "version".to_string(),
                Value::String(desired_version.to_string()),
            );
        }
        info!(
            component = %parsed.component_type,
            old = %parsed.version,
            new = desired_version,
            "updated component version"
        );
        entries.push(updated);
        found.insert(parsed.component_type);
        changed = true;
    }

    for desired in desired_types {
        if found.insert(desired.clone()) {
            info!(
                component = %desired,
                version = desired_version,
                "added new component version entry"
            );
            entries.push(json!({"type": desired, "version": desired_version}));
            changed = true;
        }
    }

    MergeOutcome { entries, changed }
}
