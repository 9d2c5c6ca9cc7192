use tracing::debug;

use crate::model::PolicyGroupSummary;

/// Sentinel group reserved by the policy service; never a sync target.
pub const DEFAULT_POLICY_GROUP: &str = "default-policy-group";

/// Groups worth processing: the reserved default group is excluded, as is
/// any group with no enabled policy packs. Order is whatever the service
/// returned; callers must not rely on it for correctness.
pub fn eligible(groups: &[PolicyGroupSummary]) -> impl Iterator<Item = &PolicyGroupSummary> {
    groups.iter().filter(|g| {
        if g.name == DEFAULT_POLICY_GROUP {
            return false;
        }
        if g.num_enabled_policy_packs == 0 {
            debug!(group = %g.name, "no enabled policy packs, skipping");
            return false;
        }
        true
    })
}

/// Names of the eligible groups.
pub fn eligible_groups(groups: &[PolicyGroupSummary]) -> Vec<String> {
    eligible(groups).map(|g| g.name.clone()).collect()
}
