use tracing::{error, info};

use crate::discovery::eligible_groups;
use crate::error::{Result, SyncError};
use crate::merge::merge_allowed_versions;
use crate::model::PatchBody;
use crate::service::PolicyService;

/// Terminal state of one processed group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// A merged allow-list was patched back to the service.
    Submitted,
    /// The group does not use the pack, or no update was needed.
    Skipped,
    /// Something went wrong; the run moved on to the next group.
    Failed,
}

/// Outcome tally for one sync run.
#[derive(Debug, Default)]
pub struct Summary {
    pub submitted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl Summary {
    pub fn processed(&self) -> usize {
        self.submitted.len() + self.skipped.len() + self.failed.len()
    }

    fn record(&mut self, group: &str, outcome: GroupOutcome) {
        let bucket = match outcome {
            GroupOutcome::Submitted => &mut self.submitted,
            GroupOutcome::Skipped => &mut self.skipped,
            GroupOutcome::Failed => &mut self.failed,
        };
        bucket.push(group.to_string());
    }
}

/// List the groups worth processing. A listing or decode failure here is
/// fatal to the run: there are no groups to recover into.
pub async fn discover<S: PolicyService>(service: &S) -> Result<Vec<String>> {
    let listing = service.list_groups().await?;
    let groups = eligible_groups(&listing.policy_groups);
    info!(count = groups.len(), groups = ?groups, "eligible policy groups");
    Ok(groups)
}

/// Drive the per-group pipeline across `groups`: fetch the record, locate
/// the target pack, merge the desired versions, and submit a patch when the
/// merge changed something. Failures are isolated per group; every group is
/// attempted and the summary records how each ended.
pub async fn run<S: PolicyService>(
    service: &S,
    groups: &[String],
    target_pack: &str,
    desired_types: &[String],
    desired_version: &str,
) -> Summary {
    let mut summary = Summary::default();

    for group in groups {
        info!(group = %group, "processing policy group");
        let outcome =
            match process_group(service, group, target_pack, desired_types, desired_version).await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    log_group_failure(group, &err);
                    GroupOutcome::Failed
                }
            };
        summary.record(group, outcome);
    }

    summary
}

async fn process_group<S: PolicyService>(
    service: &S,
    group: &str,
    target_pack: &str,
    desired_types: &[String],
    desired_version: &str,
) -> Result<GroupOutcome> {
    let record = service.get_group(group).await?;

    let Some(pack) = record.locate_pack(target_pack) else {
        info!(group = %group, pack = %target_pack, "group does not use policy pack, skipping");
        return Ok(GroupOutcome::Skipped);
    };

    let Some(existing) = pack.allowed_versions() else {
        info!(group = %group, pack = %target_pack, "pack has no component-version allow-list, skipping");
        return Ok(GroupOutcome::Skipped);
    };

    let outcome = merge_allowed_versions(existing, desired_types, desired_version);
    if !outcome.changed {
        info!(group = %group, "allow-list already current, no update needed");
        return Ok(GroupOutcome::Skipped);
    }

    let patch = PatchBody::from(pack.with_allowed_versions(outcome.entries));
    service.patch_group(group, &patch).await?;
    info!(group = %group, pack = %target_pack, "submitted updated allow-list");
    Ok(GroupOutcome::Submitted)
}

fn log_group_failure(group: &str, err: &SyncError) {
    if let SyncError::Transport { status, body, .. } = err {
        error!(
            group = %group,
            status = ?status,
            body = ?body,
            "group request failed, continuing with next group"
        );
    } else {
        error!(
            group = %group,
            category = %err.category(),
            error = %err,
            "group processing failed, continuing with next group"
        );
    }
}
