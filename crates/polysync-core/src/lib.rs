pub mod discovery;
pub mod error;
pub mod merge;
pub mod model;
pub mod service;
pub mod sync;

pub use discovery::{DEFAULT_POLICY_GROUP, eligible, eligible_groups};
pub use error::{Result, SyncError};
pub use merge::{MergeOutcome, merge_allowed_versions};
pub use model::{
    AppliedPolicyPack, ComponentVersionEntry, PatchBody, PolicyGroup, PolicyGroupList,
    PolicyGroupSummary,
};
pub use service::PolicyService;
pub use sync::{GroupOutcome, Summary, discover, run};
