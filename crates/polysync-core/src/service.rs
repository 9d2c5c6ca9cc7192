use async_trait::async_trait;

use crate::error::Result;
use crate::model::{PatchBody, PolicyGroup, PolicyGroupList};

/// The three policy-service operations a sync run needs. The production
/// implementation is the HTTP client in the CLI crate; tests substitute an
/// in-memory double.
#[async_trait]
pub trait PolicyService {
    async fn list_groups(&self) -> Result<PolicyGroupList>;

    async fn get_group(&self, name: &str) -> Result<PolicyGroup>;

    async fn patch_group(&self, name: &str, body: &PatchBody) -> Result<()>;
}
