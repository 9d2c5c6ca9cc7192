use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Config sub-key under which a policy pack stores its component-version
/// allow-list.
pub const COMPONENT_VERSIONS_POLICY: &str = "check-component-versions";

/// Key of the allow-list array inside the policy config block.
pub const ALLOWED_VERSIONS_KEY: &str = "allowedComponentVersions";

/// One row of the `GET /policygroups` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyGroupSummary {
    pub name: String,
    #[serde(default)]
    pub num_enabled_policy_packs: u32,
}

/// Shape of the `GET /policygroups` response.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyGroupList {
    #[serde(default)]
    pub policy_groups: Vec<PolicyGroupSummary>,
}

/// Full policy group record as returned by `GET /policygroups/{name}`.
/// Fetched per run, never persisted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyGroup {
    #[serde(default)]
    pub applied_policy_packs: Vec<AppliedPolicyPack>,
}

impl PolicyGroup {
    /// First applied pack with the given name, if this group uses it.
    /// Absence is not an error; the group is simply not a sync target.
    pub fn locate_pack(&self, target: &str) -> Option<&AppliedPolicyPack> {
        self.applied_policy_packs.iter().find(|p| p.name == target)
    }
}

/// A policy pack applied to a group. The config mapping is opaque except for
/// the `check-component-versions` block; everything in it must survive a
/// round-trip because the update contract takes the complete pack definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPolicyPack {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_tag: Option<String>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl AppliedPolicyPack {
    /// The component-version allow-list, when this pack configures one.
    pub fn allowed_versions(&self) -> Option<&Vec<Value>> {
        self.config
            .get(COMPONENT_VERSIONS_POLICY)?
            .get(ALLOWED_VERSIONS_KEY)?
            .as_array()
    }

    /// Copy of this pack with the allow-list replaced by `entries`. All other
    /// config keys are carried over untouched.
    pub fn with_allowed_versions(&self, entries: Vec<Value>) -> Self {
        let mut pack = self.clone();
        let block = pack
            .config
            .entry(COMPONENT_VERSIONS_POLICY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(obj) = block {
            obj.insert(ALLOWED_VERSIONS_KEY.to_string(), Value::Array(entries));
        }
        pack
    }
}

/// One well-formed allow-list element. Fetched entries are handled as raw
/// JSON so unknown keys survive the merge; this type is used for newly
/// appended entries and typed reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVersionEntry {
    #[serde(rename = "type")]
    pub component_type: String,
    pub version: String,
}

/// Body of `PATCH /policygroups/{name}`. The service does not support partial
/// patches, so the complete pack definition goes out on every update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchBody {
    pub add_policy_pack: AppliedPolicyPack,
}

impl From<AppliedPolicyPack> for PatchBody {
    fn from(pack: AppliedPolicyPack) -> Self {
        Self {
            add_policy_pack: pack,
        }
    }
}
