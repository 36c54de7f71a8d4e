use kube::CustomResource;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

use super::common::{
    InitDefaults, LifecycleResource, ResourceState, ResourceStatus,
};
use super::convert::{ConvertError, from_dynamic, to_dynamic};
use super::managed_chart_group::chart_group_reference;

/// ManagedManifestSpec defines the desired state of a ManagedManifest.
#[derive(
    CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq,
)]
#[kube(
    group = "chartflow.io",
    version = "v1alpha1",
    kind = "ManagedManifest",
    plural = "managedmanifests",
    shortname = "mm",
    namespaced,
    status = "ResourceStatus"
)]
pub struct ManagedManifestSpec {
    /// Names of the member ManagedChartGroups, in activation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart_groups: Vec<String>,
    /// Prepended to every release the manifest owns, so releases can be
    /// managed throughout their lifecycle.
    pub release_prefix: String,
    /// Target state of the resource; defaulted by `init` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<ResourceState>,
    /// Maximum number of revisions kept in the revision history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
}

impl ManagedManifest {
    /// Fill lifecycle fields the spec or status left unset.
    pub fn init(&mut self, defaults: &InitDefaults) {
        let status = self.status.get_or_insert_with(ResourceStatus::default);
        if self.spec.target_state.is_none() {
            self.spec.target_state = Some(defaults.target_state);
        }
        status.satisfied = self.spec.target_state == Some(status.actual_state);
    }

    /// Group-list equality, used to skip no-op updates.
    pub fn equivalent(&self, other: &ManagedManifest) -> bool {
        self.spec.chart_groups == other.spec.chart_groups
    }

    /// Child resources the reconciler should watch.
    pub fn dependent_resources(&self) -> Vec<DynamicObject> {
        let ns = self.metadata.namespace.as_deref().unwrap_or_default();
        self.spec
            .chart_groups
            .iter()
            .map(|name| chart_group_reference(ns, name))
            .collect()
    }

    pub fn to_dynamic(&self) -> Result<DynamicObject, ConvertError> {
        to_dynamic("ManagedManifest", self.resource_name(), self)
    }

    pub fn from_dynamic(
        obj: &DynamicObject,
    ) -> Result<ManagedManifest, ConvertError> {
        from_dynamic(obj)
    }
}

/// Watch reference for a ManagedManifest, carrying only its coordinates.
pub fn manifest_reference(namespace: &str, name: &str) -> DynamicObject {
    let gvk = GroupVersionKind::gvk(
        super::API_GROUP,
        super::API_VERSION,
        "ManagedManifest",
    );
    DynamicObject::new(name, &ApiResource::from_gvk(&gvk)).within(namespace)
}

impl LifecycleResource for ManagedManifest {
    fn resource_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn target_state(&self) -> ResourceState {
        self.spec.target_state.unwrap_or_default()
    }

    fn actual_state(&self) -> ResourceState {
        self.status
            .as_ref()
            .map(|s| s.actual_state)
            .unwrap_or_default()
    }

    fn owner_references(&self) -> &[OwnerReference] {
        self.metadata.owner_references.as_deref().unwrap_or_default()
    }

    fn is_deleted(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependent_resources_reference_each_group() {
        let mut m = ManagedManifest::new(
            "airship",
            ManagedManifestSpec {
                chart_groups: vec!["kube-system".into(), "openstack".into()],
                release_prefix: "arm".into(),
                target_state: None,
                revision_history_limit: None,
            },
        );
        m.metadata.namespace = Some("default".into());
        m.init(&InitDefaults::default());

        let deps = m.dependent_resources();
        assert_eq!(deps.len(), 2);
        assert!(deps.iter().all(|d| {
            d.types.as_ref().map(|t| t.kind.as_str())
                == Some("ManagedChartGroup")
        }));
        assert_eq!(m.target_state(), ResourceState::Deployed);
    }

    #[test]
    fn reference_targets_the_manifest_kind() {
        let r = manifest_reference("default", "airship");
        assert_eq!(
            r.types.as_ref().map(|t| t.kind.as_str()),
            Some("ManagedManifest")
        );
        assert_eq!(r.metadata.name.as_deref(), Some("airship"));
    }
}
