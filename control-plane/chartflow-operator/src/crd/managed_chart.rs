use std::collections::BTreeMap;

use kube::CustomResource;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

use super::common::{
    InitDefaults, LifecycleResource, ResourceState, ResourceStatus,
};
use super::convert::{ConvertError, from_dynamic, to_dynamic};

/// ManagedChartSpec defines the desired state of a ManagedChart.
#[derive(
    CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq,
)]
#[kube(
    group = "chartflow.io",
    version = "v1alpha1",
    kind = "ManagedChart",
    plural = "managedcharts",
    shortname = "mc",
    namespaced,
    status = "ResourceStatus"
)]
pub struct ManagedChartSpec {
    /// Name of the packaged chart.
    pub chart_name: String,
    /// Namespace the release is installed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the release (the manifest release prefix is prepended
    /// during processing).
    pub release: String,
    /// Where to fetch the chart from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ChartSource>,
    /// Charts that must be deployed before this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Opaque overrides for the chart's default values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<ChartUpgrade>,
    /// Target state of the resource; defaulted by `init` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<ResourceState>,
    /// Maximum number of revisions kept in the revision history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
}

/// Location a chart is fetched from: a git repo, local dir or tarball url.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct ChartSource {
    /// ``git``, ``local`` or ``tar``.
    #[serde(rename = "type")]
    pub type_: String,
    /// Url or path to the chart's parent directory.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(
    Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Default,
)]
pub struct ChartUpgrade {
    /// Skip running chart hooks during an upgrade.
    #[serde(default)]
    pub no_hooks: bool,
}

impl ManagedChart {
    /// Fill lifecycle fields the spec or status left unset.
    pub fn init(&mut self, defaults: &InitDefaults) {
        let status = self.status.get_or_insert_with(ResourceStatus::default);
        if self.spec.target_state.is_none() {
            self.spec.target_state = Some(defaults.target_state);
        }
        status.satisfied = self.spec.target_state == Some(status.actual_state);
    }

    /// Spec-level equality, used to skip no-op updates.
    pub fn equivalent(&self, other: &ManagedChart) -> bool {
        self.spec == other.spec
    }

    pub fn to_dynamic(&self) -> Result<DynamicObject, ConvertError> {
        to_dynamic("ManagedChart", self.resource_name(), self)
    }

    pub fn from_dynamic(
        obj: &DynamicObject,
    ) -> Result<ManagedChart, ConvertError> {
        from_dynamic(obj)
    }
}

/// Watch reference for a ManagedChart, carrying only its coordinates.
pub fn chart_reference(namespace: &str, name: &str) -> DynamicObject {
    let gvk = GroupVersionKind::gvk(
        super::API_GROUP,
        super::API_VERSION,
        "ManagedChart",
    );
    DynamicObject::new(name, &ApiResource::from_gvk(&gvk)).within(namespace)
}

impl LifecycleResource for ManagedChart {
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

    fn chart(name: &str) -> ManagedChart {
        ManagedChart::new(
            name,
            ManagedChartSpec {
                chart_name: name.to_string(),
                namespace: None,
                release: format!("{}-release", name),
                source: None,
                dependencies: Vec::new(),
                values: None,
                upgrade: None,
                target_state: None,
                revision_history_limit: None,
            },
        )
    }

    #[test]
    fn init_stamps_defaults_once() {
        let mut c = chart("keystone");
        c.init(&InitDefaults::default());
        assert_eq!(c.spec.target_state, Some(ResourceState::Deployed));
        assert_eq!(c.actual_state(), ResourceState::Uninitialized);
        assert!(!c.status.as_ref().unwrap().satisfied);

        // An explicit target survives a second init.
        c.spec.target_state = Some(ResourceState::Uninitialized);
        c.init(&InitDefaults::default());
        assert_eq!(c.spec.target_state, Some(ResourceState::Uninitialized));
    }

    #[test]
    fn reference_carries_coordinates_only() {
        let r = chart_reference("default", "keystone");
        assert_eq!(r.metadata.name.as_deref(), Some("keystone"));
        assert_eq!(r.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(
            r.types.as_ref().map(|t| t.kind.as_str()),
            Some("ManagedChart")
        );
    }

    #[test]
    fn deletion_timestamp_marks_the_chart_deleted() {
        use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

        let mut c = chart("keystone");
        assert!(!c.is_deleted());
        c.metadata.deletion_timestamp = Some(Time(chrono::Utc::now()));
        assert!(c.is_deleted());
    }

    #[test]
    fn dynamic_round_trip_preserves_spec() {
        let mut c = chart("keystone");
        c.init(&InitDefaults::default());
        let snapshot = c.to_dynamic().unwrap();
        let back = ManagedChart::from_dynamic(&snapshot).unwrap();
        assert!(c.equivalent(&back));
    }
}
