use std::collections::BTreeMap;

use kube::CustomResource;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta, OwnerReference,
};

use super::common::{
    InitDefaults, LifecycleResource, ResourceState, ResourceStatus,
};
use super::convert::{ConvertError, from_dynamic, to_dynamic};
use super::managed_chart::{
    ChartSource, ChartUpgrade, ManagedChart, ManagedChartSpec,
    chart_reference,
};

/// ManagedChartGroupSpec defines the desired state of a ManagedChartGroup.
#[derive(
    CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq,
)]
#[kube(
    group = "chartflow.io",
    version = "v1alpha1",
    kind = "ManagedChartGroup",
    plural = "managedchartgroups",
    shortname = "mcg",
    namespaced,
    status = "ResourceStatus"
)]
pub struct ManagedChartGroupSpec {
    /// Names of the member ManagedCharts, in activation order.
    #[serde(
        rename = "chart_group",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub charts: Vec<String>,
    /// Description of the chart set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enables one-at-a-time sequenced deployment of the member charts.
    #[serde(default)]
    pub sequenced: bool,
    /// Target state of the resource; defaulted by `init` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<ResourceState>,
    /// Maximum number of revisions kept in the revision history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
}

impl ManagedChartGroup {
    /// Fill lifecycle fields the spec or status left unset.
    pub fn init(&mut self, defaults: &InitDefaults) {
        let status = self.status.get_or_insert_with(ResourceStatus::default);
        if self.spec.target_state.is_none() {
            self.spec.target_state = Some(defaults.target_state);
        }
        status.satisfied = self.spec.target_state == Some(status.actual_state);
    }

    /// Member-list equality, used to skip no-op updates.
    pub fn equivalent(&self, other: &ManagedChartGroup) -> bool {
        self.spec.charts == other.spec.charts
    }

    /// Child resources the reconciler should watch.
    pub fn dependent_resources(&self) -> Vec<DynamicObject> {
        let ns = self.metadata.namespace.as_deref().unwrap_or_default();
        self.spec
            .charts
            .iter()
            .map(|name| chart_reference(ns, name))
            .collect()
    }

    /// One mock ManagedChart per referenced chart name, mirroring what the
    /// reconciler would create. Targets start uninitialized so a sequencer
    /// can walk them.
    pub fn mock_charts(&self) -> Vec<ManagedChart> {
        let namespace = self.metadata.namespace.clone();
        let labels: BTreeMap<String, String> = [(
            "app".to_string(),
            self.resource_name().to_string(),
        )]
        .into_iter()
        .collect();

        self.spec
            .charts
            .iter()
            .map(|chart| ManagedChart {
                metadata: ObjectMeta {
                    name: Some(chart.clone()),
                    namespace: namespace.clone(),
                    labels: Some(labels.clone()),
                    ..ObjectMeta::default()
                },
                spec: ManagedChartSpec {
                    chart_name: chart.clone(),
                    namespace: namespace.clone(),
                    release: format!("{}-release", chart),
                    source: Some(ChartSource {
                        type_: "local".into(),
                        location: "/opt/chartflow/helm-charts/testchart"
                            .into(),
                        subpath: Some(".".into()),
                        reference: Some("master".into()),
                    }),
                    dependencies: Vec::new(),
                    values: None,
                    upgrade: Some(ChartUpgrade { no_hooks: false }),
                    target_state: Some(ResourceState::Uninitialized),
                    revision_history_limit: None,
                },
                status: Some(ResourceStatus::default()),
            })
            .collect()
    }

    pub fn to_dynamic(&self) -> Result<DynamicObject, ConvertError> {
        to_dynamic("ManagedChartGroup", self.resource_name(), self)
    }

    pub fn from_dynamic(
        obj: &DynamicObject,
    ) -> Result<ManagedChartGroup, ConvertError> {
        from_dynamic(obj)
    }
}

/// Watch reference for a ManagedChartGroup, carrying only its coordinates.
pub fn chart_group_reference(namespace: &str, name: &str) -> DynamicObject {
    let gvk = GroupVersionKind::gvk(
        super::API_GROUP,
        super::API_VERSION,
        "ManagedChartGroup",
    );
    DynamicObject::new(name, &ApiResource::from_gvk(&gvk)).within(namespace)
}

impl LifecycleResource for ManagedChartGroup {
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
