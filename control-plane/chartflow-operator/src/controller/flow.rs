use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::readiness::DependencyRegistry;

/// Kind of flow applied to a managed service.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Install,
    Upgrade,
    Rollback,
    Uninstall,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlowKind::Install => "install",
            FlowKind::Upgrade => "upgrade",
            FlowKind::Rollback => "rollback",
            FlowKind::Uninstall => "uninstall",
        };
        write!(f, "{}", s)
    }
}

/// Steps a lifecycle flow can schedule.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowPhase {
    Planning,
    Install,
    Test,
    TrafficRollout,
    Operational,
    TrafficDrain,
    Upgrade,
    Rollback,
    Delete,
}

/// One execution of a multi-step lifecycle: a main workflow resource plus
/// the named phase resources it drives.
#[derive(Clone, Debug)]
pub struct LifecycleFlow {
    pub name: String,
    pub namespace: String,
    pub flow_kind: FlowKind,
    /// Main workflow; when present it dominates flow readiness.
    pub main: Option<DynamicObject>,
    /// Phase resources by name, tracked for ownership auditing.
    pub phases: BTreeMap<String, DynamicObject>,
}

impl LifecycleFlow {
    pub fn new(namespace: &str, name: &str, flow_kind: FlowKind) -> Self {
        LifecycleFlow {
            name: name.to_string(),
            namespace: namespace.to_string(),
            flow_kind,
            main: None,
            phases: BTreeMap::new(),
        }
    }

    /// Everything the reconciler should watch for this flow.
    pub fn dependent_resources(&self) -> Vec<DynamicObject> {
        let mut res = Vec::new();
        if let Some(main) = &self.main {
            res.push(main.clone());
        }
        res.extend(self.phases.values().cloned());
        res
    }

    /// The state of the main workflow already reflects the combined effect
    /// of the phases, so readiness delegates to it alone.
    pub fn is_ready(&self, deps: &DependencyRegistry) -> bool {
        match &self.main {
            Some(main) => deps.is_ready(main),
            None => true,
        }
    }

    pub fn is_failed_or_error(&self, deps: &DependencyRegistry) -> bool {
        match &self.main {
            Some(main) => deps.is_failed_or_error(main),
            None => false,
        }
    }

    /// Audit that the main workflow and every phase carry the expected
    /// owner references. A mismatch is not an error; it signals to the
    /// reconciler that adoption is needed.
    pub fn check_owner_reference(&self, refs: &[OwnerReference]) -> bool {
        if let Some(main) = &self.main {
            if !owned_by(main, refs) {
                info!(
                    kind = kind_of(main),
                    name = name_of(main),
                    "owner reference mismatch on main workflow"
                );
                return false;
            }
        }

        for item in self.phases.values() {
            if !owned_by(item, refs) {
                info!(
                    kind = kind_of(item),
                    name = name_of(item),
                    "owner reference mismatch on phase"
                );
                return false;
            }
        }

        true
    }
}

fn owned_by(obj: &DynamicObject, refs: &[OwnerReference]) -> bool {
    obj.metadata.owner_references.as_deref().unwrap_or_default() == refs
}

fn kind_of(obj: &DynamicObject) -> &str {
    obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or("")
}

fn name_of(obj: &DynamicObject) -> &str {
    obj.metadata.name.as_deref().unwrap_or("")
}

/// Reference stub for the Argo workflow driving a flow's main slot.
pub fn workflow_reference(namespace: &str, name: &str) -> DynamicObject {
    let gvk = GroupVersionKind::gvk("argoproj.io", "v1alpha1", "Workflow");
    DynamicObject::new(name, &ApiResource::from_gvk(&gvk)).within(namespace)
}
