use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::core::DynamicObject;

use crate::crd::convert::from_dynamic;

use super::fields::{state_changed, state_matches};
use super::{DependencyRegistry, KindCheck};

const CUSTOM_STATE_PATH: &str = "status.actual_state";
const WORKFLOW_PHASE_PATH: &str = "status.phase";

fn always_ready(_obj: &DynamicObject) -> bool {
    true
}

fn never_failed(_obj: &DynamicObject) -> bool {
    false
}

fn never_changed(
    _old: &DynamicObject,
    _new: &DynamicObject,
) -> (bool, String, String) {
    (false, String::new(), String::new())
}

/// Fail-open default: an unrecognized kind can neither block nor fail.
pub(super) const DEFAULT_CHECK: KindCheck = KindCheck {
    is_ready: always_ready,
    is_failed_or_error: never_failed,
    status_changed: never_changed,
};

// --- Pod ---

fn pod_ready_condition(pod: &Pod) -> Option<String> {
    pod.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|conds| conds.iter().find(|c| c.type_ == "Ready"))
        .map(|c| c.status.clone())
}

fn pod_is_ready(obj: &DynamicObject) -> bool {
    match from_dynamic::<Pod>(obj) {
        Ok(pod) => pod_ready_condition(&pod).as_deref() == Some("True"),
        Err(_) => false,
    }
}

fn pod_status_changed(
    old: &DynamicObject,
    new: &DynamicObject,
) -> (bool, String, String) {
    let before = from_dynamic::<Pod>(old)
        .ok()
        .and_then(|p| pod_ready_condition(&p))
        .unwrap_or_default();
    let after = from_dynamic::<Pod>(new)
        .ok()
        .and_then(|p| pod_ready_condition(&p))
        .unwrap_or_default();
    let changed = !before.is_empty() && !after.is_empty() && before != after;
    (changed, before, after)
}

// --- Job ---

fn job_counters(job: &Job) -> (i32, i32) {
    let status = job.status.as_ref();
    (
        status.and_then(|s| s.succeeded).unwrap_or(0),
        status.and_then(|s| s.failed).unwrap_or(0),
    )
}

fn job_is_ready(obj: &DynamicObject) -> bool {
    from_dynamic::<Job>(obj)
        .map(|j| job_counters(&j).0 > 0)
        .unwrap_or(false)
}

fn job_is_failed(obj: &DynamicObject) -> bool {
    from_dynamic::<Job>(obj)
        .map(|j| job_counters(&j).1 > 0)
        .unwrap_or(false)
}

fn job_status_changed(
    old: &DynamicObject,
    new: &DynamicObject,
) -> (bool, String, String) {
    match (from_dynamic::<Job>(old), from_dynamic::<Job>(new)) {
        (Ok(old_job), Ok(new_job)) => {
            let (old_ok, old_bad) = job_counters(&old_job);
            let (new_ok, new_bad) = job_counters(&new_job);
            (
                old_ok != new_ok || old_bad != new_bad,
                format!("{}|{}", old_ok, old_bad),
                format!("{}|{}", new_ok, new_bad),
            )
        }
        _ => (false, String::new(), String::new()),
    }
}

// --- Workflow (status.phase) ---

fn workflow_is_ready(obj: &DynamicObject) -> bool {
    state_matches(obj, WORKFLOW_PHASE_PATH, &["Succeeded"])
}

fn workflow_is_failed(obj: &DynamicObject) -> bool {
    state_matches(obj, WORKFLOW_PHASE_PATH, &["Error", "Failed"])
}

fn workflow_status_changed(
    old: &DynamicObject,
    new: &DynamicObject,
) -> (bool, String, String) {
    state_changed(old, new, WORKFLOW_PHASE_PATH)
}

// --- Managed custom resources (status.actual_state) ---

fn managed_is_ready(obj: &DynamicObject) -> bool {
    state_matches(obj, CUSTOM_STATE_PATH, &["deployed"])
}

fn managed_is_failed(obj: &DynamicObject) -> bool {
    state_matches(obj, CUSTOM_STATE_PATH, &["error", "failed"])
}

fn managed_status_changed(
    old: &DynamicObject,
    new: &DynamicObject,
) -> (bool, String, String) {
    state_changed(old, new, CUSTOM_STATE_PATH)
}

impl DependencyRegistry {
    /// Registry preloaded with every dependency kind the sequencer knows
    /// how to gate on. Kinds absent from the table resolve to the
    /// fail-open default.
    pub fn builtin() -> Self {
        let mut registry = DependencyRegistry::new(DEFAULT_CHECK);

        registry.register(
            "Pod",
            KindCheck {
                is_ready: pod_is_ready,
                // A pod that stopped being ready is retried, not failed.
                is_failed_or_error: never_failed,
                status_changed: pod_status_changed,
            },
        );
        registry.register(
            "Job",
            KindCheck {
                is_ready: job_is_ready,
                is_failed_or_error: job_is_failed,
                status_changed: job_status_changed,
            },
        );

        // Readiness is not tracked at this granularity.
        registry.register("Service", DEFAULT_CHECK);
        registry.register("Deployment", DEFAULT_CHECK);
        registry.register("StatefulSet", DEFAULT_CHECK);

        registry.register(
            "Workflow",
            KindCheck {
                is_ready: workflow_is_ready,
                is_failed_or_error: workflow_is_failed,
                status_changed: workflow_status_changed,
            },
        );

        let managed = KindCheck {
            is_ready: managed_is_ready,
            is_failed_or_error: managed_is_failed,
            status_changed: managed_status_changed,
        };
        registry.register("ManagedChart", managed);
        registry.register("ManagedChartGroup", managed);
        registry.register("ManagedManifest", managed);

        registry
    }
}
