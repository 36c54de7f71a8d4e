use crate::crd::common::{
    Condition, ConditionStatus, ConditionType, ResourceState, ResourceStatus,
};

use super::conditions::upsert_condition;

/// Upsert `condition` into the status, then derive the canonical state.
///
/// Mutates only the status it is given; persisting the result is the
/// caller's job.
pub fn set_condition(
    status: &mut ResourceStatus,
    condition: Condition,
    target: ResourceState,
) {
    upsert_condition(&mut status.conditions, condition.clone());
    compute_actual_state(status, &condition, target);
}

/// Recompute `actual_state`, `satisfied` and `reason` from the single most
/// recently applied condition. The stored condition history is never
/// consulted here; it only matters for transition timestamps.
pub fn compute_actual_state(
    status: &mut ResourceStatus,
    condition: &Condition,
    target: ResourceState,
) {
    if condition.status == ConditionStatus::True {
        match condition.type_ {
            ConditionType::Pending => {
                status.actual_state = ResourceState::Pending;
                status.satisfied = status.actual_state == target;
                status.reason = None;
            }
            ConditionType::Initializing => {
                // Observers set this condition almost systematically; a
                // resource that already advanced past initialization must
                // not regress on a duplicate signal.
                if matches!(
                    status.actual_state,
                    ResourceState::Uninitialized | ResourceState::Unknown
                ) {
                    status.actual_state = ResourceState::Initialized;
                    status.satisfied = status.actual_state == target;
                    status.reason = None;
                }
            }
            ConditionType::Running => {
                // Still deploying; never satisfies a terminal target.
                status.actual_state = ResourceState::Running;
                status.satisfied = false;
                status.reason = None;
            }
            ConditionType::Deployed => {
                status.actual_state = ResourceState::Deployed;
                status.satisfied = status.actual_state == target;
                status.reason = None;
            }
            ConditionType::Failed => {
                status.actual_state = ResourceState::Failed;
                status.satisfied = false;
                status.reason = condition.reason.clone();
            }
            ConditionType::Irreconcilable | ConditionType::Error => {
                status.actual_state = ResourceState::Error;
                status.satisfied = false;
                status.reason = condition.reason.clone();
            }
            _ => {
                status.satisfied = status.actual_state == target;
                status.reason = None;
            }
        }
    } else if condition.type_ == ConditionType::Deployed {
        status.actual_state = ResourceState::Uninstalled;
        status.satisfied = status.actual_state == target;
        status.reason = None;
    } else {
        status.satisfied = status.actual_state == target;
        status.reason = None;
    }
}
