use chrono::Utc;

use crate::crd::common::{Condition, ConditionStatus, ConditionType};

/// Upsert `condition` into a resource's condition list, keyed by type.
///
/// The transition timestamp is refreshed only when the stored status
/// actually changes; re-applying an identical condition carries the prior
/// timestamp forward so transition history stays stable.
pub fn upsert_condition(
    conditions: &mut Vec<Condition>,
    mut condition: Condition,
) {
    let now = Utc::now().to_rfc3339();

    if let Some(idx) =
        conditions.iter().position(|c| c.type_ == condition.type_)
    {
        if conditions[idx].status == condition.status {
            condition.last_transition_time =
                conditions[idx].last_transition_time.clone();
        } else {
            condition.last_transition_time = Some(now);
        }
        conditions[idx] = condition;
        return;
    }

    condition.last_transition_time = Some(now);
    conditions.push(condition);
}

/// Remove the condition with the given type, if present.
pub fn remove_condition(
    conditions: &mut Vec<Condition>,
    type_: ConditionType,
) {
    conditions.retain(|c| c.type_ != type_);
}

/// Find a condition matching both type and status.
pub fn find_condition(
    conditions: &[Condition],
    type_: ConditionType,
    status: ConditionStatus,
) -> Option<&Condition> {
    conditions
        .iter()
        .find(|c| c.type_ == type_ && c.status == status)
}
