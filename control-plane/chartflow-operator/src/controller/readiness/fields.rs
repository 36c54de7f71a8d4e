use kube::core::DynamicObject;
use serde_json::Value;

/// Resolve a dot-separated path inside a snapshot's payload tree.
///
/// Any missing or mistyped segment yields the empty string; callers treat
/// "" as "not yet observed", never as a failing value.
pub fn extract_field(obj: &DynamicObject, path: &str) -> String {
    let mut current = &obj.data;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return match current.get(segment) {
                Some(Value::String(s)) => s.clone(),
                _ => String::new(),
            };
        }
        match current.get(segment) {
            Some(next) if next.is_object() => current = next,
            _ => return String::new(),
        }
    }

    String::new()
}

/// True when the value at `path` equals one of the expected values.
pub fn state_matches(
    obj: &DynamicObject,
    path: &str,
    expected: &[&str],
) -> bool {
    let actual = extract_field(obj, path);
    expected.iter().any(|e| *e == actual)
}

/// Compare the value at `path` between two snapshots of the same kind.
///
/// "" counts as "not yet observed" on either side and is never reported as
/// a change, so the first observation cannot raise a false positive.
pub fn state_changed(
    old: &DynamicObject,
    new: &DynamicObject,
    path: &str,
) -> (bool, String, String) {
    let before = extract_field(old, path);
    let after = extract_field(new, path);
    let changed = !before.is_empty() && !after.is_empty() && before != after;
    (changed, before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::{ApiResource, GroupVersionKind};
    use serde_json::json;

    fn snapshot(data: serde_json::Value) -> DynamicObject {
        let gvk = GroupVersionKind::gvk("example.io", "v1", "Widget");
        let mut obj = DynamicObject::new("w", &ApiResource::from_gvk(&gvk));
        obj.data = data;
        obj
    }

    fn obj_field(obj: &DynamicObject) -> String {
        extract_field(obj, "status.actual_state")
    }

    #[test]
    fn walks_nested_maps() {
        let obj = snapshot(json!({"status": {"actual_state": "deployed"}}));
        assert_eq!(obj_field(&obj), "deployed");
    }

    #[test]
    fn missing_segment_yields_empty() {
        let obj = snapshot(json!({"spec": {}}));
        assert_eq!(obj_field(&obj), "");
    }

    #[test]
    fn mistyped_segment_yields_empty() {
        let obj = snapshot(json!({"status": "deployed"}));
        assert_eq!(obj_field(&obj), "");
        let obj = snapshot(json!({"status": {"actual_state": 3}}));
        assert_eq!(obj_field(&obj), "");
    }

    #[test]
    fn unobserved_side_is_never_a_change() {
        let old = snapshot(json!({}));
        let new = snapshot(json!({"status": {"actual_state": "deployed"}}));
        let (changed, before, after) =
            state_changed(&old, &new, "status.actual_state");
        assert!(!changed);
        assert_eq!(before, "");
        assert_eq!(after, "deployed");
    }

    #[test]
    fn differing_observed_values_are_a_change() {
        let old = snapshot(json!({"status": {"actual_state": "running"}}));
        let new = snapshot(json!({"status": {"actual_state": "deployed"}}));
        let (changed, before, after) =
            state_changed(&old, &new, "status.actual_state");
        assert!(changed);
        assert_eq!(before, "running");
        assert_eq!(after, "deployed");
    }
}
