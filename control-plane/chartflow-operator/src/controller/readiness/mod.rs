use std::collections::HashMap;

use kube::core::DynamicObject;

pub mod builtin;
pub mod fields;


/// Capability record for one resource kind: readiness, failure and
/// structural-change detection over an opaque snapshot.
#[derive(Clone, Copy)]
pub struct KindCheck {
    pub is_ready: fn(&DynamicObject) -> bool,
    pub is_failed_or_error: fn(&DynamicObject) -> bool,
    pub status_changed:
        fn(&DynamicObject, &DynamicObject) -> (bool, String, String),
}

/// Kind-keyed lookup table of dependency checks.
///
/// Kinds missing from the table resolve to the default check: always
/// ready, never failed, never changed. An unrecognized dependency can
/// therefore never block or fail a rollout, at the cost of not actually
/// gating on it.
pub struct DependencyRegistry {
    checks: HashMap<&'static str, KindCheck>,
    default: KindCheck,
}

impl DependencyRegistry {
    pub fn new(default: KindCheck) -> Self {
        DependencyRegistry {
            checks: HashMap::new(),
            default,
        }
    }

    /// Register or replace the check for a kind.
    pub fn register(&mut self, kind: &'static str, check: KindCheck) {
        self.checks.insert(kind, check);
    }

    pub fn is_ready(&self, obj: &DynamicObject) -> bool {
        (self.check_for(obj).is_ready)(obj)
    }

    pub fn is_failed_or_error(&self, obj: &DynamicObject) -> bool {
        (self.check_for(obj).is_failed_or_error)(obj)
    }

    /// Kind-specific diff of two snapshots of the same kind, with the old
    /// and new values rendered for logging. Snapshots of differing kinds
    /// never compare as changed.
    pub fn status_changed(
        &self,
        old: &DynamicObject,
        new: &DynamicObject,
    ) -> (bool, String, String) {
        if kind_of(old) != kind_of(new) {
            return (false, String::new(), String::new());
        }
        (self.check_for(old).status_changed)(old, new)
    }

    fn check_for(&self, obj: &DynamicObject) -> &KindCheck {
        self.checks.get(kind_of(obj)).unwrap_or(&self.default)
    }
}

fn kind_of(obj: &DynamicObject) -> &str {
    obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or("")
}
