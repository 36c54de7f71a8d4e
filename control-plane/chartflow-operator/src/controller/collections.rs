use std::fmt::Write as _;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

use crate::crd::common::LifecycleResource;

/// Ordered set of same-kind child resources sharing a logical parent.
///
/// Member order is the declared activation order; the sequencer walks it
/// front to back.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    name: String,
    items: Vec<T>,
}

impl<T: LifecycleResource> Collection<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(name: impl Into<String>, items: Vec<T>) -> Self {
        Collection {
            name: name.into(),
            items,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The next member allowed to start activating.
    ///
    /// A member that has been enabled but has not reached deployed blocks
    /// everything behind it, so at most one activation is in flight at a
    /// time. None means either an activation is in flight or every member
    /// has already been enabled.
    pub fn next_to_enable(&self) -> Option<&T> {
        for item in &self.items {
            if !item.is_target_uninitialized() && !item.is_ready() {
                // Enabled but still deploying.
                return None;
            }
            if item.is_target_uninitialized() {
                return Some(item);
            }
        }

        // Everything was done.
        None
    }

    /// Members that have not been enabled yet. Read-only filter.
    pub fn all_disabled(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.is_target_uninitialized())
            .collect()
    }

    /// A collection is ready only when every member is.
    pub fn is_ready(&self) -> bool {
        self.items.iter().all(|item| item.is_ready())
    }

    /// A single failed member fails the whole collection.
    pub fn is_failed_or_error(&self) -> bool {
        self.items.iter().any(|item| item.is_failed_or_error())
    }

    /// Every member carries exactly the expected owner references.
    pub fn check_owner_reference(&self, refs: &[OwnerReference]) -> bool {
        self.items.iter().all(|item| item.owner_references() == refs)
    }

    /// Compact `[name:target:actual]` summary for debug logging.
    pub fn states(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            let _ = write!(
                out,
                " [{}:{}:{}]",
                item.resource_name(),
                item.target_state(),
                item.actual_state()
            );
        }
        out
    }
}
