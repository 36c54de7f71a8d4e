#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

    use crate::controller::collections::Collection;
    use crate::crd::common::{
        LifecycleResource, ResourceState, ResourceStatus,
    };
    use crate::crd::managed_chart::{ManagedChart, ManagedChartSpec};

    fn chart(
        name: &str,
        target: ResourceState,
        actual: ResourceState,
    ) -> ManagedChart {
        let mut c = ManagedChart::new(
            name,
            ManagedChartSpec {
                chart_name: name.to_string(),
                namespace: None,
                release: format!("{}-release", name),
                source: None,
                dependencies: Vec::new(),
                values: None,
                upgrade: None,
                target_state: Some(target),
                revision_history_limit: None,
            },
        );
        c.status = Some(ResourceStatus {
            actual_state: actual,
            ..ResourceStatus::default()
        });
        c
    }

    fn owner(name: &str) -> OwnerReference {
        OwnerReference {
            api_version: "chartflow.io/v1alpha1".into(),
            kind: "ManagedChartGroup".into(),
            name: name.into(),
            uid: "42".into(),
            ..OwnerReference::default()
        }
    }

    #[test]
    fn first_disabled_member_is_next() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
                chart(
                    "glance",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
            ],
        );
        assert_eq!(
            charts.next_to_enable().map(|c| c.resource_name()),
            Some("keystone")
        );
    }

    #[test]
    fn in_flight_member_blocks_everything_behind_it() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Deployed,
                    ResourceState::Running,
                ),
                chart(
                    "glance",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
                chart(
                    "horizon",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
            ],
        );
        assert!(charts.next_to_enable().is_none());
    }

    #[test]
    fn deployed_members_unblock_the_next_one() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
                chart(
                    "glance",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
                chart(
                    "horizon",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
            ],
        );
        assert_eq!(
            charts.next_to_enable().map(|c| c.resource_name()),
            Some("horizon")
        );
    }

    #[test]
    fn fully_enabled_collection_has_no_next() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
                chart(
                    "glance",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
            ],
        );
        assert!(charts.next_to_enable().is_none());
        assert!(charts.is_ready());
    }

    #[test]
    fn all_disabled_filters_by_target() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
                chart(
                    "glance",
                    ResourceState::Uninitialized,
                    ResourceState::Uninitialized,
                ),
            ],
        );
        let disabled = charts.all_disabled();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].resource_name(), "glance");
    }

    #[test]
    fn one_failed_member_fails_the_collection() {
        let charts = Collection::with_items(
            "openstack",
            vec![
                chart(
                    "keystone",
                    ResourceState::Deployed,
                    ResourceState::Deployed,
                ),
                chart("glance", ResourceState::Deployed, ResourceState::Error),
            ],
        );
        assert!(charts.is_failed_or_error());
        assert!(!charts.is_ready());
    }

    #[test]
    fn owner_references_must_match_exactly() {
        let refs = vec![owner("openstack")];
        let mut keystone = chart(
            "keystone",
            ResourceState::Deployed,
            ResourceState::Deployed,
        );
        keystone.metadata.owner_references = Some(refs.clone());
        let mut glance = chart(
            "glance",
            ResourceState::Deployed,
            ResourceState::Deployed,
        );
        glance.metadata.owner_references = Some(refs.clone());

        let charts = Collection::with_items(
            "openstack",
            vec![keystone.clone(), glance.clone()],
        );
        assert!(charts.check_owner_reference(&refs));

        glance.metadata.owner_references = Some(vec![owner("other")]);
        let charts =
            Collection::with_items("openstack", vec![keystone, glance]);
        assert!(!charts.check_owner_reference(&refs));
    }

    #[test]
    fn states_summarizes_every_member() {
        let charts = Collection::with_items(
            "openstack",
            vec![chart(
                "keystone",
                ResourceState::Deployed,
                ResourceState::Running,
            )],
        );
        assert_eq!(charts.states(), " [keystone:deployed:running]");
        assert_eq!(charts.name(), "openstack");
    }
}
