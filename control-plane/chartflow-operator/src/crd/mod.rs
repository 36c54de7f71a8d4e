pub mod common;
pub mod convert;
pub mod managed_chart;
pub mod managed_chart_group;
pub mod managed_manifest;

/// API group shared by every chartflow resource.
pub const API_GROUP: &str = "chartflow.io";
pub const API_VERSION: &str = "v1alpha1";
