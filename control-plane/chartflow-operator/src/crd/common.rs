use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical lifecycle state of a chart, chart group or manifest.
#[derive(
    Deserialize,
    Serialize,
    Clone,
    Copy,
    Debug,
    JsonSchema,
    PartialEq,
    Eq,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceState {
    /// The resource exists but has not been acted upon yet.
    #[default]
    Uninitialized,
    /// The resource is in an uncertain state.
    Unknown,
    Initialized,
    Pending,
    Running,
    /// The underlying release has been pushed to the cluster.
    Deployed,
    Uninstalled,
    Failed,
    Error,
}

impl ResourceState {
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "uninitialized" => ResourceState::Uninitialized,
            "initialized" => ResourceState::Initialized,
            "pending" => ResourceState::Pending,
            "running" => ResourceState::Running,
            "deployed" => ResourceState::Deployed,
            "uninstalled" => ResourceState::Uninstalled,
            "failed" => ResourceState::Failed,
            "error" => ResourceState::Error,
            _ => ResourceState::Unknown,
        }
    }
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceState::Uninitialized => "uninitialized",
            ResourceState::Unknown => "unknown",
            ResourceState::Initialized => "initialized",
            ResourceState::Pending => "pending",
            ResourceState::Running => "running",
            ResourceState::Deployed => "deployed",
            ResourceState::Uninstalled => "uninstalled",
            ResourceState::Failed => "failed",
            ResourceState::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq,
)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq,
)]
pub enum ConditionType {
    Irreconcilable,
    Pending,
    Initializing,
    Error,
    Running,
    Deployed,
    Failed,
    #[serde(other)]
    Unknown,
}

// Fine-grained reasons attached to conditions by observers.
pub const REASON_INSTALL_SUCCESSFUL: &str = "InstallSuccessful";
pub const REASON_RECONCILE_SUCCESSFUL: &str = "ReconcileSuccessful";
pub const REASON_UNINSTALL_SUCCESSFUL: &str = "UninstallSuccessful";
pub const REASON_UPDATE_SUCCESSFUL: &str = "UpdateSuccessful";
pub const REASON_UNDERLYING_RESOURCES_READY: &str = "UnderlyingResourcesReady";
pub const REASON_UNDERLYING_RESOURCES_ERROR: &str = "UnderlyingResourcesError";
pub const REASON_INSTALL_ERROR: &str = "InstallError";
pub const REASON_RECONCILE_ERROR: &str = "ReconcileError";
pub const REASON_UNINSTALL_ERROR: &str = "UninstallError";
pub const REASON_UPDATE_ERROR: &str = "UpdateError";

/// One observed condition of a managed resource. A condition that is not
/// happening simply does not show up in the list.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Name of the underlying resource the observation came from.
    #[serde(rename = "resourceName", skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(
        rename = "resourceVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_version: Option<i32>,
    #[serde(
        rename = "lastTransitionTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(type_: ConditionType, status: ConditionStatus) -> Self {
        Condition {
            type_,
            status,
            reason: None,
            message: None,
            resource_name: None,
            resource_version: None,
            last_transition_time: None,
        }
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Status shared by every managed resource kind.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct ResourceStatus {
    /// Whether the actual state currently satisfies the target state.
    pub satisfied: bool,
    /// Reason for any related failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub actual_state: ResourceState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Defaults applied when a resource spec leaves lifecycle fields unset.
#[derive(Clone, Copy, Debug)]
pub struct InitDefaults {
    /// Target state stamped onto specs that do not declare one.
    pub target_state: ResourceState,
}

impl Default for InitDefaults {
    fn default() -> Self {
        InitDefaults {
            target_state: ResourceState::Deployed,
        }
    }
}

/// Accessors every managed resource kind exposes to the collection
/// aggregator and the activation sequencer.
pub trait LifecycleResource {
    fn resource_name(&self) -> &str;
    fn target_state(&self) -> ResourceState;
    fn actual_state(&self) -> ResourceState;
    fn owner_references(&self) -> &[OwnerReference];
    fn is_deleted(&self) -> bool;

    /// The resource has not been handed to the reconciler yet.
    fn is_target_uninitialized(&self) -> bool {
        self.target_state() == ResourceState::Uninitialized
    }

    fn is_satisfied(&self) -> bool {
        self.target_state() == self.actual_state()
    }

    fn is_ready(&self) -> bool {
        self.actual_state() == ResourceState::Deployed
    }

    fn is_failed_or_error(&self) -> bool {
        matches!(
            self.actual_state(),
            ResourceState::Failed | ResourceState::Error
        )
    }
}
