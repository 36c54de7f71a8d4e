use envconfig::Envconfig;

use crate::crd::common::{InitDefaults, ResourceState};

#[derive(Envconfig, Clone, Debug)]
pub struct OperatorConfig {
    #[envconfig(from = "CHARTFLOW_NAMESPACE", default = "default")]
    pub namespace: String,

    /// Target state stamped onto resources whose spec omits one.
    /// Env: CHARTFLOW_DEFAULT_TARGET_STATE
    #[envconfig(from = "CHARTFLOW_DEFAULT_TARGET_STATE", default = "deployed")]
    pub default_target_state: String,

    /// Target state members of a sequenced collection start from; the
    /// sequencer promotes them one at a time.
    /// Env: CHARTFLOW_SEQUENCED_TARGET_STATE
    #[envconfig(
        from = "CHARTFLOW_SEQUENCED_TARGET_STATE",
        default = "uninitialized"
    )]
    pub sequenced_target_state: String,
}

impl OperatorConfig {
    /// Defaults handed to resource `init`. The default target state is an
    /// explicit policy here, never guessed from resource names.
    pub fn init_defaults(&self) -> InitDefaults {
        InitDefaults {
            target_state: ResourceState::from_str(&self.default_target_state),
        }
    }

    /// Defaults applied to members of a sequenced collection.
    pub fn sequenced_defaults(&self) -> InitDefaults {
        InitDefaults {
            target_state: ResourceState::from_str(
                &self.sequenced_target_state,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(default_target: &str, sequenced_target: &str) -> OperatorConfig {
        OperatorConfig {
            namespace: "default".into(),
            default_target_state: default_target.into(),
            sequenced_target_state: sequenced_target.into(),
        }
    }

    #[test]
    fn defaults_parse_into_states() {
        let cfg = config("deployed", "uninitialized");
        assert_eq!(
            cfg.init_defaults().target_state,
            ResourceState::Deployed
        );
        assert_eq!(
            cfg.sequenced_defaults().target_state,
            ResourceState::Uninitialized
        );
    }

    #[test]
    fn unrecognized_state_falls_back_to_unknown() {
        let cfg = config("bogus", "uninitialized");
        assert_eq!(cfg.init_defaults().target_state, ResourceState::Unknown);
    }
}
