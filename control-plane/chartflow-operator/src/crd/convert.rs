use kube::core::DynamicObject;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failure to move between a typed resource and its dynamic snapshot form.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("failed to encode {kind}/{name}: {source}")]
    Encode {
        kind: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {kind}/{name}: {source}")]
    Decode {
        kind: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

fn kind_of(obj: &DynamicObject) -> String {
    obj.types
        .as_ref()
        .map(|t| t.kind.clone())
        .unwrap_or_default()
}

fn name_of(obj: &DynamicObject) -> String {
    obj.metadata.name.clone().unwrap_or_default()
}

/// Decode a dynamic snapshot into a typed resource.
pub fn from_dynamic<T: DeserializeOwned>(
    obj: &DynamicObject,
) -> Result<T, ConvertError> {
    let value =
        serde_json::to_value(obj).map_err(|e| ConvertError::Encode {
            kind: kind_of(obj),
            name: name_of(obj),
            source: e,
        })?;
    serde_json::from_value(value).map_err(|e| ConvertError::Decode {
        kind: kind_of(obj),
        name: name_of(obj),
        source: e,
    })
}

/// Encode a typed resource into its dynamic snapshot form.
pub fn to_dynamic<T: Serialize>(
    kind: &str,
    name: &str,
    obj: &T,
) -> Result<DynamicObject, ConvertError> {
    let value =
        serde_json::to_value(obj).map_err(|e| ConvertError::Encode {
            kind: kind.to_string(),
            name: name.to_string(),
            source: e,
        })?;
    serde_json::from_value(value).map_err(|e| ConvertError::Decode {
        kind: kind.to_string(),
        name: name.to_string(),
        source: e,
    })
}
