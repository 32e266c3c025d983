//! A2UI Message Model
//!
//! This module defines the typed shapes of the declarative UI protocol: the
//! three control messages a producer may emit for an explanation step, and the
//! component instances nested inside a `surfaceUpdate`. On the wire every
//! message is an object with exactly one top-level key naming its kind, which
//! maps directly onto serde's externally-tagged enum representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The kind tag of a recognized message, as it appears on the wire.
///
/// The validator accumulates these while walking a candidate sequence so that
/// diagnostics can report which message kinds were seen before a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    SurfaceUpdate,
    BeginRendering,
    DataModelUpdate,
}

impl MessageType {
    /// Returns the wire-format tag for this message kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::SurfaceUpdate => "surfaceUpdate",
            MessageType::BeginRendering => "beginRendering",
            MessageType::DataModelUpdate => "dataModelUpdate",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of the declarative UI protocol.
///
/// The closed set of variants mirrors the three top-level keys a producer may
/// emit. Anything else is rejected by the validator before decoding is
/// attempted, so this enum never needs a catch-all variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum A2uiMessage {
    /// Declares (or replaces) component instances on a surface.
    #[serde(rename = "surfaceUpdate")]
    SurfaceUpdate(SurfaceUpdate),
    /// Activates a root component on a surface under a catalog version.
    #[serde(rename = "beginRendering")]
    BeginRendering(BeginRendering),
    /// Opaque data payload; its structure is a contract between producer and
    /// renderer and is not constrained here.
    #[serde(rename = "dataModelUpdate")]
    DataModelUpdate(Value),
}

impl A2uiMessage {
    /// Decodes one message object by its discriminant key.
    ///
    /// Keys are checked in the same priority order the validator uses
    /// (`surfaceUpdate`, then `beginRendering`, then `dataModelUpdate`); the
    /// first one present decides the variant and any extra keys are ignored.
    /// This is deliberately looser than the derived `Deserialize`, which
    /// insists on exactly one top-level key: a producer that piles extra keys
    /// onto a message still gets the variant the priority rule assigns it.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        use serde::de::Error;

        let object = value
            .as_object()
            .ok_or_else(|| serde_json::Error::custom("message is not an object"))?;

        if let Some(update) = object.get("surfaceUpdate") {
            Ok(A2uiMessage::SurfaceUpdate(serde_json::from_value(
                update.clone(),
            )?))
        } else if let Some(begin) = object.get("beginRendering") {
            Ok(A2uiMessage::BeginRendering(serde_json::from_value(
                begin.clone(),
            )?))
        } else if let Some(data) = object.get("dataModelUpdate") {
            Ok(A2uiMessage::DataModelUpdate(data.clone()))
        } else {
            Err(serde_json::Error::custom("no recognized message key"))
        }
    }

    /// Returns the kind tag of this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            A2uiMessage::SurfaceUpdate(_) => MessageType::SurfaceUpdate,
            A2uiMessage::BeginRendering(_) => MessageType::BeginRendering,
            A2uiMessage::DataModelUpdate(_) => MessageType::DataModelUpdate,
        }
    }
}

/// Payload of a `surfaceUpdate` message.
///
/// `components` preserves insertion order; later entries with a duplicate id
/// are not merged, they simply coexist and the renderer decides what wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    #[serde(default)]
    pub surface_id: String,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
}

/// One concrete visual element declared inside a `surfaceUpdate`.
///
/// `component` must hold exactly one entry: the key is the component type name
/// and the value is a type-specific property bag that only the catalog and the
/// renderer understand. The cardinality rule is enforced by the validator, not
/// by this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentInstance {
    pub id: String,
    pub component: Map<String, Value>,
}

impl ComponentInstance {
    /// Returns the component type name, if the single-key rule holds.
    pub fn type_name(&self) -> Option<&str> {
        if self.component.len() == 1 {
            self.component.keys().next().map(String::as_str)
        } else {
            None
        }
    }
}

/// Payload of a `beginRendering` message.
///
/// Only `root` is mandatory; producers routinely omit `catalogId` and the
/// protocol tolerates that (version alignment is a caller concern).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    #[serde(default)]
    pub surface_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    pub root: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn surface_update_round_trips_with_single_top_level_key() {
        let message = A2uiMessage::SurfaceUpdate(SurfaceUpdate {
            surface_id: "help".to_string(),
            components: vec![ComponentInstance {
                id: "root".to_string(),
                component: {
                    let mut map = Map::new();
                    map.insert("MathText".to_string(), json!({"text": "x = 5"}));
                    map
                },
            }],
        });

        let value = serde_json::to_value(&message).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("surfaceUpdate"));

        let decoded: A2uiMessage = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn begin_rendering_tolerates_missing_catalog_id() {
        let value = json!({
            "beginRendering": {"surfaceId": "help", "root": "root"}
        });

        let message: A2uiMessage = serde_json::from_value(value).unwrap();
        match message {
            A2uiMessage::BeginRendering(begin) => {
                assert_eq!(begin.surface_id, "help");
                assert_eq!(begin.catalog_id, None);
                assert_eq!(begin.root, "root");
            }
            other => panic!("expected beginRendering, got {:?}", other),
        }
    }

    #[test]
    fn begin_rendering_omits_absent_catalog_id_on_serialize() {
        let message = A2uiMessage::BeginRendering(BeginRendering {
            surface_id: "help".to_string(),
            catalog_id: None,
            root: "root".to_string(),
        });

        let value = serde_json::to_value(&message).unwrap();
        assert!(value["beginRendering"].get("catalogId").is_none());
    }

    #[test]
    fn surface_update_defaults_absent_fields() {
        let value = json!({"surfaceUpdate": {}});
        let message: A2uiMessage = serde_json::from_value(value).unwrap();
        match message {
            A2uiMessage::SurfaceUpdate(update) => {
                assert_eq!(update.surface_id, "");
                assert!(update.components.is_empty());
            }
            other => panic!("expected surfaceUpdate, got {:?}", other),
        }
    }

    #[test]
    fn from_value_picks_the_priority_key_and_ignores_extras() {
        let value = json!({
            "surfaceUpdate": {"surfaceId": "help", "components": [
                {"id": "root", "component": {"MathText": {"text": "x = 5"}}}
            ]},
            "dataModelUpdate": {"values": {"x": 5}}
        });

        let message = A2uiMessage::from_value(&value).unwrap();
        match message {
            A2uiMessage::SurfaceUpdate(update) => {
                assert_eq!(update.surface_id, "help");
                assert_eq!(update.components.len(), 1);
            }
            other => panic!("expected surfaceUpdate, got {:?}", other),
        }
    }

    #[test]
    fn from_value_rejects_non_objects_and_unrecognized_keys() {
        assert!(A2uiMessage::from_value(&json!("text")).is_err());
        assert!(A2uiMessage::from_value(&json!({"paintPixels": {}})).is_err());
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let value = json!({"paintPixels": {}});
        let result: Result<A2uiMessage, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn type_name_requires_exactly_one_key() {
        let single = ComponentInstance {
            id: "c0".to_string(),
            component: {
                let mut map = Map::new();
                map.insert("NumberLine".to_string(), json!({}));
                map
            },
        };
        assert_eq!(single.type_name(), Some("NumberLine"));

        let double = ComponentInstance {
            id: "c1".to_string(),
            component: {
                let mut map = Map::new();
                map.insert("NumberLine".to_string(), json!({}));
                map.insert("BarModel".to_string(), json!({}));
                map
            },
        };
        assert_eq!(double.type_name(), None);
    }

    #[test]
    fn message_type_display_matches_wire_tags() {
        assert_eq!(MessageType::SurfaceUpdate.to_string(), "surfaceUpdate");
        assert_eq!(MessageType::BeginRendering.to_string(), "beginRendering");
        assert_eq!(MessageType::DataModelUpdate.to_string(), "dataModelUpdate");
    }
}
