//! Message Sequence Validator
//!
//! A single pass over an untyped candidate array that either accepts it as a
//! renderable message sequence or rejects it with the first rule violation
//! encountered. Counters accumulate in traversal order so that even a
//! rejection reports how far the walk got. Downstream rendering code relies on
//! this gate absolutely: an invalid sequence must never reach the renderer.
//!
//! The validator checks structure only. It does not consult the catalog (type
//! names are accepted generically), does not cross-check `beginRendering.root`
//! against emitted component ids, and does not look inside property bags.

use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::message::MessageType;

/// Outcome of validating one candidate message sequence.
///
/// Both variants carry the component count and the recognized message kinds
/// accumulated up to the point the walk stopped, which is the whole diagnostic
/// value of a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid {
        component_count: usize,
        message_types: Vec<MessageType>,
    },
    Invalid {
        reason: String,
        component_count: usize,
        message_types: Vec<MessageType>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    pub fn component_count(&self) -> usize {
        match self {
            ValidationResult::Valid { component_count, .. }
            | ValidationResult::Invalid { component_count, .. } => *component_count,
        }
    }

    pub fn message_types(&self) -> &[MessageType] {
        match self {
            ValidationResult::Valid { message_types, .. }
            | ValidationResult::Invalid { message_types, .. } => message_types,
        }
    }

    /// The rejection reason, if the sequence was rejected.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid { .. } => None,
            ValidationResult::Invalid { reason, .. } => Some(reason),
        }
    }
}

/// Validates a candidate message sequence.
///
/// Total from the caller's perspective: never panics, never returns an error
/// type. A panic anywhere in the traversal is caught at this boundary and
/// reported as a generic `Invalid` so one bad payload cannot take down the
/// process.
pub fn validate(candidate: &Value) -> ValidationResult {
    match catch_unwind(AssertUnwindSafe(|| run_rules(candidate))) {
        Ok(result) => result,
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            ValidationResult::Invalid {
                reason: format!("Validation exception: {detail}"),
                component_count: 0,
                message_types: Vec::new(),
            }
        }
    }
}

const EMPTY_COMPONENTS: &[Value] = &[];

fn run_rules(candidate: &Value) -> ValidationResult {
    let mut component_count = 0usize;
    let mut message_types: Vec<MessageType> = Vec::new();

    let Some(messages) = candidate.as_array() else {
        return ValidationResult::Invalid {
            reason: "Messages must be an array".to_string(),
            component_count,
            message_types,
        };
    };

    let mut has_begin_rendering = false;

    for (idx, message) in messages.iter().enumerate() {
        let Some(object) = message.as_object() else {
            return ValidationResult::Invalid {
                reason: format!("Message {idx} is not an object"),
                component_count,
                message_types,
            };
        };

        // Discriminant keys are checked in a fixed priority order; the first
        // one present decides the message kind.
        if let Some(update) = object.get("surfaceUpdate") {
            message_types.push(MessageType::SurfaceUpdate);

            // Absent components default to the empty sequence; a present but
            // non-array value is malformed, not empty.
            let components = match update.get("components") {
                None => EMPTY_COMPONENTS,
                Some(value) => match value.as_array() {
                    Some(list) => list.as_slice(),
                    None => {
                        return ValidationResult::Invalid {
                            reason: "surfaceUpdate 'components' must be an array".to_string(),
                            component_count,
                            message_types,
                        };
                    }
                },
            };
            component_count += components.len();

            for (comp_idx, component) in components.iter().enumerate() {
                let fields = component.as_object();
                let has_required = fields
                    .is_some_and(|f| f.contains_key("id") && f.contains_key("component"));
                if !has_required {
                    return ValidationResult::Invalid {
                        reason: format!(
                            "Component {comp_idx} missing 'id' or 'component' field"
                        ),
                        component_count,
                        message_types,
                    };
                }

                let type_key_count = fields
                    .and_then(|f| f.get("component"))
                    .and_then(Value::as_object)
                    .map(|bag| bag.len());
                if type_key_count != Some(1) {
                    return ValidationResult::Invalid {
                        reason: format!("Component {comp_idx} must have exactly one type key"),
                        component_count,
                        message_types,
                    };
                }
            }
        } else if let Some(begin) = object.get("beginRendering") {
            message_types.push(MessageType::BeginRendering);
            has_begin_rendering = true;

            if begin.get("root").is_none() {
                return ValidationResult::Invalid {
                    reason: "beginRendering missing 'root' field".to_string(),
                    component_count,
                    message_types,
                };
            }
        } else if object.contains_key("dataModelUpdate") {
            // Opaque payload, nothing further to check.
            message_types.push(MessageType::DataModelUpdate);
        } else {
            return ValidationResult::Invalid {
                reason: format!("Unknown message type at index {idx}"),
                component_count,
                message_types,
            };
        }
    }

    if !has_begin_rendering {
        return ValidationResult::Invalid {
            reason: "Missing beginRendering message".to_string(),
            component_count,
            message_types,
        };
    }

    ValidationResult::Valid {
        component_count,
        message_types,
    }
}
