//! Visual Payload Extractor
//!
//! Turns the raw text of an upstream generation into a validated message
//! sequence for one explanation step, or into a definitive absence. The
//! producer is a free-form text generator, so the input is untrusted: it may
//! be malformed JSON, use a legacy layout, nest the payload differently, or
//! carry structurally invalid messages. Every failure collapses to `None` at
//! the public boundary; only the logs distinguish the root cause, and the
//! caller uniformly falls back to plain text (or re-prompts).

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::message::A2uiMessage;
use crate::validator::{self, ValidationResult};

/// Why an extraction attempt produced no message sequence.
///
/// Callers of [`extract`] never see this type; it exists for [`try_extract`]
/// users (and tests) that want the cause machine-readable instead of logged.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The response text is not well-formed JSON.
    #[error("response is not well-formed JSON: {0}")]
    Parse(serde_json::Error),
    /// The JSON parsed but matched none of the accepted document shapes, or
    /// the requested step number was not present.
    #[error("no recognized visual payload for step {step_number}")]
    Shape { step_number: i64 },
    /// The candidate array was found but rejected by the validator.
    #[error("message sequence rejected: {reason}")]
    Structural { reason: String },
    /// The sequence passed validation but would not decode into the typed
    /// model (e.g. a non-string component id, which the structural rules do
    /// not reject).
    #[error("validated sequence failed typed decoding: {0}")]
    Decode(serde_json::Error),
}

/// Where in the document the candidate array was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provenance {
    /// `help_steps[] -> visual{type:"a2ui"}.a2ui_messages`
    Canonical,
    /// `help_steps[] -> a2ui_messages`, the deprecated placement.
    Legacy,
    /// The whole document is the message array.
    BareArray,
}

/// Extracts the validated message sequence for `step_number` from raw
/// response text.
///
/// Never panics and never returns an error: parse failures, unrecognized
/// shapes, missing steps, and validation rejections all surface as `None`,
/// each with its own diagnostic log line.
pub fn extract(response_text: &str, step_number: i64) -> Option<Vec<A2uiMessage>> {
    match try_extract(response_text, step_number) {
        Ok(messages) => Some(messages),
        Err(error) => {
            match &error {
                ExtractError::Parse(source) => {
                    debug!(%source, step_number, "help response is not JSON, skipping visual");
                }
                ExtractError::Shape { .. } => {
                    debug!(step_number, "no a2ui payload found for step");
                }
                ExtractError::Structural { reason } => {
                    warn!(%reason, step_number, "a2ui message sequence rejected");
                }
                ExtractError::Decode(source) => {
                    warn!(%source, step_number, "a2ui message sequence failed typed decoding");
                }
            }
            None
        }
    }
}

/// Like [`extract`], but reports the failure cause instead of logging it away.
pub fn try_extract(
    response_text: &str,
    step_number: i64,
) -> Result<Vec<A2uiMessage>, ExtractError> {
    let document: Value = serde_json::from_str(response_text).map_err(ExtractError::Parse)?;

    let (candidate, provenance) =
        locate_candidate(&document, step_number).ok_or(ExtractError::Shape { step_number })?;
    if provenance == Provenance::Legacy {
        warn!(
            step_number,
            "step uses legacy top-level 'a2ui_messages' placement, accepting anyway"
        );
    }

    match validator::validate(candidate) {
        ValidationResult::Valid {
            component_count,
            message_types,
        } => {
            // Per-message decode via the same priority-key dispatch the
            // validator applied, so a message the validator accepted is not
            // second-guessed over extra top-level keys.
            let messages: Vec<A2uiMessage> = candidate
                .as_array()
                .into_iter()
                .flatten()
                .map(A2uiMessage::from_value)
                .collect::<Result<_, _>>()
                .map_err(ExtractError::Decode)?;
            info!(
                step_number,
                component_count,
                message_types = ?message_types,
                "extracted a2ui message sequence"
            );
            Ok(messages)
        }
        ValidationResult::Invalid { reason, .. } => Err(ExtractError::Structural { reason }),
    }
}

type ShapeMatcher = fn(&Value, i64) -> Option<(&Value, Provenance)>;

/// Accepted document shapes, tried in priority order; the first match wins
/// and no later matcher is consulted.
const SHAPE_MATCHERS: [ShapeMatcher; 3] = [canonical_shape, legacy_shape, bare_array_shape];

fn locate_candidate(document: &Value, step_number: i64) -> Option<(&Value, Provenance)> {
    SHAPE_MATCHERS
        .iter()
        .find_map(|matcher| matcher(document, step_number))
}

/// First `help_steps` element whose `step_number` equals the target.
fn find_step(document: &Value, step_number: i64) -> Option<&Value> {
    document
        .get("help_steps")?
        .as_array()?
        .iter()
        .find(|step| step.get("step_number").and_then(Value::as_i64) == Some(step_number))
}

fn canonical_shape(document: &Value, step_number: i64) -> Option<(&Value, Provenance)> {
    let visual = find_step(document, step_number)?.get("visual")?;
    if visual.get("type").and_then(Value::as_str) != Some("a2ui") {
        return None;
    }
    let messages = visual.get("a2ui_messages")?;
    Some((messages, Provenance::Canonical))
}

fn legacy_shape(document: &Value, step_number: i64) -> Option<(&Value, Provenance)> {
    let messages = find_step(document, step_number)?.get("a2ui_messages")?;
    Some((messages, Provenance::Legacy))
}

fn bare_array_shape(document: &Value, _step_number: i64) -> Option<(&Value, Provenance)> {
    document
        .is_array()
        .then_some((document, Provenance::BareArray))
}
