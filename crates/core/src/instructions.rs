//! Prompt-Instruction Generator
//!
//! Renders the catalog and the protocol rules into natural-language
//! instructions for the upstream text generator. This is the producer-side
//! counterpart of the extractor: it describes exactly the document shape the
//! extractor accepts as canonical. Purely advisory text, deterministic for a
//! given catalog version, with no failure modes.

use std::fmt::Write;

use crate::catalog::Catalog;

const PROTOCOL_RULES: &str = r#"Protocol rules (the renderer rejects anything else):
- Emit the visual for a step as a JSON array of messages under
  "visual": {"type": "a2ui", "a2ui_messages": [...]} on that step object.
- Each message object has exactly one top-level key: "surfaceUpdate",
  "beginRendering", or "dataModelUpdate".
- "surfaceUpdate" carries {"surfaceId": ..., "components": [...]}. Every
  component is {"id": "<unique id>", "component": {"<TypeName>": {...props}}}
  and the "component" object must contain exactly one type key.
- Every message array must contain one "beginRendering" message:
  {"beginRendering": {"surfaceId": ..., "catalogId": ..., "root": "<id>"}}.
  "root" names the component id to activate.
- Component ids must be unique within one surfaceUpdate."#;

const DOCUMENT_EXAMPLE: &str = r#"Example step with a visual:
{
  "help_steps": [
    {
      "step_number": 1,
      "explanation": "Start at 27 on the number line and jump forward 5.",
      "visual": {
        "type": "a2ui",
        "a2ui_messages": [
          {"surfaceUpdate": {"surfaceId": "help", "components": [
            {"id": "line", "component": {"NumberLine": {"min": 20, "max": 40}}}
          ]}},
          {"beginRendering": {"surfaceId": "help", "catalogId": "<catalog id>", "root": "line"}}
        ]
      }
    }
  ]
}"#;

/// Renders producer-side instructions for one tutoring subject.
///
/// `complexity` is a free-form hint ("grade 3", "introductory") woven into
/// the guidance when present. The output always names the catalog id so the
/// producer can echo it into `beginRendering.catalogId`.
pub fn instructions(catalog: &Catalog, subject: &str, complexity: Option<&str>) -> String {
    let mut text = String::new();

    let _ = writeln!(
        text,
        "When explaining {subject} step by step, accompany steps with a declarative \
         visual wherever one would help."
    );
    if let Some(complexity) = complexity {
        let _ = writeln!(
            text,
            "Pitch both the explanation and the visuals at this level: {complexity}."
        );
    }
    let _ = writeln!(
        text,
        "Visuals use the a2ui component catalog \"{}\". Available components:\n",
        catalog.id()
    );

    for entry in catalog.all() {
        let _ = writeln!(text, "- {}: {}", entry.name, entry.description);
        let _ = writeln!(text, "  Use for: {}.", entry.use_cases.join("; "));
    }

    let _ = writeln!(text, "\n{PROTOCOL_RULES}");
    let _ = write!(
        text,
        "\n{}\n\nIf no component fits a step, omit the \"visual\" field for that step \
         rather than inventing a component type.\n",
        DOCUMENT_EXAMPLE.replace("<catalog id>", catalog.id())
    );

    text
}
