//! Upstream Generator Boundary
//!
//! The text generator that produces help-step responses lives outside this
//! crate (it is a model-provider call owned by the orchestration layer). This
//! module defines the seam it is called through, so the extractor can be
//! exercised end to end against any producer, real or canned.

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// The upstream text-generation collaborator.
///
/// Implementations are expected to prepend the output of
/// [`crate::instructions::instructions`] to their prompt; this crate does not
/// construct prompts, select models, or retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VisualGenerator: Send + Sync {
    /// Produces raw response text that is supposed to carry a `help_steps`
    /// document. Callers feed the result straight into
    /// [`crate::extractor::extract`].
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A `VisualGenerator` that returns a fixed canonical payload.
///
/// Useful for wiring and integration tests without external dependencies or
/// API costs.
pub struct StaticVisualGenerator {
    response: String,
}

impl StaticVisualGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// A generator producing one valid number-line step.
    pub fn number_line_example() -> Self {
        Self::new(
            r#"{
  "help_steps": [
    {
      "step_number": 1,
      "explanation": "Start at 27 and jump forward 5 to land on 32.",
      "visual": {
        "type": "a2ui",
        "a2ui_messages": [
          {"surfaceUpdate": {"surfaceId": "help", "components": [
            {"id": "line", "component": {"NumberLine": {"min": 20, "max": 40, "jumps": [[27, 32]]}}}
          ]}},
          {"beginRendering": {"surfaceId": "help", "catalogId": "a2ui/math-v0.1", "root": "line"}}
        ]
      }
    }
  ]
}"#,
        )
    }
}

#[async_trait]
impl VisualGenerator for StaticVisualGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::extractor;
    use crate::instructions::instructions;
    use crate::message::MessageType;

    #[tokio::test]
    async fn static_generator_output_survives_the_extraction_pipeline() {
        let generator = StaticVisualGenerator::number_line_example();
        let prompt = instructions(Catalog::standard(), "addition", Some("grade 2"));

        let response = generator.generate(&prompt).await.unwrap();
        let messages = extractor::extract(&response, 1).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].message_type(), MessageType::BeginRendering);
    }

    #[tokio::test]
    async fn malformed_generator_output_collapses_to_absent() {
        let mut generator = MockVisualGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Ok("I could not produce JSON for this one.".to_string()));

        let response = generator.generate("prompt").await.unwrap();
        assert!(extractor::extract(&response, 1).is_none());
    }
}
