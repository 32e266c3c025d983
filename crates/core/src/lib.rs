//! A2UI Protocol Core
//!
//! Step-by-step tutoring explanations are rendered as structured, declarative
//! UI rather than free text. An upstream text generator emits a JSON payload
//! describing visual components (a number line, a bar model) plus control
//! messages telling a renderer which component tree to activate; because the
//! producer is a free-form generator, that payload is untrusted.
//!
//! This crate is the validate-then-extract pipeline between the two: the
//! message model, the component catalog, the structural validator, and the
//! extractor that turns a raw response blob into a renderer-ready message
//! sequence or a definitive absence. It renders no pixels, calls no model,
//! and judges only structure, never pedagogy.

pub mod catalog;
pub mod extractor;
pub mod generator;
pub mod instructions;
pub mod message;
pub mod validator;

pub use catalog::{Catalog, CatalogEntry, STANDARD_CATALOG_ID};
pub use extractor::{ExtractError, extract, try_extract};
pub use generator::{StaticVisualGenerator, VisualGenerator};
pub use instructions::instructions;
pub use message::{A2uiMessage, BeginRendering, ComponentInstance, MessageType, SurfaceUpdate};
pub use validator::{ValidationResult, validate};
