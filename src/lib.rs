//! # clinforms
//!
//! A Rust engine for clinical questionnaire builders: the hierarchical
//! form-definition model, the validation gate every externally-sourced
//! candidate must pass, and the recursive renderer that projects a
//! validated tree into display-ready control contracts.
//!
//! ## Features
//!
//! - **Typed definition model**: sections, groups, and leaf fields as a
//!   tagged union, each variant carrying only the fields legal for it
//! - **Fail-closed validation**: untrusted JSON (hand-edited text or a
//!   generative-service response) either becomes a canonical
//!   [`FormDefinition`] or is rejected with a stable, path-carrying reason
//! - **Semantic rendering**: deterministic projection of a validated tree
//!   into control contracts, never pixels
//! - **Session plumbing**: single-writer state container, editor buffer,
//!   and a busy-gated generative-service boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use clinforms::*;
//!
//! # fn example() -> Result<()> {
//! let candidate = serde_json::json!({
//!     "title": "Intake", "version": "1.0.0", "publisher": "Clinic",
//!     "items": [
//!         { "id": "q1", "label": "Date of visit", "type": "DATE" }
//!     ]
//! });
//!
//! let validator = FormValidator::new();
//! let definition = validator.validate(&candidate)?;
//!
//! let projection = FormRenderer::new().project(&definition);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod designer;
pub mod editor;
pub mod error;
pub mod render;
pub mod seeds;
pub mod session;
pub mod types;
pub mod validation;

pub use analytics::FormInsights;
pub use designer::{
    AiDesigner, BUILTIN_TEMPLATES, FormGenerator, PromptTemplate, TemplateCategory, build_prompt,
    templates_matching,
};
pub use editor::SchemaEditor;
pub use error::Result; // Our Result type takes precedence
pub use error::{FormEngineError, ValidationError};
pub use render::{
    ControlContract, ControlProjection, FormBody, FormProjection, FormRenderer, InputKind, Node,
    SELECT_NEUTRAL_CHOICE,
};
pub use session::FormSession;
pub use types::{ChoiceItem, ContainerItem, ControlType, FieldItem, FormDefinition, FormItem};
pub use validation::{DEFAULT_MAX_DEPTH, FormValidator, codes};
