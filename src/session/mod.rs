//! The explicit state container owning the active definition.
//!
//! Replaces ad-hoc global mutable state with one owner: a single writer
//! operation ([`FormSession::replace`]) and any number of readers. Both
//! producer paths (editor text and generative service) funnel through the
//! same validator before a swap; a failed candidate never touches the
//! active definition.

use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::types::FormDefinition;
use crate::validation::FormValidator;

pub struct FormSession {
    active: FormDefinition,
    validator: FormValidator,
}

impl FormSession {
    pub fn new(initial: FormDefinition) -> Self {
        Self::with_validator(initial, FormValidator::new())
    }

    pub fn with_validator(initial: FormDefinition, validator: FormValidator) -> Self {
        Self {
            active: initial,
            validator,
        }
    }

    /// A session seeded with the built-in AHC HRSN screening form.
    pub fn seeded() -> Self {
        Self::new(crate::seeds::ahc_hrsn_screening())
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.active
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// The single writer operation: wholesale swap of the active definition.
    /// Callers hand over an already-validated tree.
    pub fn replace(&mut self, definition: FormDefinition) {
        info!(
            title = %definition.title,
            items = definition.item_count(),
            "active definition replaced"
        );
        self.active = definition;
    }

    /// Editor path: parse raw text, validate, swap. On any failure the
    /// active definition is left untouched.
    pub fn apply_text(&mut self, raw: &str) -> Result<()> {
        let definition = self.validator.validate_text(raw)?;
        self.replace(definition);
        Ok(())
    }

    /// Validate an already-parsed candidate and swap it in.
    pub fn apply_candidate(&mut self, candidate: &Value) -> Result<()> {
        let definition = self.validator.validate(candidate)?;
        self.replace(definition);
        Ok(())
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("active", &self.active.title)
            .finish_non_exhaustive()
    }
}
