//! The generative-service boundary.
//!
//! The engine never talks to a model directly: transports implement
//! [`FormGenerator`] and return raw response text. [`AiDesigner`] wraps the
//! call with the structuring prompt, a re-entrancy gate, and the mandatory
//! validation of the response as an untrusted candidate tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{FormEngineError, Result};
use crate::types::FormDefinition;
use crate::validation::FormValidator;

const STRUCTURING_RULES: &str = "\
STRUCTURE RULES:
- Use hierarchical nesting: SECTION (top level), GROUP (middle level), and standard fields (TEXT, NUMBER, DATE, CHECKBOX, SELECT, RADIO).
- Add indices like \"I.\", \"1.\", \"a.\" for each question.
- Include LOINC codes for clinical observations.
- Group related fields together.
- Respond with a single JSON object carrying title, version, publisher, and a recursive items array where every item has id, label, and type.";

/// Wrap a user request with the clinical structuring rules sent to the model.
pub fn build_prompt(request: &str) -> String {
    format!(
        "Act as a medical terminology expert. Create an LForms-compatible form definition for: {}.\n{STRUCTURING_RULES}",
        request.trim()
    )
}

/// Transport boundary to the generative service.
///
/// Implementations perform exactly one outbound call per invocation and
/// return the raw response text; parsing and validation stay on this side of
/// the boundary.
#[async_trait]
pub trait FormGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Drives form generation: one request in flight at a time, every response
/// funneled through the validator gate before anyone sees it.
pub struct AiDesigner {
    generator: Arc<dyn FormGenerator>,
    validator: FormValidator,
    busy: AtomicBool,
}

impl AiDesigner {
    pub fn new(generator: Arc<dyn FormGenerator>) -> Self {
        Self::with_validator(generator, FormValidator::new())
    }

    pub fn with_validator(generator: Arc<dyn FormGenerator>, validator: FormValidator) -> Self {
        Self {
            generator,
            validator,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a generation request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Generate a validated definition from a natural-language request.
    ///
    /// While a request is in flight any further trigger is rejected
    /// synchronously with [`FormEngineError::Busy`]; nothing is queued and
    /// nothing reaches the service. Every failure path leaves the gate open
    /// again and no state behind.
    pub async fn generate_definition(&self, request: &str) -> Result<FormDefinition> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(FormEngineError::Busy);
        }
        let _gate = BusyGate(&self.busy);

        let prompt = build_prompt(request);
        info!(request_len = request.len(), "requesting form generation");

        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "generation request failed");
                return Err(err);
            }
        };

        let candidate: Value = serde_json::from_str(raw.trim()).map_err(|err| {
            warn!(error = %err, "service response is not JSON");
            FormEngineError::service(format!("response is not valid JSON: {err}"))
        })?;

        let definition = self.validator.validate(&candidate)?;
        info!(
            title = %definition.title,
            items = definition.item_count(),
            "generated definition accepted"
        );
        Ok(definition)
    }
}

impl std::fmt::Debug for AiDesigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiDesigner")
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

/// Clears the busy flag on every exit path.
struct BusyGate<'a>(&'a AtomicBool);

impl Drop for BusyGate<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemplateCategory {
    Clinical,
    Screening,
    Assessment,
    Specialized,
}

/// A verified prompt preset offered by the designer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub category: TemplateCategory,
    pub prompt: &'static str,
}

pub const BUILTIN_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "Vital Signs Log",
        category: TemplateCategory::Clinical,
        prompt: "Full clinical vital signs form: Height, Weight, BP, Heart Rate, Respiration, Temp. Include LOINC codes.",
    },
    PromptTemplate {
        name: "PHQ-9 Screening",
        category: TemplateCategory::Screening,
        prompt: "Patient Health Questionnaire-9 (PHQ-9) for depression assessment. Use 0-3 scale.",
    },
    PromptTemplate {
        name: "SDOH Assessment",
        category: TemplateCategory::Assessment,
        prompt: "Social Determinants of Health: Housing, Food, Transport, and Safety screening.",
    },
    PromptTemplate {
        name: "Diabetes Review",
        category: TemplateCategory::Clinical,
        prompt: "Diabetes follow-up form: A1C, Fasting Glucose, Foot Exam, and Medication adherence.",
    },
    PromptTemplate {
        name: "Pediatric Wellness",
        category: TemplateCategory::Specialized,
        prompt: "Well-child visit for ages 2-5: Development, Diet, Activity, and Immunization status.",
    },
];

/// Case-insensitive name search over the builtin templates.
pub fn templates_matching(term: &str) -> Vec<&'static PromptTemplate> {
    let needle = term.to_lowercase();
    BUILTIN_TEMPLATES
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_request_and_rules() {
        let prompt = build_prompt("  ER intake for stroke patients  ");
        assert!(prompt.contains("ER intake for stroke patients"));
        assert!(prompt.contains("STRUCTURE RULES"));
        assert!(prompt.contains("SECTION"));
    }

    #[test]
    fn template_search_is_case_insensitive() {
        assert_eq!(templates_matching("phq").len(), 1);
        assert_eq!(templates_matching("").len(), BUILTIN_TEMPLATES.len());
        assert!(templates_matching("no such template").is_empty());
    }
}
