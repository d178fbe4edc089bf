//! Semantic projection of a validated definition tree.
//!
//! The renderer decides which control semantics apply to each node and
//! nothing else: no pixels, no styling, no generated identifiers. Projecting
//! the same tree twice yields equal values.

use serde::Serialize;

use crate::types::{ChoiceItem, FieldItem, FormDefinition, FormItem};

/// The neutral unselected choice every `SELECT` control carries, distinct
/// from all authored options.
pub const SELECT_NEUTRAL_CHOICE: &str = "Please select";

/// Message shown when a definition has no items at all.
pub const EMPTY_STATE_MESSAGE: &str = "No fields generated yet.";
/// Secondary hint accompanying the empty state.
pub const EMPTY_STATE_HINT: &str =
    "Use the AI designer or the schema editor to build your form.";

/// Walks a validated tree and emits the resolved display contract for every
/// node. Stateless; safe to share and reuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormRenderer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormProjection {
    pub title: String,
    pub version: String,
    pub publisher: String,
    pub body: FormBody,
}

/// A definition with no root items projects an explicit empty state, never
/// an empty container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FormBody {
    EmptyState { message: String, hint: String },
    Nodes(Vec<Node>),
}

impl FormBody {
    fn empty_state() -> Self {
        FormBody::EmptyState {
            message: EMPTY_STATE_MESSAGE.to_string(),
            hint: EMPTY_STATE_HINT.to_string(),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, FormBody::EmptyState { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// A `SECTION`: heading over its children. Depth is informational only,
    /// used for visual hierarchy downstream.
    SectionHeader {
        id: String,
        heading: String,
        depth: usize,
        children: Vec<Node>,
    },
    /// A `GROUP`: bordered sub-block over its children.
    GroupBlock {
        id: String,
        heading: String,
        depth: usize,
        children: Vec<Node>,
    },
    Control(ControlProjection),
}

/// The resolved display contract for one leaf field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlProjection {
    pub id: String,
    /// Label with the author-supplied index prefixed verbatim; no
    /// auto-numbering is ever computed.
    pub display_label: String,
    /// The "must answer" marker.
    pub must_answer: bool,
    pub description: Option<String>,
    /// LOINC code passed through as a display-only annotation.
    pub loinc_annotation: Option<String>,
    pub depth: usize,
    pub contract: ControlContract,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ControlContract {
    /// Single-value input (`TEXT`, `NUMBER`, `DATE`).
    Input {
        kind: InputKind,
        placeholder: Option<String>,
    },
    /// Single choice from a dropdown list, with a neutral unselected entry
    /// distinct from every real option.
    SingleSelect {
        neutral_choice: String,
        options: Vec<String>,
    },
    /// Mutually exclusive options sharing one input name-group per field id.
    RadioGroup {
        name_group: String,
        options: Vec<String>,
    },
    /// Boolean contract.
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    Text,
    Number,
    Date,
}

impl FormRenderer {
    pub fn new() -> Self {
        FormRenderer
    }

    pub fn project(&self, definition: &FormDefinition) -> FormProjection {
        let body = if definition.items.is_empty() {
            FormBody::empty_state()
        } else {
            FormBody::Nodes(
                definition
                    .items
                    .iter()
                    .map(|item| self.project_item(item, 0))
                    .collect(),
            )
        };

        FormProjection {
            title: definition.title.clone(),
            version: definition.version.clone(),
            publisher: definition.publisher.clone(),
            body,
        }
    }

    fn project_item(&self, item: &FormItem, depth: usize) -> Node {
        match item {
            FormItem::Section(container) => Node::SectionHeader {
                id: container.id.clone(),
                heading: container.label.clone(),
                depth,
                children: self.project_children(&container.items, depth),
            },
            FormItem::Group(container) => Node::GroupBlock {
                id: container.id.clone(),
                heading: container.label.clone(),
                depth,
                children: self.project_children(&container.items, depth),
            },
            FormItem::Text(field) => self.input_control(field, InputKind::Text, depth),
            FormItem::Number(field) => self.input_control(field, InputKind::Number, depth),
            FormItem::Date(field) => self.input_control(field, InputKind::Date, depth),
            FormItem::Checkbox(field) => {
                Node::Control(field_projection(field, depth, ControlContract::Checkbox))
            }
            FormItem::Select(choice) => Node::Control(choice_projection(
                choice,
                depth,
                ControlContract::SingleSelect {
                    neutral_choice: SELECT_NEUTRAL_CHOICE.to_string(),
                    options: choice.options.clone(),
                },
            )),
            FormItem::Radio(choice) => Node::Control(choice_projection(
                choice,
                depth,
                ControlContract::RadioGroup {
                    name_group: choice.id.clone(),
                    options: choice.options.clone(),
                },
            )),
        }
    }

    fn project_children(&self, items: &[FormItem], depth: usize) -> Vec<Node> {
        items
            .iter()
            .map(|child| self.project_item(child, depth + 1))
            .collect()
    }

    fn input_control(&self, field: &FieldItem, kind: InputKind, depth: usize) -> Node {
        Node::Control(field_projection(
            field,
            depth,
            ControlContract::Input {
                kind,
                placeholder: field.placeholder.clone(),
            },
        ))
    }
}

fn field_projection(field: &FieldItem, depth: usize, contract: ControlContract) -> ControlProjection {
    ControlProjection {
        id: field.id.clone(),
        display_label: display_label(field.index.as_deref(), &field.label),
        must_answer: field.required,
        description: field.description.clone(),
        loinc_annotation: field.loinc_code.clone(),
        depth,
        contract,
    }
}

fn choice_projection(
    choice: &ChoiceItem,
    depth: usize,
    contract: ControlContract,
) -> ControlProjection {
    ControlProjection {
        id: choice.id.clone(),
        display_label: display_label(choice.index.as_deref(), &choice.label),
        must_answer: choice.required,
        description: choice.description.clone(),
        loinc_annotation: choice.loinc_code.clone(),
        depth,
        contract,
    }
}

fn display_label(index: Option<&str>, label: &str) -> String {
    match index {
        Some(ix) => format!("{ix} {label}"),
        None => label.to_string(),
    }
}
