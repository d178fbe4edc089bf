//! The single gate through which every externally-sourced candidate tree
//! must pass before becoming the active definition.
//!
//! Validation walks the raw `serde_json::Value` directly rather than
//! deserializing into a typed mirror first, so that shape mistakes ("options
//! is a string") surface as validation failures with a node path instead of
//! opaque parse errors. Policy is fail-closed: the first violation rejects
//! the whole candidate, and identical input always produces the identical
//! accept/reject outcome.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::types::{ChoiceItem, ContainerItem, ControlType, FieldItem, FormDefinition, FormItem};

/// Stable machine codes for every violation the gate can report.
pub mod codes {
    /// Candidate is not a JSON object.
    pub const INVALID_ROOT: &str = "invalid-root";
    /// A required field (`title`, `version`, `publisher`, `id`, `label`,
    /// `type`) is absent or empty.
    pub const MISSING_FIELD: &str = "missing-field";
    /// The right key with the wrong JSON type.
    pub const INVALID_FIELD_TYPE: &str = "invalid-field-type";
    /// `type` is not one of the eight known tags.
    pub const UNKNOWN_TYPE_TAG: &str = "unknown-type-tag";
    /// A container without an `items` array.
    pub const MISSING_ITEMS: &str = "missing-items";
    /// A leaf carrying child `items`.
    pub const ITEMS_ON_LEAF: &str = "items-on-leaf";
    /// A `SELECT`/`RADIO` leaf with absent or empty `options`.
    pub const EMPTY_OPTIONS: &str = "empty-options";
    /// An `id` used by more than one node in the tree.
    pub const DUPLICATE_ID: &str = "duplicate-id";
    /// A node repeating the `id` of one of its ancestors.
    pub const CYCLIC_REFERENCE: &str = "cyclic-reference";
    /// Nesting beyond the configured maximum depth.
    pub const DEPTH_EXCEEDED: &str = "depth-exceeded";
}

/// Default bound on candidate nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Validates and normalizes untrusted candidate trees into canonical
/// [`FormDefinition`]s.
#[derive(Debug, Clone)]
pub struct FormValidator {
    max_depth: usize,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A validator with a custom depth bound. The bound exists to protect
    /// the recursive renderer from stack exhaustion on adversarial nesting,
    /// so it should stay small.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate an untyped candidate, producing a canonical definition or
    /// the first invariant violation.
    pub fn validate(&self, candidate: &Value) -> Result<FormDefinition, ValidationError> {
        match self.validate_root(candidate) {
            Ok(definition) => {
                debug!(
                    title = %definition.title,
                    items = definition.item_count(),
                    "candidate accepted"
                );
                Ok(definition)
            }
            Err(err) => {
                debug!(code = %err.code, path = ?err.path, "candidate rejected");
                Err(err)
            }
        }
    }

    /// Parse raw editor text and validate it in one step.
    pub fn validate_text(&self, raw: &str) -> crate::Result<FormDefinition> {
        let candidate: Value = serde_json::from_str(raw)?;
        Ok(self.validate(&candidate)?)
    }

    fn validate_root(&self, candidate: &Value) -> Result<FormDefinition, ValidationError> {
        let root = candidate.as_object().ok_or_else(|| {
            ValidationError::new(
                codes::INVALID_ROOT,
                format!(
                    "form definition must be a JSON object, found {}",
                    json_type_name(candidate)
                ),
            )
        })?;

        let title = require_string(root, "title", "")?;
        let version = require_string(root, "version", "")?;
        let publisher = require_string(root, "publisher", "")?;

        let raw_items = match root.get("items") {
            Some(Value::Array(arr)) => arr,
            Some(Value::Null) | None => {
                return Err(ValidationError::new(
                    codes::MISSING_ITEMS,
                    "form definition is missing its items array",
                )
                .with_path("items"));
            }
            Some(other) => {
                return Err(ValidationError::new(
                    codes::INVALID_FIELD_TYPE,
                    format!("'items' must be an array, found {}", json_type_name(other)),
                )
                .with_path("items"));
            }
        };

        let mut state = WalkState::default();
        let mut items = Vec::with_capacity(raw_items.len());
        for (i, raw) in raw_items.iter().enumerate() {
            items.push(self.validate_item(raw, &item_path("", i), 1, &mut state)?);
        }

        Ok(FormDefinition {
            title,
            version,
            publisher,
            items,
        })
    }

    fn validate_item(
        &self,
        raw: &Value,
        path: &str,
        depth: usize,
        state: &mut WalkState,
    ) -> Result<FormItem, ValidationError> {
        if depth > self.max_depth {
            return Err(ValidationError::new(
                codes::DEPTH_EXCEEDED,
                format!(
                    "nesting depth {depth} exceeds the configured maximum of {}",
                    self.max_depth
                ),
            )
            .with_path(path));
        }

        let map = raw.as_object().ok_or_else(|| {
            ValidationError::new(
                codes::INVALID_FIELD_TYPE,
                format!(
                    "form item must be a JSON object, found {}",
                    json_type_name(raw)
                ),
            )
            .with_path(path)
        })?;

        let id = require_string(map, "id", path)?;
        let label = require_string(map, "label", path)?;
        let tag = require_string(map, "type", path)?;
        let control = ControlType::from_tag(&tag).ok_or_else(|| {
            ValidationError::new(
                codes::UNKNOWN_TYPE_TAG,
                format!("item '{id}' has unknown type tag '{tag}'"),
            )
            .with_path(field_path(path, "type"))
        })?;

        // Ancestor reuse wins over plain duplication: it is how a cycle
        // manifests in a tree that arrived as JSON.
        if state.ancestors.iter().any(|ancestor| ancestor == &id) {
            return Err(ValidationError::new(
                codes::CYCLIC_REFERENCE,
                format!("item '{id}' repeats the id of one of its ancestors"),
            )
            .with_path(path));
        }
        if !state.seen.insert(id.clone()) {
            return Err(ValidationError::new(
                codes::DUPLICATE_ID,
                format!("id '{id}' is used by more than one item"),
            )
            .with_path(path));
        }

        let index = optional_string(map, "index", path)?;

        if control.is_container() {
            let children_raw = match map.get("items") {
                Some(Value::Array(arr)) => arr,
                Some(Value::Null) | None => {
                    return Err(ValidationError::new(
                        codes::MISSING_ITEMS,
                        format!("container '{id}' is missing its items array"),
                    )
                    .with_path(field_path(path, "items")));
                }
                Some(other) => {
                    return Err(ValidationError::new(
                        codes::INVALID_FIELD_TYPE,
                        format!(
                            "'items' of container '{id}' must be an array, found {}",
                            json_type_name(other)
                        ),
                    )
                    .with_path(field_path(path, "items")));
                }
            };

            state.ancestors.push(id.clone());
            let mut items = Vec::with_capacity(children_raw.len());
            for (i, child) in children_raw.iter().enumerate() {
                items.push(self.validate_item(child, &item_path(path, i), depth + 1, state)?);
            }
            state.ancestors.pop();

            // Answer-contract keys on a container (required, options,
            // placeholder, ...) are meaningless and get dropped here.
            let container = ContainerItem {
                id,
                label,
                index,
                items,
            };
            return Ok(if control == ControlType::Section {
                FormItem::Section(container)
            } else {
                FormItem::Group(container)
            });
        }

        if matches!(map.get("items"), Some(v) if !v.is_null()) {
            return Err(ValidationError::new(
                codes::ITEMS_ON_LEAF,
                format!("leaf field '{id}' must not carry child items"),
            )
            .with_path(field_path(path, "items")));
        }

        let required = optional_bool(map, "required", path)?.unwrap_or(false);
        let description = optional_string(map, "description", path)?;
        let placeholder = optional_string(map, "placeholder", path)?;
        let loinc_code = optional_string(map, "loincCode", path)?;

        let field = FieldItem {
            id,
            label,
            index,
            required,
            description,
            placeholder,
            loinc_code,
        };

        match control {
            ControlType::Select | ControlType::Radio => {
                let options = choice_options(map, path, &field.id)?;
                let choice = ChoiceItem::from_field(field, options);
                Ok(if control == ControlType::Select {
                    FormItem::Select(choice)
                } else {
                    FormItem::Radio(choice)
                })
            }
            ControlType::Text => Ok(FormItem::Text(field)),
            ControlType::Number => Ok(FormItem::Number(field)),
            ControlType::Date => Ok(FormItem::Date(field)),
            ControlType::Checkbox => Ok(FormItem::Checkbox(field)),
            ControlType::Section | ControlType::Group => {
                unreachable!("containers are handled before the leaf branch")
            }
        }
    }
}

#[derive(Default)]
struct WalkState {
    /// Every id accepted so far, across the whole tree.
    seen: HashSet<String>,
    /// Ids on the path from the root to the current node.
    ancestors: Vec<String>,
}

fn item_path(parent: &str, idx: usize) -> String {
    if parent.is_empty() {
        format!("items[{idx}]")
    } else {
        format!("{parent}.items[{idx}]")
    }
}

fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn require_string(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<String, ValidationError> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ValidationError::new(
            codes::MISSING_FIELD,
            format!("'{key}' must not be empty"),
        )
        .with_path(field_path(parent, key))),
        Some(Value::Null) | None => Err(ValidationError::new(
            codes::MISSING_FIELD,
            format!("required field '{key}' is missing"),
        )
        .with_path(field_path(parent, key))),
        Some(other) => Err(ValidationError::new(
            codes::INVALID_FIELD_TYPE,
            format!(
                "'{key}' must be a string, found {}",
                json_type_name(other)
            ),
        )
        .with_path(field_path(parent, key))),
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<Option<String>, ValidationError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(ValidationError::new(
            codes::INVALID_FIELD_TYPE,
            format!(
                "'{key}' must be a string, found {}",
                json_type_name(other)
            ),
        )
        .with_path(field_path(parent, key))),
    }
}

fn optional_bool(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<Option<bool>, ValidationError> {
    match map.get(key) {
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(ValidationError::new(
            codes::INVALID_FIELD_TYPE,
            format!(
                "'{key}' must be a boolean, found {}",
                json_type_name(other)
            ),
        )
        .with_path(field_path(parent, key))),
    }
}

fn choice_options(
    map: &Map<String, Value>,
    parent: &str,
    id: &str,
) -> Result<Vec<String>, ValidationError> {
    let at = field_path(parent, "options");
    match map.get("options") {
        Some(Value::Array(arr)) if !arr.is_empty() => arr
            .iter()
            .map(|entry| match entry {
                Value::String(s) => Ok(s.clone()),
                other => Err(ValidationError::new(
                    codes::INVALID_FIELD_TYPE,
                    format!(
                        "options of field '{id}' must be strings, found {}",
                        json_type_name(other)
                    ),
                )
                .with_path(at.clone())),
            })
            .collect(),
        Some(Value::Array(_)) => Err(ValidationError::new(
            codes::EMPTY_OPTIONS,
            format!("selectable field '{id}' has an empty options list"),
        )
        .with_path(at)),
        Some(Value::Null) | None => Err(ValidationError::new(
            codes::EMPTY_OPTIONS,
            format!("selectable field '{id}' is missing its options"),
        )
        .with_path(at)),
        Some(other) => Err(ValidationError::new(
            codes::INVALID_FIELD_TYPE,
            format!(
                "'options' of field '{id}' must be an array, found {}",
                json_type_name(other)
            ),
        )
        .with_path(at)),
    }
}
