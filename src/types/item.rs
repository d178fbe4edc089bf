// Form tree node definitions: one variant per control type, each carrying
// only the fields legal for that variant.

use serde::Serialize;
use std::fmt;

/// The closed set of control type tags, as they appear in the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    Section,
    Group,
    Text,
    Number,
    Date,
    Checkbox,
    Select,
    Radio,
}

impl ControlType {
    pub const ALL: [ControlType; 8] = [
        ControlType::Section,
        ControlType::Group,
        ControlType::Text,
        ControlType::Number,
        ControlType::Date,
        ControlType::Checkbox,
        ControlType::Select,
        ControlType::Radio,
    ];

    /// The tag spelling used in the wire/text representation.
    pub fn tag(&self) -> &'static str {
        match self {
            ControlType::Section => "SECTION",
            ControlType::Group => "GROUP",
            ControlType::Text => "TEXT",
            ControlType::Number => "NUMBER",
            ControlType::Date => "DATE",
            ControlType::Checkbox => "CHECKBOX",
            ControlType::Select => "SELECT",
            ControlType::Radio => "RADIO",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SECTION" => Some(ControlType::Section),
            "GROUP" => Some(ControlType::Group),
            "TEXT" => Some(ControlType::Text),
            "NUMBER" => Some(ControlType::Number),
            "DATE" => Some(ControlType::Date),
            "CHECKBOX" => Some(ControlType::Checkbox),
            "SELECT" => Some(ControlType::Select),
            "RADIO" => Some(ControlType::Radio),
            _ => None,
        }
    }

    /// Containers group child items and never collect an answer.
    pub fn is_container(&self) -> bool {
        matches!(self, ControlType::Section | ControlType::Group)
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node in the form tree.
///
/// Serialization is internally tagged on `"type"` with the original tag
/// spellings, so a serialized tree round-trips through the textual editor
/// representation. `Deserialize` is deliberately not implemented: the only
/// road from raw bytes to a `FormItem` is [`crate::validation::FormValidator`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FormItem {
    #[serde(rename = "SECTION")]
    Section(ContainerItem),
    #[serde(rename = "GROUP")]
    Group(ContainerItem),
    #[serde(rename = "TEXT")]
    Text(FieldItem),
    #[serde(rename = "NUMBER")]
    Number(FieldItem),
    #[serde(rename = "DATE")]
    Date(FieldItem),
    #[serde(rename = "CHECKBOX")]
    Checkbox(FieldItem),
    #[serde(rename = "SELECT")]
    Select(ChoiceItem),
    #[serde(rename = "RADIO")]
    Radio(ChoiceItem),
}

/// Payload for `SECTION` and `GROUP`: a label over an ordered run of
/// children, no answer contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    pub items: Vec<FormItem>,
}

/// Payload for the single-value leaves (`TEXT`, `NUMBER`, `DATE`,
/// `CHECKBOX`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "loincCode", skip_serializing_if = "Option::is_none")]
    pub loinc_code: Option<String>,
}

/// Payload for the choice leaves (`SELECT`, `RADIO`): a `FieldItem` plus a
/// non-empty ordered option list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "loincCode", skip_serializing_if = "Option::is_none")]
    pub loinc_code: Option<String>,
    pub options: Vec<String>,
}

impl ContainerItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            index: None,
            items: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_item(mut self, item: FormItem) -> Self {
        self.items.push(item);
        self
    }
}

impl FieldItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            index: None,
            required: false,
            description: None,
            placeholder: None,
            loinc_code: None,
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_loinc(mut self, loinc_code: impl Into<String>) -> Self {
        self.loinc_code = Some(loinc_code.into());
        self
    }
}

impl ChoiceItem {
    pub fn new<I, S>(id: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_field(
            FieldItem::new(id, label),
            options.into_iter().map(Into::into).collect(),
        )
    }

    /// Promote a field payload to a choice payload by attaching options.
    pub fn from_field(field: FieldItem, options: Vec<String>) -> Self {
        Self {
            id: field.id,
            label: field.label,
            index: field.index,
            required: field.required,
            description: field.description,
            placeholder: field.placeholder,
            loinc_code: field.loinc_code,
            options,
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_loinc(mut self, loinc_code: impl Into<String>) -> Self {
        self.loinc_code = Some(loinc_code.into());
        self
    }
}

impl FormItem {
    pub fn control_type(&self) -> ControlType {
        match self {
            FormItem::Section(_) => ControlType::Section,
            FormItem::Group(_) => ControlType::Group,
            FormItem::Text(_) => ControlType::Text,
            FormItem::Number(_) => ControlType::Number,
            FormItem::Date(_) => ControlType::Date,
            FormItem::Checkbox(_) => ControlType::Checkbox,
            FormItem::Select(_) => ControlType::Select,
            FormItem::Radio(_) => ControlType::Radio,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            FormItem::Section(c) | FormItem::Group(c) => &c.id,
            FormItem::Text(f) | FormItem::Number(f) | FormItem::Date(f) | FormItem::Checkbox(f) => {
                &f.id
            }
            FormItem::Select(c) | FormItem::Radio(c) => &c.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormItem::Section(c) | FormItem::Group(c) => &c.label,
            FormItem::Text(f) | FormItem::Number(f) | FormItem::Date(f) | FormItem::Checkbox(f) => {
                &f.label
            }
            FormItem::Select(c) | FormItem::Radio(c) => &c.label,
        }
    }

    pub fn index(&self) -> Option<&str> {
        match self {
            FormItem::Section(c) | FormItem::Group(c) => c.index.as_deref(),
            FormItem::Text(f) | FormItem::Number(f) | FormItem::Date(f) | FormItem::Checkbox(f) => {
                f.index.as_deref()
            }
            FormItem::Select(c) | FormItem::Radio(c) => c.index.as_deref(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.control_type().is_container()
    }

    /// Child items for containers, `None` for leaves.
    pub fn children(&self) -> Option<&[FormItem]> {
        match self {
            FormItem::Section(c) | FormItem::Group(c) => Some(&c.items),
            _ => None,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            FormItem::Text(f) | FormItem::Number(f) | FormItem::Date(f) | FormItem::Checkbox(f) => {
                f.required
            }
            FormItem::Select(c) | FormItem::Radio(c) => c.required,
            _ => false,
        }
    }

    pub fn loinc_code(&self) -> Option<&str> {
        match self {
            FormItem::Text(f) | FormItem::Number(f) | FormItem::Date(f) | FormItem::Checkbox(f) => {
                f.loinc_code.as_deref()
            }
            FormItem::Select(c) | FormItem::Radio(c) => c.loinc_code.as_deref(),
            _ => None,
        }
    }
}
