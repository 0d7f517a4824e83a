//! Raw step input and committed answers.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{StepDefinition, StepKind};

/// Value committed for info pages, which have no input of their own.
pub const INFO_CONFIRMED: &str = "confirmed";

/// Whatever the presentation layer currently has entered for the active step.
///
/// Uncommitted: the validator inspects it, and only a successful `next`
/// turns it into an [`Answer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInput {
    /// Checked options (radio or checkbox values).
    #[serde(default)]
    pub choices: Vec<String>,
    /// Single text box or text area value.
    #[serde(default)]
    pub text: String,
    /// Per-field values keyed by [`crate::catalog::FieldSpec::name`].
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl StepInput {
    /// Input for info pages.
    pub fn confirm() -> Self {
        Self::default()
    }

    pub fn choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Checked options, trimmed, with blank entries skipped.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.choices
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    /// Value of a declared field, empty when the presentation layer omitted it.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// A committed answer. Its shape follows the step kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Info confirmation, single choice, or free text.
    Text(String),
    /// Multi-choice selections in the order given.
    List(Vec<String>),
    /// Field name → value for multi-field steps, in declaration order.
    Fields(IndexMap<String, String>),
    /// Mixed step: choice part and optional text part.
    Mixed {
        checkboxes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        textarea: Option<String>,
    },
}

impl Answer {
    /// Project raw input onto the answer shape of `step`.
    ///
    /// Scalars and choices are trimmed and blank choices dropped; nothing
    /// else is normalised.
    pub fn from_input(step: &StepDefinition, input: &StepInput) -> Self {
        match step.kind {
            StepKind::Info => Self::Text(INFO_CONFIRMED.to_string()),
            StepKind::SingleChoice | StepKind::CapabilityExampleChoice => {
                Self::Text(input.selected().next().unwrap_or_default().to_string())
            }
            StepKind::MultiChoice => Self::List(selections(input)),
            StepKind::ShortText | StepKind::LongText | StepKind::CapabilityExampleFreeform => {
                Self::Text(input.text.trim().to_string())
            }
            StepKind::MultiField | StepKind::CapabilityExampleMultiField => Self::Fields(
                step.fields
                    .iter()
                    .map(|f| (f.name.clone(), input.field(&f.name).trim().to_string()))
                    .collect(),
            ),
            StepKind::Mixed => Self::Mixed {
                checkboxes: if step.has_choice_part() {
                    selections(input)
                } else {
                    Vec::new()
                },
                textarea: step
                    .has_text_part()
                    .then(|| input.text.trim().to_string()),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Fields(f) => Some(f),
            _ => None,
        }
    }

    /// Selected options of a multi-choice or mixed answer.
    pub fn selections(&self) -> &[String] {
        match self {
            Self::List(items) => items,
            Self::Mixed { checkboxes, .. } => checkboxes,
            _ => &[],
        }
    }
}

fn selections(input: &StepInput) -> Vec<String> {
    input.selected().map(str::to_string).collect()
}
