//! Step definitions: immutable templates for one wizard page.

use serde::{Deserialize, Serialize};

/// What a step asks for, and therefore how its input is shaped and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Read-only page with a confirm button.
    Info,
    SingleChoice,
    MultiChoice,
    ShortText,
    LongText,
    /// Several labelled single-line inputs.
    MultiField,
    /// Multi-choice plus an optional long-text part on the same page.
    Mixed,
    /// Capability example page answered by picking one option.
    CapabilityExampleChoice,
    /// Capability example page answered with free text.
    CapabilityExampleFreeform,
    /// Capability example page answered with several text areas.
    CapabilityExampleMultiField,
}

impl StepKind {
    /// Whether steps of this kind only ever appear in the insertion region.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            Self::CapabilityExampleChoice
                | Self::CapabilityExampleFreeform
                | Self::CapabilityExampleMultiField
        )
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::SingleChoice => "single-choice",
            Self::MultiChoice => "multi-choice",
            Self::ShortText => "short-text",
            Self::LongText => "long-text",
            Self::MultiField => "multi-field",
            Self::Mixed => "mixed",
            Self::CapabilityExampleChoice => "capability-example-choice",
            Self::CapabilityExampleFreeform => "capability-example-freeform",
            Self::CapabilityExampleMultiField => "capability-example-multi-field",
        };
        write!(f, "{s}")
    }
}

/// One labelled input of a multi-field step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    /// Key under which the value is captured.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Immutable template for one wizard page.
///
/// `question` doubles as the step's logical identifier: answers are keyed by
/// it, so it must be unique among simultaneously active steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub question: String,
    pub kind: StepKind,
    /// Body copy shown above the inputs (may contain markup).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Label of the advance button on info pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    /// Choices for single/multi-choice steps and the choice part of mixed steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
    /// Label above a text input, or above the choice part of a mixed step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Label of the long-text part of a mixed step. Absent means no text part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_placeholder: Option<String>,
}

impl StepDefinition {
    /// Bare definition of the given kind; fill in with the `with_*` builders.
    pub fn new(question: impl Into<String>, kind: StepKind) -> Self {
        Self {
            question: question.into(),
            kind,
            text: None,
            button_text: None,
            options: Vec::new(),
            images: Vec::new(),
            fields: Vec::new(),
            label: None,
            placeholder: None,
            text_label: None,
            text_placeholder: None,
        }
    }

    /// Info page with body text and a confirm button.
    pub fn info(
        question: impl Into<String>,
        text: impl Into<String>,
        button_text: impl Into<String>,
    ) -> Self {
        let mut step = Self::new(question, StepKind::Info);
        step.text = Some(text.into());
        step.button_text = Some(button_text.into());
        step
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Declare the long-text part of a mixed step.
    pub fn with_text_part(
        mut self,
        label: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        self.text_label = Some(label.into());
        self.text_placeholder = Some(placeholder.into());
        self
    }

    /// Whether a mixed step declares its multi-choice part.
    pub fn has_choice_part(&self) -> bool {
        !self.options.is_empty()
    }

    /// Whether a mixed step declares its long-text part.
    pub fn has_text_part(&self) -> bool {
        self.text_label.is_some()
    }

    /// The page whose choices drive conditional step insertion.
    pub fn is_capability_selection(&self) -> bool {
        self.kind == StepKind::Mixed && self.has_choice_part()
    }
}
