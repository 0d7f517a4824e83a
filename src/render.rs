//! Render boundary: describes what the presentation layer should paint.
//!
//! Rendering is stateless: every view starts blank, previously committed
//! answers are never pre-filled.

use serde::Serialize;

use crate::catalog::{StepDefinition, StepKind};

/// Label of the advance button on every non-info page.
pub const NEXT_BUTTON_TEXT: &str = "Devam Et";
/// Shown when the active sequence is empty.
pub const EMPTY_FORM_NOTICE: &str = "Form soruları yakında eklenecek...";
const COMPLETION_TITLE: &str = "Başvurun Alındı";
const COMPLETION_TEXT: &str = "İlgilendiğin için teşekkürler. <br><br> Başvurularımız aktif \
     olarak inceleniyor ve 24 saat içerisinde dönüş yapıyoruz. <br><br> Olumlu dönüş olduğu \
     takdirde test çalışması ile sürece devam edeceğiz.";

/// "current / total" progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percent: f32,
}

impl Progress {
    /// Progress while the cursor is on `position`.
    pub fn at(position: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                current: 0,
                total: 0,
                percent: 0.0,
            };
        }
        let current = position + 1;
        Self {
            current,
            total,
            percent: current as f32 / total as f32 * 100.0,
        }
    }

    pub fn full(total: usize) -> Self {
        Self {
            current: total,
            total,
            percent: 100.0,
        }
    }
}

/// An input widget, always rendered empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Pick exactly one option.
    Radio { name: String, options: Vec<String> },
    /// Pick any number of options.
    Checkbox {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        options: Vec<String>,
    },
    TextInput {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        placeholder: String,
    },
    TextArea {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        placeholder: String,
        long: bool,
    },
}

/// Everything needed to paint one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub position: usize,
    pub question: String,
    pub kind: StepKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub widgets: Vec<Widget>,
    pub button_text: String,
    pub show_back: bool,
    pub progress: Progress,
}

/// The terminal screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionView {
    pub title: String,
    pub text: String,
    pub progress: Progress,
}

impl CompletionView {
    pub fn new(total: usize) -> Self {
        Self {
            title: COMPLETION_TITLE.to_string(),
            text: COMPLETION_TEXT.to_string(),
            progress: Progress::full(total),
        }
    }
}

/// What the presentation layer should show after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum WizardView {
    Welcome,
    Step(StepView),
    Completed(CompletionView),
    /// The sequence has no steps; shows [`EMPTY_FORM_NOTICE`].
    Empty { notice: String },
}

impl WizardView {
    pub fn empty() -> Self {
        Self::Empty {
            notice: EMPTY_FORM_NOTICE.to_string(),
        }
    }

    pub fn as_step(&self) -> Option<&StepView> {
        match self {
            Self::Step(view) => Some(view),
            _ => None,
        }
    }
}

/// Describe `step` at `position` of a `total`-step sequence.
pub fn render_step(step: &StepDefinition, position: usize, total: usize) -> StepView {
    let name = format!("question-{position}");
    let widgets = match step.kind {
        StepKind::Info => Vec::new(),
        StepKind::SingleChoice | StepKind::CapabilityExampleChoice => vec![Widget::Radio {
            name,
            options: step.options.clone(),
        }],
        StepKind::MultiChoice => vec![Widget::Checkbox {
            name,
            label: step.label.clone(),
            options: step.options.clone(),
        }],
        StepKind::ShortText => vec![Widget::TextInput {
            name,
            label: step.label.clone(),
            placeholder: step.placeholder.clone().unwrap_or_default(),
        }],
        StepKind::LongText | StepKind::CapabilityExampleFreeform => vec![Widget::TextArea {
            name,
            label: step.label.clone(),
            placeholder: step.placeholder.clone().unwrap_or_default(),
            long: true,
        }],
        StepKind::MultiField => step
            .fields
            .iter()
            .map(|f| Widget::TextInput {
                name: f.name.clone(),
                label: Some(f.label.clone()),
                placeholder: f.placeholder.clone().unwrap_or_default(),
            })
            .collect(),
        StepKind::CapabilityExampleMultiField => step
            .fields
            .iter()
            .map(|f| Widget::TextArea {
                name: f.name.clone(),
                label: Some(f.label.clone()),
                placeholder: f.placeholder.clone().unwrap_or_default(),
                long: false,
            })
            .collect(),
        StepKind::Mixed => {
            let mut widgets = Vec::new();
            if step.has_choice_part() {
                widgets.push(Widget::Checkbox {
                    name: format!("checkboxes-{position}"),
                    label: step.label.clone(),
                    options: step.options.clone(),
                });
            }
            if step.has_text_part() {
                widgets.push(Widget::TextArea {
                    name: format!("textarea-{position}"),
                    label: step.text_label.clone(),
                    placeholder: step.text_placeholder.clone().unwrap_or_default(),
                    long: false,
                });
            }
            widgets
        }
    };

    let button_text = match step.kind {
        StepKind::Info => step
            .button_text
            .clone()
            .unwrap_or_else(|| NEXT_BUTTON_TEXT.to_string()),
        _ => NEXT_BUTTON_TEXT.to_string(),
    };

    StepView {
        position,
        question: step.question.clone(),
        kind: step.kind,
        text: step.text.clone(),
        images: step.images.clone(),
        widgets,
        button_text,
        show_back: position > 0,
        progress: Progress::at(position, total),
    }
}
