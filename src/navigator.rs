//! Navigator: drives the wizard state machine.
//!
//! Every event runs to completion before the next one is accepted:
//! validate → commit → reconcile example pages → move the cursor → render.
//! Entering `Completed` formats the payload and hands it to the dispatcher
//! exactly once.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::form::{FormState, StepInput, WizardPhase};
use crate::render::{CompletionView, WizardView, render_step};
use crate::submission::{SubmissionDispatcher, SubmissionPayload};
use crate::validator;

/// User-triggered events accepted by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Leave the welcome screen.
    Start,
    /// Validate and commit the current input, then move forward.
    Next(StepInput),
    /// Move back one step, or to the welcome screen from the first step.
    Back,
}

/// One applicant's pass through the form.
pub struct Navigator {
    session_id: Uuid,
    state: FormState,
    dispatcher: Arc<dyn SubmissionDispatcher>,
    submitted: bool,
}

impl Navigator {
    pub fn new(catalog: Catalog, dispatcher: Arc<dyn SubmissionDispatcher>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, "New form session");
        Self {
            session_id,
            state: FormState::new(catalog),
            dispatcher,
            submitted: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> WizardPhase {
        self.state.phase()
    }

    /// Apply one event. A failed validation leaves the state untouched and
    /// returns the message to show; every other outcome is the view to paint.
    pub fn handle(&mut self, event: WizardEvent) -> Result<WizardView, ValidationError> {
        match event {
            WizardEvent::Start => Ok(self.start()),
            WizardEvent::Next(input) => self.next(&input),
            WizardEvent::Back => Ok(self.back()),
        }
    }

    /// Welcome → Step(0).
    pub fn start(&mut self) -> WizardView {
        if self.state.phase() != WizardPhase::Welcome {
            debug!(session_id = %self.session_id, phase = %self.state.phase(), "Start ignored");
            return self.view();
        }
        if !self.state.start() {
            warn!(session_id = %self.session_id, "Form has no steps");
            return WizardView::empty();
        }
        info!(session_id = %self.session_id, "Form started");
        self.view()
    }

    /// Step(i) → Step(i+1) or Completed, if the input passes validation.
    pub fn next(&mut self, input: &StepInput) -> Result<WizardView, ValidationError> {
        let WizardPhase::Step(position) = self.state.phase() else {
            debug!(session_id = %self.session_id, phase = %self.state.phase(), "Next ignored");
            return Ok(self.view());
        };
        let Some(step) = self.state.current_step() else {
            return Ok(self.view());
        };

        if let Err(e) = validator::validate(step, input) {
            debug!(
                session_id = %self.session_id,
                step = %step.question,
                error = ?e,
                "Validation failed"
            );
            return Err(e);
        }

        let is_capability_page = step.is_capability_selection();
        let selected = self
            .state
            .commit_answer(position, input)
            .map(|answer| answer.selections().to_vec())
            .unwrap_or_default();

        if is_capability_page {
            let outcome = self.state.reconcile_conditional_steps(&selected);
            if !outcome.is_noop() {
                info!(
                    session_id = %self.session_id,
                    removed = ?outcome.removed,
                    inserted = ?outcome.inserted,
                    "Example pages updated"
                );
            }
        }

        let phase = self.state.advance();
        debug!(session_id = %self.session_id, from = position, to = %phase, "Advanced");
        if phase.is_terminal() {
            self.submit();
        }
        Ok(self.view())
    }

    /// Step(i) → Step(i-1), or Welcome from Step(0).
    pub fn back(&mut self) -> WizardView {
        if self.state.phase().position().is_none() {
            debug!(session_id = %self.session_id, phase = %self.state.phase(), "Back ignored");
            return self.view();
        }
        let phase = self.state.retreat();
        debug!(session_id = %self.session_id, to = %phase, "Retreated");
        self.view()
    }

    /// Render the current phase.
    pub fn view(&self) -> WizardView {
        match self.state.phase() {
            WizardPhase::Welcome => WizardView::Welcome,
            WizardPhase::Step(i) => match self.state.steps().get(i) {
                Some(step) => WizardView::Step(render_step(step, i, self.state.len())),
                None => WizardView::empty(),
            },
            WizardPhase::Completed => WizardView::Completed(CompletionView::new(self.state.len())),
        }
    }

    fn submit(&mut self) {
        if self.submitted {
            return;
        }
        self.submitted = true;
        let payload = SubmissionPayload::capture(&self.state);
        info!(
            session_id = %self.session_id,
            example_pages = payload.example_pages.len(),
            "Form completed; dispatching submission"
        );
        self.dispatcher.dispatch(self.session_id, payload);
    }
}
