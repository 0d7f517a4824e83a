//! Form state: the live step sequence, the cursor, and committed answers.
//!
//! Answers are keyed by logical title rather than position, so inserting or
//! removing example pages never shifts an answer onto the wrong step.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::answer::{Answer, StepInput};
use crate::catalog::{Catalog, StepDefinition};
use crate::error::SequencingError;

/// Where the applicant is in the wizard.
///
/// Progresses Welcome → Step(0) → … → Step(len-1) → Completed, with `back`
/// walking the other way until Welcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "position")]
pub enum WizardPhase {
    #[default]
    Welcome,
    Step(usize),
    Completed,
}

impl WizardPhase {
    /// Whether this phase is terminal for the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Step(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Step(i) => write!(f, "step {i}"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The contiguous run of conditional steps right after the capability page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InsertionRegion {
    start: usize,
    len: usize,
    /// Known capabilities the region was built from.
    built_from: BTreeSet<String>,
}

/// What a reconcile pass did to the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Titles of the example pages taken out (their answers went with them).
    pub removed: Vec<String>,
    /// Titles of the example pages put in, in selection order.
    pub inserted: Vec<String>,
}

impl Reconciled {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty()
    }
}

/// Owns the active step sequence, the cursor, and the answer store.
#[derive(Debug, Clone)]
pub struct FormState {
    catalog: Catalog,
    steps: Vec<StepDefinition>,
    phase: WizardPhase,
    answers: BTreeMap<String, Answer>,
    region: Option<InsertionRegion>,
}

impl FormState {
    /// Fresh state on the welcome screen with only the base steps active.
    pub fn new(catalog: Catalog) -> Self {
        let steps = catalog.base_steps().to_vec();
        Self {
            catalog,
            steps,
            phase: WizardPhase::Welcome,
            answers: BTreeMap::new(),
            region: None,
        }
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// The step under the cursor, if the wizard is on a step.
    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.phase.position().and_then(|i| self.steps.get(i))
    }

    pub fn step_by_title(&self, title: &str) -> Option<(usize, &StepDefinition)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.question == title)
    }

    pub fn answer(&self, title: &str) -> Option<&Answer> {
        self.answers.get(title)
    }

    /// Committed answers keyed by logical title.
    pub fn answers(&self) -> &BTreeMap<String, Answer> {
        &self.answers
    }

    /// Index of the capability selection page, if the sequence has one.
    pub fn capability_step_index(&self) -> Option<usize> {
        self.steps.iter().position(StepDefinition::is_capability_selection)
    }

    /// Titles of the example pages currently in the insertion region.
    pub fn conditional_titles(&self) -> Vec<&str> {
        match &self.region {
            Some(region) => self.steps[region.start..region.start + region.len]
                .iter()
                .map(|s| s.question.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Store `input` for the step at `position`, shaped by the step's kind.
    ///
    /// No validation happens here. Returns the stored answer, or `None` if
    /// `position` is outside the active sequence.
    pub fn commit_answer(&mut self, position: usize, input: &StepInput) -> Option<&Answer> {
        let step = self.steps.get(position)?;
        let answer = Answer::from_input(step, input);
        let title = step.question.clone();
        debug!(step = %title, position, "Answer committed");
        self.answers.insert(title.clone(), answer);
        debug_assert_eq!(self.check_invariants(), Ok(()));
        self.answers.get(&title)
    }

    /// Rebuild the insertion region for a new capability selection.
    ///
    /// No-op when the selection (as a set) matches the one the current region
    /// was built from, or when nothing is selected and no region exists yet.
    /// Otherwise the old example pages and their answers are removed and the
    /// pages for `selected` are inserted in selection order right after the
    /// capability page. Unknown capabilities are skipped.
    pub fn reconcile_conditional_steps(&mut self, selected: &[String]) -> Reconciled {
        let wanted: BTreeSet<String> = selected
            .iter()
            .filter(|capability| self.catalog.conditional_step_for(capability).is_some())
            .cloned()
            .collect();

        match &self.region {
            None if wanted.is_empty() => return Reconciled::default(),
            Some(region) if region.built_from == wanted => return Reconciled::default(),
            _ => {}
        }

        let Some(capability_index) = self.capability_step_index() else {
            debug!("No capability page in sequence; skipping reconcile");
            return Reconciled::default();
        };
        let insert_at = capability_index + 1;

        let mut outcome = Reconciled::default();
        let mut landed_in_region = false;

        if let Some(region) = self.region.take() {
            let removed: Vec<StepDefinition> = self
                .steps
                .drain(region.start..region.start + region.len)
                .collect();
            for step in &removed {
                self.answers.remove(&step.question);
            }
            if let WizardPhase::Step(i) = self.phase {
                if i >= region.start + region.len {
                    self.phase = WizardPhase::Step(i - region.len);
                } else if i >= region.start {
                    // The page under the cursor is gone; land on whatever now
                    // follows the capability page.
                    self.phase = WizardPhase::Step(region.start);
                    landed_in_region = true;
                }
            }
            outcome.removed = removed.into_iter().map(|s| s.question).collect();
        }

        let mut seen = HashSet::new();
        let desired: Vec<StepDefinition> = selected
            .iter()
            .filter(|capability| seen.insert(capability.as_str()))
            .filter_map(|capability| self.catalog.conditional_step_for(capability))
            .cloned()
            .collect();
        let inserted_len = desired.len();
        outcome.inserted = desired.iter().map(|s| s.question.clone()).collect();
        self.steps.splice(insert_at..insert_at, desired);

        if let WizardPhase::Step(i) = self.phase
            && i >= insert_at
            && !landed_in_region
        {
            self.phase = WizardPhase::Step(i + inserted_len);
        }

        self.region = Some(InsertionRegion {
            start: insert_at,
            len: inserted_len,
            built_from: wanted,
        });

        info!(
            removed = outcome.removed.len(),
            inserted = outcome.inserted.len(),
            total = self.steps.len(),
            "Example pages reconciled"
        );
        debug_assert_eq!(self.check_invariants(), Ok(()));
        outcome
    }

    /// Welcome → Step(0). Returns false if there are no steps to show.
    pub fn start(&mut self) -> bool {
        if self.steps.is_empty() {
            return false;
        }
        self.phase = WizardPhase::Step(0);
        true
    }

    /// Step(i) → Step(i+1), or Completed from the last step.
    pub fn advance(&mut self) -> WizardPhase {
        if let WizardPhase::Step(i) = self.phase {
            self.phase = if i + 1 < self.steps.len() {
                WizardPhase::Step(i + 1)
            } else {
                WizardPhase::Completed
            };
        }
        debug_assert_eq!(self.check_invariants(), Ok(()));
        self.phase
    }

    /// Step(i) → Step(i-1), or Welcome from the first step.
    pub fn retreat(&mut self) -> WizardPhase {
        if let WizardPhase::Step(i) = self.phase {
            self.phase = match i.checked_sub(1) {
                Some(prev) => WizardPhase::Step(prev),
                None => WizardPhase::Welcome,
            };
        }
        debug_assert_eq!(self.check_invariants(), Ok(()));
        self.phase
    }

    /// Verify the sequencing invariants.
    pub fn check_invariants(&self) -> Result<(), SequencingError> {
        if let WizardPhase::Step(cursor) = self.phase
            && cursor >= self.steps.len()
        {
            return Err(SequencingError::CursorOutOfRange {
                cursor,
                len: self.steps.len(),
            });
        }

        let mut titles = HashSet::new();
        for step in &self.steps {
            if !titles.insert(step.question.as_str()) {
                return Err(SequencingError::DuplicateStep {
                    title: step.question.clone(),
                });
            }
        }

        if let Some(stale) = self.answers.keys().find(|t| !titles.contains(t.as_str())) {
            return Err(SequencingError::StaleAnswer {
                step: stale.clone(),
            });
        }

        if let Some(region) = &self.region
            && region.start + region.len > self.steps.len()
        {
            return Err(SequencingError::RegionOutOfRange {
                start: region.start,
                end: region.start + region.len,
                len: self.steps.len(),
            });
        }

        Ok(())
    }
}
