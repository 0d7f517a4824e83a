//! Presence checks over the uncommitted input of the active step.
//!
//! Validation gates advancement only; it never mutates form state.

use crate::catalog::{StepDefinition, StepKind};
use crate::error::ValidationError;
use crate::form::StepInput;

/// Check `input` against the requirements of `step`.
pub fn validate(step: &StepDefinition, input: &StepInput) -> Result<(), ValidationError> {
    match step.kind {
        StepKind::Info => Ok(()),
        StepKind::SingleChoice | StepKind::CapabilityExampleChoice => exactly_one(input),
        StepKind::MultiChoice => at_least_one(input),
        StepKind::ShortText | StepKind::LongText | StepKind::CapabilityExampleFreeform => {
            non_blank(&input.text)
        }
        StepKind::MultiField | StepKind::CapabilityExampleMultiField => all_fields(step, input),
        StepKind::Mixed => {
            if step.has_choice_part() {
                at_least_one(input)?;
            }
            if step.has_text_part() {
                non_blank(&input.text)?;
            }
            Ok(())
        }
    }
}

fn exactly_one(input: &StepInput) -> Result<(), ValidationError> {
    match input.selected().count() {
        1 => Ok(()),
        selected => Err(ValidationError::SelectOne { selected }),
    }
}

fn at_least_one(input: &StepInput) -> Result<(), ValidationError> {
    if input.selected().next().is_none() {
        Err(ValidationError::SelectAtLeastOne)
    } else {
        Ok(())
    }
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyText)
    } else {
        Ok(())
    }
}

fn all_fields(step: &StepDefinition, input: &StepInput) -> Result<(), ValidationError> {
    let missing: Vec<String> = step
        .fields
        .iter()
        .filter(|f| input.field(&f.name).trim().is_empty())
        .map(|f| f.name.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::IncompleteFields { missing })
    }
}
