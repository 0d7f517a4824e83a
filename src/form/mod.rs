//! Form state and sequencing.

pub mod answer;
pub mod state;

pub use answer::{Answer, INFO_CONFIRMED, StepInput};
pub use state::{FormState, Reconciled, WizardPhase};
