//! Submission payload: the normalized projection of form state sent to the sink.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    CAPABILITIES_TITLE, PERSONAL_INFO_TITLE, TEST_CONFIRMATION_TITLE, THOUGHTS_TITLE,
};
use crate::form::{Answer, FormState};

/// Personal details from the multi-field page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub hours: String,
}

impl PersonalInfo {
    fn from_fields(fields: &IndexMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            fullname: get("fullname"),
            phone: get("phone"),
            class: get("class"),
            hours: get("hours"),
        }
    }
}

/// JSON body delivered to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Capture time, ISO-8601 UTC with milliseconds.
    pub timestamp: String,
    pub personal_info: PersonalInfo,
    pub capabilities: Vec<String>,
    pub previous_work: String,
    pub thoughts: String,
    pub test_confirmation: String,
    /// Logical title → answer for every answered example page still active,
    /// in page order.
    pub example_pages: IndexMap<String, Answer>,
}

impl SubmissionPayload {
    /// Project the current form state, stamped with the current time.
    pub fn capture(state: &FormState) -> Self {
        Self::format(state, Utc::now())
    }

    /// Project the current form state, stamped with `captured_at`.
    ///
    /// Every lookup goes through logical titles, so example page insertion
    /// in front of later pages does not disturb it.
    pub fn format(state: &FormState, captured_at: DateTime<Utc>) -> Self {
        let text_at = |title: &str| {
            state
                .answer(title)
                .and_then(Answer::as_text)
                .map(str::to_string)
                .unwrap_or_default()
        };

        let personal_info = state
            .answer(PERSONAL_INFO_TITLE)
            .and_then(Answer::as_fields)
            .map(PersonalInfo::from_fields)
            .unwrap_or_default();

        let (capabilities, previous_work) = match state.answer(CAPABILITIES_TITLE) {
            Some(Answer::Mixed {
                checkboxes,
                textarea,
            }) => (checkboxes.clone(), textarea.clone().unwrap_or_default()),
            _ => (Vec::new(), String::new()),
        };

        let example_pages = state
            .steps()
            .iter()
            .filter(|step| step.kind.is_conditional())
            .filter_map(|step| {
                state
                    .answer(&step.question)
                    .map(|answer| (step.question.clone(), answer.clone()))
            })
            .collect();

        Self {
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            personal_info,
            capabilities,
            previous_work,
            thoughts: text_at(THOUGHTS_TITLE),
            test_confirmation: text_at(TEST_CONFIRMATION_TITLE),
            example_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::catalog::{Catalog, capabilities};
    use crate::form::{INFO_CONFIRMED, StepInput};
    use crate::submission::SheetRow;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn index_of(state: &FormState, title: &str) -> usize {
        state.step_by_title(title).unwrap().0
    }

    #[test]
    fn empty_state_formats_to_defaults() {
        let state = FormState::new(Catalog::reference());
        let payload = SubmissionPayload::format(&state, at_noon());
        assert_eq!(payload.timestamp, "2026-03-01T12:00:00.000Z");
        assert_eq!(payload.personal_info, PersonalInfo::default());
        assert!(payload.capabilities.is_empty());
        assert!(payload.previous_work.is_empty());
        assert!(payload.thoughts.is_empty());
        assert!(payload.test_confirmation.is_empty());
        assert!(payload.example_pages.is_empty());
    }

    #[test]
    fn fields_are_found_by_title_after_insertion() {
        let mut state = FormState::new(Catalog::reference());
        state.commit_answer(
            3,
            &StepInput::fields([
                ("fullname", "Ayşe Yılmaz"),
                ("phone", "0532 123 45 67"),
                ("class", "12"),
                ("hours", "10 saat"),
            ]),
        );
        state.commit_answer(
            4,
            &StepInput::choices([capabilities::DESIGN, capabilities::AI_TOOLS])
                .with_text("behance.net/ayse"),
        );
        state.reconcile_conditional_steps(&[
            capabilities::DESIGN.to_string(),
            capabilities::AI_TOOLS.to_string(),
        ]);

        let thoughts = index_of(&state, THOUGHTS_TITLE);
        assert_eq!(thoughts, 7);
        state.commit_answer(thoughts, &StepInput::text("Vizyon eksikliği"));
        let confirm = index_of(&state, TEST_CONFIRMATION_TITLE);
        state.commit_answer(confirm, &StepInput::confirm());

        let payload = SubmissionPayload::format(&state, at_noon());
        assert_eq!(payload.personal_info.fullname, "Ayşe Yılmaz");
        assert_eq!(payload.personal_info.hours, "10 saat");
        assert_eq!(
            payload.capabilities,
            vec![capabilities::DESIGN.to_string(), capabilities::AI_TOOLS.to_string()]
        );
        assert_eq!(payload.previous_work, "behance.net/ayse");
        assert_eq!(payload.thoughts, "Vizyon eksikliği");
        assert_eq!(payload.test_confirmation, INFO_CONFIRMED);
    }

    #[test]
    fn example_pages_follow_page_order() {
        let mut state = FormState::new(Catalog::reference());
        state.reconcile_conditional_steps(&[
            capabilities::SOFTWARE.to_string(),
            capabilities::DESIGN.to_string(),
            capabilities::CONTENT.to_string(),
        ]);
        state.commit_answer(5, &StepInput::choices(["Yaptım / Yapabilirim"]));
        state.commit_answer(6, &StepInput::choices(["Bu seviyede değilim"]));
        state.commit_answer(
            7,
            &StepInput::fields([
                ("video-title", "T"),
                ("video-thumbnail", "Th"),
                ("video-intro", "I"),
                ("video-ideas", "Id"),
            ]),
        );

        let payload = SubmissionPayload::format(&state, at_noon());
        let titles: Vec<&str> = payload.example_pages.keys().map(String::as_str).collect();
        assert_eq!(
            titles,
            vec![
                "Yazılım yeteneğinle ilgili...",
                "Tasarım yeteneğinle ilgili...",
                "İçerik Yazma / Üretme yeteneğinle ilgili...",
            ]
        );

        let row = SheetRow::from_payload(&payload);
        assert_eq!(
            row.cells()[8],
            "Yazılım yeteneğinle ilgili...: Yaptım / Yapabilirim | \
             Tasarım yeteneğinle ilgili...: Bu seviyede değilim | \
             İçerik Yazma / Üretme yeteneğinle ilgili...: \
             {\"video-title\":\"T\",\"video-thumbnail\":\"Th\",\"video-intro\":\"I\",\"video-ideas\":\"Id\"}"
        );
    }

    #[test]
    fn example_pages_only_hold_answered_active_pages() {
        let mut state = FormState::new(Catalog::reference());
        state.reconcile_conditional_steps(&[
            capabilities::DESIGN.to_string(),
            capabilities::CONTENT.to_string(),
        ]);
        state.commit_answer(5, &StepInput::choices(["Yaptım / Yapabilirim"]));
        // Content page (index 6) left unanswered.

        let payload = SubmissionPayload::format(&state, at_noon());
        assert_eq!(payload.example_pages.len(), 1);
        assert_eq!(
            payload.example_pages["Tasarım yeteneğinle ilgili..."],
            Answer::Text("Yaptım / Yapabilirim".into())
        );

        state.reconcile_conditional_steps(&[capabilities::CONTENT.to_string()]);
        let payload = SubmissionPayload::format(&state, at_noon());
        assert!(payload.example_pages.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut state = FormState::new(Catalog::reference());
        state.reconcile_conditional_steps(&[capabilities::CONTENT.to_string()]);
        state.commit_answer(
            5,
            &StepInput::fields([
                ("video-title", "TYT Matematik"),
                ("video-thumbnail", "Sarı arka plan"),
                ("video-intro", "Merhaba"),
                ("video-ideas", "Problemler"),
            ]),
        );
        let json = serde_json::to_value(SubmissionPayload::format(&state, at_noon())).unwrap();
        for key in [
            "timestamp",
            "personalInfo",
            "capabilities",
            "previousWork",
            "thoughts",
            "testConfirmation",
            "examplePages",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["personalInfo"]["class"], "");
        assert_eq!(
            json["examplePages"]["İçerik Yazma / Üretme yeteneğinle ilgili..."]["video-title"],
            "TYT Matematik"
        );
    }
}
