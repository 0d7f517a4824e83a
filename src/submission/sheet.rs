//! Spreadsheet-side contract: the row the handler appends, and its reply.

use serde::{Deserialize, Serialize};

use super::payload::SubmissionPayload;
use crate::form::Answer;

/// Column headers of the submissions sheet, in order.
pub const SHEET_HEADERS: [&str; 10] = [
    "Timestamp",
    "Ad Soyad",
    "Telefon Numarası",
    "Sınıf",
    "Haftalık Çalışma Saati",
    "Kabiliyetler",
    "Önceki İş",
    "Düşünceler",
    "Örnek Sayfa Cevapları",
    "Test Onayı",
];

/// One appended row, column for column with [`SHEET_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow(pub [String; 10]);

impl SheetRow {
    pub fn from_payload(payload: &SubmissionPayload) -> Self {
        let info = &payload.personal_info;
        Self([
            payload.timestamp.clone(),
            info.fullname.clone(),
            info.phone.clone(),
            info.class.clone(),
            info.hours.clone(),
            payload.capabilities.join(", "),
            payload.previous_work.clone(),
            payload.thoughts.clone(),
            example_pages_cell(payload),
            payload.test_confirmation.clone(),
        ])
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// `header: value` pairs for log output.
    pub fn labelled(&self) -> Vec<(&'static str, &str)> {
        SHEET_HEADERS
            .iter()
            .copied()
            .zip(self.0.iter().map(String::as_str))
            .collect()
    }
}

fn example_pages_cell(payload: &SubmissionPayload) -> String {
    payload
        .example_pages
        .iter()
        .map(|(title, answer)| match answer {
            Answer::Text(text) => format!("{title}: {text}"),
            structured => format!(
                "{title}: {}",
                serde_json::to_string(structured).unwrap_or_default()
            ),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Reply body of the spreadsheet handler (and of custom backends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::submission::payload::PersonalInfo;

    fn payload() -> SubmissionPayload {
        let mut example_pages = IndexMap::new();
        example_pages.insert(
            "Tasarım yeteneğinle ilgili...".to_string(),
            Answer::Text("Yaptım / Yapabilirim".into()),
        );
        example_pages.insert(
            "İçerik Yazma / Üretme yeteneğinle ilgili...".to_string(),
            Answer::Fields(IndexMap::from([(
                "video-title".to_string(),
                "TYT".to_string(),
            )])),
        );
        SubmissionPayload {
            timestamp: "2026-03-01T12:00:00.000Z".into(),
            personal_info: PersonalInfo {
                fullname: "Test User".into(),
                phone: "0532 123 45 67".into(),
                class: "12. Sınıf".into(),
                hours: "10 saat".into(),
            },
            capabilities: vec!["Tasarım".into(), "İçerik Yazma / Üretme".into()],
            previous_work: "Test previous work".into(),
            thoughts: "Test thoughts".into(),
            test_confirmation: "confirmed".into(),
            example_pages,
        }
    }

    #[test]
    fn row_follows_header_order() {
        let row = SheetRow::from_payload(&payload());
        assert_eq!(row.cells().len(), SHEET_HEADERS.len());
        assert_eq!(row.cells()[1], "Test User");
        assert_eq!(row.cells()[3], "12. Sınıf");
        assert_eq!(row.cells()[5], "Tasarım, İçerik Yazma / Üretme");
        assert_eq!(row.cells()[9], "confirmed");
    }

    #[test]
    fn example_pages_are_pipe_joined_and_structured_values_stringified() {
        let row = SheetRow::from_payload(&payload());
        assert_eq!(
            row.cells()[8],
            "Tasarım yeteneğinle ilgili...: Yaptım / Yapabilirim | \
             İçerik Yazma / Üretme yeteneğinle ilgili...: {\"video-title\":\"TYT\"}"
        );
    }

    #[test]
    fn empty_example_pages_give_empty_cell() {
        let mut p = payload();
        p.example_pages.clear();
        p.capabilities.clear();
        let row = SheetRow::from_payload(&p);
        assert_eq!(row.cells()[5], "");
        assert_eq!(row.cells()[8], "");
    }

    #[test]
    fn labelled_pairs_headers_with_cells() {
        let row = SheetRow::from_payload(&payload());
        let labelled = row.labelled();
        assert_eq!(labelled[0].0, "Timestamp");
        assert_eq!(labelled[2], ("Telefon Numarası", "0532 123 45 67"));
    }

    #[test]
    fn sink_response_parses_both_shapes() {
        let ok: SinkResponse =
            serde_json::from_str(r#"{"success": true, "message": "Data saved successfully"}"#)
                .unwrap();
        assert!(ok.success);
        assert_eq!(ok.message.as_deref(), Some("Data saved successfully"));

        let failed: SinkResponse =
            serde_json::from_str(r#"{"success": false, "error": "Sheet locked"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Sheet locked"));
    }
}
