use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Ordered label/value rows rendered as a two column table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldTable {
    rows: Vec<(String, String)>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, replacing the value if the label already exists.
    pub fn set(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.rows.iter_mut().find(|(l, _)| *l == label) {
            Some(row) => row.1 = value,
            None => self.rows.push((label, value)),
        }
    }

    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// `None` when the form never sent the field; the renderer then falls
    /// back to the configured default university.
    pub university: Option<String>,
    pub school: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Synopsis {
    pub highlights: String,
    pub key_takeaways: String,
    pub summary: String,
    pub follow_up_plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerProfile {
    pub profile_text: String,
    pub image_path: Option<PathBuf>,
}

impl SpeakerProfile {
    pub fn is_empty(&self) -> bool {
        self.profile_text.is_empty() && self.image_path.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photos {
    pub caption: String,
    pub image_paths: Vec<PathBuf>,
}

/// Everything submitted for one activity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub header: ReportHeader,
    pub general_info: FieldTable,
    pub speaker_details: FieldTable,
    pub participants_profile: FieldTable,
    pub synopsis: Synopsis,
    pub report_prepared_by: FieldTable,
    pub speaker_profile: SpeakerProfile,
    pub photos: Photos,
    pub attendance: Vec<String>,
    pub flyer_path: Option<PathBuf>,
    pub approval_path: Option<PathBuf>,
    pub impact_path: Option<PathBuf>,
    pub feedback_screenshots: Vec<PathBuf>,
}

fn blank_table<'a>(labels: impl IntoIterator<Item = &'a str>) -> FieldTable {
    let mut table = FieldTable::new();
    for label in labels {
        table.set(label, "");
    }
    table
}

/// Every table carries all of its rows, each with an empty value.
impl Default for ReportPayload {
    fn default() -> Self {
        Self {
            header: ReportHeader::default(),
            general_info: blank_table(GENERAL_INFO_FIELDS),
            speaker_details: blank_table(SPEAKER_DETAIL_FIELDS),
            participants_profile: blank_table(PARTICIPANT_PROFILE_FIELDS),
            synopsis: Synopsis::default(),
            report_prepared_by: blank_table(PREPARED_BY_FIELDS.iter().map(|(_, label)| *label)),
            speaker_profile: SpeakerProfile::default(),
            photos: Photos::default(),
            attendance: Vec::new(),
            flyer_path: None,
            approval_path: None,
            impact_path: None,
            feedback_screenshots: Vec::new(),
        }
    }
}

impl ReportPayload {
    pub fn activity_title(&self) -> &str {
        self.general_info.get(GENERAL_INFO_FIELDS[1]).unwrap_or("")
    }
}

pub const GENERAL_INFO_FIELDS: [&str; 6] = [
    "Type of Activity",
    "Title of the Activity",
    "Date/s",
    "Time",
    "Venue",
    "Collaboration/Sponsor (if any)",
];

pub const SPEAKER_DETAIL_FIELDS: [&str; 4] = [
    "Name",
    "Title/Position",
    "Organization",
    "Title of Presentation",
];

pub const PARTICIPANT_PROFILE_FIELDS: [&str; 2] = ["Type of Participants", "No. of Participants"];

/// (form field, table label) pairs for the preparer section.
pub const PREPARED_BY_FIELDS: [(&str, &str); 2] = [
    ("Name_Prepared", "Name"),
    ("Designation/Title_Prepared", "Designation/Title"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_keeps_insertion_order() {
        let table = FieldTable::new()
            .with("Venue", "Hall A")
            .with("Time", "10:00")
            .with("Venue", "Hall B");

        assert_eq!(
            table.rows(),
            &[
                ("Venue".to_string(), "Hall B".to_string()),
                ("Time".to_string(), "10:00".to_string()),
            ]
        );
        assert_eq!(table.get("Time"), Some("10:00"));
        assert_eq!(table.get("Date/s"), None);
    }

    #[test]
    fn test_default_payload_has_every_row() {
        let payload = ReportPayload::default();

        let labels: Vec<&str> = payload
            .general_info
            .rows()
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, GENERAL_INFO_FIELDS);
        assert_eq!(payload.speaker_details.rows().len(), SPEAKER_DETAIL_FIELDS.len());
        assert_eq!(payload.participants_profile.get("No. of Participants"), Some(""));
        assert_eq!(payload.report_prepared_by.get("Designation/Title"), Some(""));
        assert_eq!(payload.report_prepared_by.get("Name_Prepared"), None);
        assert!(payload.general_info.rows().iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn test_activity_title() {
        let mut payload = ReportPayload::default();
        assert_eq!(payload.activity_title(), "");

        payload.general_info.set("Title of the Activity", "Rust Workshop");
        assert_eq!(payload.activity_title(), "Rust Workshop");
    }

    #[test]
    fn test_payload_json_round_trip_defaults() {
        let json = r#"{
            "header": {"university": null, "school": "", "department": ""},
            "general_info": {"rows": [["Venue", "Auditorium"]]},
            "speaker_details": {"rows": []},
            "participants_profile": {"rows": []},
            "synopsis": {"highlights": "", "key_takeaways": "", "summary": "", "follow_up_plan": ""},
            "report_prepared_by": {"rows": []},
            "speaker_profile": {"profile_text": "", "image_path": null},
            "photos": {"caption": "", "image_paths": []},
            "attendance": ["Asha"],
            "flyer_path": null,
            "approval_path": null,
            "impact_path": null,
            "feedback_screenshots": []
        }"#;

        let payload: ReportPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.general_info.get("Venue"), Some("Auditorium"));
        assert_eq!(payload.attendance, vec!["Asha".to_string()]);
        assert!(payload.speaker_profile.is_empty());
    }
}
