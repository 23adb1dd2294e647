//! Assembly of the activity report story and the report generator.

use std::path::{Path, PathBuf};

use log::info;

use super::models::{FieldTable, ReportPayload};
use super::pdf::styles::{
    Color, HEADER_MAIN, HEADER_ROW_BACKGROUND, HEADER_SUB, NORMAL_TEXT, REPORT_TITLE,
    SECTION_TITLE, TABLE_KEY, TABLE_VALUE,
};
use super::pdf::{inch, render_story, Cell, Flowable, PageTemplate, Padding, Table, TableStyle};
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};
use crate::config::{AppConfig, DEFAULT_UNIVERSITY};

const KEY_COLUMN_INCH: f32 = 2.2;
const VALUE_COLUMN_INCH: f32 = 4.8;
const PARTICIPANT_COLUMN_INCH: f32 = 6.8;

/// Rendering knobs that vary with configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryOptions {
    pub default_university: String,
    pub max_image_width_inch: f32,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            default_university: DEFAULT_UNIVERSITY.to_string(),
            max_image_width_inch: 6.6,
        }
    }
}

fn key_value_table(table: &FieldTable) -> Vec<Flowable> {
    if table.is_empty() {
        return Vec::new();
    }

    let rows = table
        .rows()
        .iter()
        .map(|(key, value)| vec![Cell::new(key, TABLE_KEY), Cell::new(value, TABLE_VALUE)])
        .collect();

    vec![
        Flowable::Table(Table {
            col_widths: vec![inch(KEY_COLUMN_INCH), inch(VALUE_COLUMN_INCH)],
            rows,
            style: TableStyle {
                grid_width: 0.75,
                grid_color: Color::BLACK,
                padding: Padding {
                    left: 6.0,
                    right: 6.0,
                    top: 4.0,
                    bottom: 4.0,
                },
                header_background: None,
                repeat_header: false,
            },
        }),
        Flowable::spacer(0.08),
    ]
}

fn participant_table(names: &[String]) -> Vec<Flowable> {
    if names.is_empty() {
        return placeholder("No attendance records provided.");
    }

    let mut rows = Vec::with_capacity(names.len() + 1);
    rows.push(vec![Cell::new("Participant Name", TABLE_KEY)]);
    rows.extend(names.iter().map(|n| vec![Cell::new(n, TABLE_VALUE)]));

    vec![
        Flowable::Table(Table {
            col_widths: vec![inch(PARTICIPANT_COLUMN_INCH)],
            rows,
            style: TableStyle {
                grid_width: 0.75,
                grid_color: Color::BLACK,
                padding: Padding {
                    left: 6.0,
                    right: 6.0,
                    top: 3.0,
                    bottom: 3.0,
                },
                header_background: Some(HEADER_ROW_BACKGROUND),
                repeat_header: true,
            },
        }),
        Flowable::spacer(0.12),
    ]
}

fn placeholder(message: &str) -> Vec<Flowable> {
    vec![
        Flowable::paragraph(message, NORMAL_TEXT),
        Flowable::spacer(0.08),
    ]
}

fn section(title: &str) -> Flowable {
    Flowable::paragraph(title, SECTION_TITLE)
}

fn image_block(path: &Path, options: &StoryOptions) -> Vec<Flowable> {
    vec![
        Flowable::image(path, inch(options.max_image_width_inch)),
        Flowable::spacer(0.12),
    ]
}

fn image_list(paths: &[PathBuf], options: &StoryOptions, empty_message: &str) -> Vec<Flowable> {
    if paths.is_empty() {
        return placeholder(empty_message);
    }
    paths.iter().flat_map(|p| image_block(p, options)).collect()
}

fn optional_image(path: Option<&Path>, options: &StoryOptions, empty_message: &str) -> Vec<Flowable> {
    match path {
        Some(p) => image_block(p, options),
        None => placeholder(empty_message),
    }
}

/// Build the ordered flowables for a report.
pub fn build_story(payload: &ReportPayload, options: &StoryOptions) -> Vec<Flowable> {
    let mut story = Vec::new();

    let header = &payload.header;
    let university = header
        .university
        .as_deref()
        .unwrap_or(&options.default_university);
    story.push(Flowable::paragraph(university, HEADER_MAIN));
    if !header.school.is_empty() {
        story.push(Flowable::paragraph(&header.school, HEADER_SUB));
    }
    if !header.department.is_empty() {
        story.push(Flowable::paragraph(&header.department, HEADER_SUB));
    }
    story.push(Flowable::spacer(0.2));
    story.push(Flowable::paragraph("Activity Report", REPORT_TITLE));

    story.push(section("General Information"));
    story.extend(key_value_table(&payload.general_info));

    story.push(section("Speaker/Guest/Presenter Details"));
    story.extend(key_value_table(&payload.speaker_details));

    story.push(section("Participants Profile"));
    story.extend(key_value_table(&payload.participants_profile));

    story.push(section("Synopsis of the Activity (Description)"));
    let synopsis = &payload.synopsis;
    let synopsis_table = FieldTable::new()
        .with(
            "Highlights of the Activity (Description)",
            synopsis.highlights.as_str(),
        )
        .with("Key Takeaways", synopsis.key_takeaways.as_str())
        .with("Summary of the Activity", synopsis.summary.as_str())
        .with("Follow-up plan", synopsis.follow_up_plan.as_str());
    story.extend(key_value_table(&synopsis_table));

    story.push(section("Report Prepared By"));
    story.extend(key_value_table(&payload.report_prepared_by));

    let profile = &payload.speaker_profile;
    if !profile.is_empty() {
        story.push(section("Speaker Profile"));
        if !profile.profile_text.is_empty() {
            story.push(Flowable::paragraph(&profile.profile_text, NORMAL_TEXT));
            story.push(Flowable::spacer(0.08));
        }
        if let Some(path) = &profile.image_path {
            story.extend(image_block(path, options));
        }
    }

    story.push(section("Photos of the Activity"));
    story.extend(image_list(
        &payload.photos.image_paths,
        options,
        "No photos provided.",
    ));
    if !payload.photos.image_paths.is_empty() && !payload.photos.caption.is_empty() {
        story.push(Flowable::paragraph(&payload.photos.caption, NORMAL_TEXT));
        story.push(Flowable::spacer(0.08));
    }

    story.push(section("Attendance List"));
    story.extend(participant_table(&payload.attendance));

    story.push(section("Flyer of the Event"));
    story.extend(optional_image(
        payload.flyer_path.as_deref(),
        options,
        "No flyer uploaded.",
    ));

    story.push(section("Approval Letter"));
    story.extend(optional_image(
        payload.approval_path.as_deref(),
        options,
        "No approval letter uploaded.",
    ));

    story.push(section("Feedback Screenshots"));
    story.extend(image_list(
        &payload.feedback_screenshots,
        options,
        "No feedback screenshots uploaded.",
    ));

    story.push(section("Impact Analysis Report"));
    story.extend(optional_image(
        payload.impact_path.as_deref(),
        options,
        "No impact analysis report uploaded.",
    ));

    story
}

/// `{title}_Report.pdf`, with characters unsafe in a download name removed.
pub fn report_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '"'))
        .collect();
    let cleaned = cleaned.trim();
    let base = if cleaned.is_empty() { "Activity" } else { cleaned };
    format!("{}_Report.pdf", base)
}

/// Renders activity reports on the A4 template.
pub struct ActivityReportGenerator {
    template: PageTemplate,
    options: StoryOptions,
}

impl ActivityReportGenerator {
    pub fn new(options: StoryOptions) -> Self {
        Self {
            template: PageTemplate::A4,
            options,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(StoryOptions {
            default_university: config.default_university.clone(),
            max_image_width_inch: config.images.max_image_width_inch,
        })
    }
}

impl Default for ActivityReportGenerator {
    fn default() -> Self {
        Self::new(StoryOptions::default())
    }
}

impl Generator<ReportPayload> for ActivityReportGenerator {
    fn generate(&self, request: &ReportPayload) -> Result<GeneratedDocument, GeneratorError> {
        let story = build_story(request, &self.options);
        let title = request.activity_title();
        let pdf = render_story(&story, self.template, title)?;

        info!(
            "Generated activity report '{}' ({} flowables, {} bytes)",
            title,
            story.len(),
            pdf.len()
        );

        Ok(GeneratedDocument {
            filename: report_filename(title),
            pdf,
        })
    }
}
