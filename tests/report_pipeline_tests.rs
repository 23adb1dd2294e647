mod common;

use activity_report_server::config::ImageSettings;
use activity_report_server::form::assemble_payload;
use activity_report_server::report::builder::StoryOptions;
use activity_report_server::report::pdf::{layout_story, PageTemplate};
use activity_report_server::report::{build_story, ActivityReportGenerator, Generator, ReportPayload};
use activity_report_server::upload::LocalUploadStore;
use common::{attendance_xlsx, form, png_bytes, with_file};
use image::GenericImageView;

#[cfg(test)]
mod report_pipeline_tests {
    use super::*;

    fn page_texts(payload: &ReportPayload) -> Vec<Vec<String>> {
        let story = build_story(payload, &StoryOptions::default());
        layout_story(&story, PageTemplate::A4)
            .pages
            .iter()
            .map(|page| page.texts().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_empty_report_is_valid_pdf_with_placeholders() {
        let payload = ReportPayload::default();
        let doc = ActivityReportGenerator::default().generate(&payload).unwrap();

        assert_eq!(doc.filename, "Activity_Report.pdf");
        let loaded = lopdf::Document::load_mem(&doc.pdf).unwrap();
        assert!(!loaded.get_pages().is_empty());

        let texts: Vec<String> = page_texts(&payload).into_iter().flatten().collect();
        for placeholder in [
            "No photos provided.",
            "No attendance records provided.",
            "No flyer uploaded.",
            "No approval letter uploaded.",
            "No feedback screenshots uploaded.",
            "No impact analysis report uploaded.",
        ] {
            assert!(texts.iter().any(|t| t == placeholder), "missing {}", placeholder);
        }
        for label in [
            "Type of Activity",
            "Collaboration/Sponsor (if any)",
            "Title of Presentation",
            "No. of Participants",
            "Key Takeaways",
            "Designation/Title",
        ] {
            assert!(texts.iter().any(|t| t == label), "missing row {}", label);
        }
    }

    #[test]
    fn test_long_attendance_spans_pages_with_repeated_header() {
        let mut payload = ReportPayload::default();
        payload.attendance = (1..=150).map(|i| format!("Participant {:03}", i)).collect();

        let pages = page_texts(&payload);
        assert!(pages.len() > 2, "expected several pages, got {}", pages.len());

        let pages_with_names: Vec<&Vec<String>> = pages
            .iter()
            .filter(|texts| texts.iter().any(|t| t.starts_with("Participant 0") || t.starts_with("Participant 1")))
            .collect();
        assert!(pages_with_names.len() > 1);
        for texts in pages_with_names {
            assert!(texts.iter().any(|t| t == "Participant Name"));
        }

        let all: Vec<String> = pages.into_iter().flatten().collect();
        assert!(all.iter().any(|t| t == "Participant 001"));
        assert!(all.iter().any(|t| t == "Participant 150"));
    }

    #[actix_web::test]
    async fn test_spreadsheet_header_row_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let xlsx = attendance_xlsx(dir.path(), &["Participant Name", "Asha", "Ben", "Chitra"]);
        let form = with_file(form(&[]), "attendance_excel", "attendance.xlsx", xlsx);

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();

        assert_eq!(payload.attendance, vec!["Asha", "Ben", "Chitra"]);
    }

    #[actix_web::test]
    async fn test_spreadsheet_header_outside_word_list_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let xlsx = attendance_xlsx(dir.path(), &["Student Name", "Asha", "Ben"]);
        let form = with_file(form(&[]), "attendance_excel", "attendance.xlsx", xlsx);

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();

        assert_eq!(payload.attendance, vec!["Asha", "Ben"]);
    }

    #[actix_web::test]
    async fn test_spreadsheet_title_and_heading_rows_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let xlsx = attendance_xlsx(dir.path(), &["Workshop Attendance", "Participant", "Asha"]);
        let form = with_file(form(&[]), "attendance_excel", "attendance.xlsx", xlsx);

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();

        assert_eq!(payload.attendance, vec!["Asha"]);
    }

    #[actix_web::test]
    async fn test_spreadsheet_takes_precedence_over_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let xlsx = attendance_xlsx(dir.path(), &["Attendees", "Dev", "Esha"]);
        let form = with_file(
            form(&[("attendance_text", "Typed One\nTyped Two")]),
            "attendance_excel",
            "list.xlsx",
            xlsx,
        );

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();

        assert_eq!(payload.attendance, vec!["Dev", "Esha"]);
    }

    #[actix_web::test]
    async fn test_unreadable_spreadsheet_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let form = with_file(
            form(&[("attendance_text", "Typed One, Typed Two")]),
            "attendance_excel",
            "broken.xlsx",
            b"definitely not a zip archive".to_vec(),
        );

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();

        assert_eq!(payload.attendance, vec!["Typed One", "Typed Two"]);
    }

    #[actix_web::test]
    async fn test_oversized_photo_is_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let png = png_bytes(dir.path(), 2400, 800);
        let form = with_file(form(&[]), "photo_1", "wide.png", png);

        let settings = ImageSettings::default();
        let payload = assemble_payload(&form, &store, &settings).await.unwrap();

        assert_eq!(payload.photos.image_paths.len(), 1);
        let saved = &payload.photos.image_paths[0];
        assert!(saved.to_string_lossy().ends_with("_resized.png"));
        assert!(saved.starts_with(dir.path().join("uploads").join("photos")));

        let (width, height) = image::open(saved).unwrap().dimensions();
        assert!(width <= settings.max_image_px);
        assert_eq!((width, height), (1200, 400));
    }

    #[actix_web::test]
    async fn test_full_report_renders() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let form = form(&[
            ("Title of the Activity", "Data Science Workshop"),
            ("profile_text", "Speaker bio"),
            ("caption", "Day one"),
            ("attendance_text", "Asha\nBen"),
        ]);
        let form = with_file(form, "speaker_image", "speaker.png", png_bytes(dir.path(), 120, 160));
        let form = with_file(form, "photo_2", "photo.png", png_bytes(dir.path(), 300, 200));
        let form = with_file(form, "feedback_ss_1", "fb.png", png_bytes(dir.path(), 200, 400));

        let payload = assemble_payload(&form, &store, &ImageSettings::default())
            .await
            .unwrap();
        assert!(payload.speaker_profile.image_path.is_some());
        assert_eq!(payload.photos.image_paths.len(), 1);
        assert_eq!(payload.feedback_screenshots.len(), 1);

        let doc = ActivityReportGenerator::default().generate(&payload).unwrap();
        assert_eq!(doc.filename, "Data Science Workshop_Report.pdf");
        lopdf::Document::load_mem(&doc.pdf).unwrap();

        let texts: Vec<String> = page_texts(&payload).into_iter().flatten().collect();
        assert!(texts.iter().any(|t| t == "Speaker Profile"));
        assert!(texts.iter().any(|t| t == "Day one"));
        assert!(!texts.iter().any(|t| t == "No photos provided."));
        assert!(!texts.iter().any(|t| t == "No feedback screenshots uploaded."));
    }
}
