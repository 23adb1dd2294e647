//! Turns a parsed form into a [`ReportPayload`], persisting uploads on the way.

use std::path::PathBuf;

use actix_web::web;
use anyhow::Context;
use log::{info, warn};

use super::multipart_parser::ParsedReportForm;
use crate::config::ImageSettings;
use crate::report::attendance::{parse_attendance_excel, parse_attendance_text, resolve_attendance};
use crate::report::images::ensure_image_resized;
use crate::report::models::{
    FieldTable, ReportHeader, ReportPayload, Synopsis, GENERAL_INFO_FIELDS,
    PARTICIPANT_PROFILE_FIELDS, PREPARED_BY_FIELDS, SPEAKER_DETAIL_FIELDS,
};
use crate::upload::{allowed_file, UploadKind, UploadStore, ALLOWED_EXCEL_EXTS, ALLOWED_IMAGE_EXTS};

pub const PHOTO_SLOTS: usize = 5;
pub const FEEDBACK_SLOTS: usize = 5;

fn field_table(form: &ParsedReportForm, fields: &[&str]) -> FieldTable {
    let mut table = FieldTable::new();
    for field in fields {
        table.set(*field, form.field(field));
    }
    table
}

fn header(form: &ParsedReportForm) -> ReportHeader {
    ReportHeader {
        university: form.field_opt("university").map(|u| u.trim().to_string()),
        school: form.field("school").trim().to_string(),
        department: form.field("department").trim().to_string(),
    }
}

/// Save the image uploaded in `slot` and downscale it if needed. Missing
/// uploads and disallowed extensions yield `None`.
async fn save_image(
    form: &ParsedReportForm,
    store: &(dyn UploadStore + Send + Sync),
    slot: &str,
    kind: UploadKind,
    settings: &ImageSettings,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(file) = form.file(slot) else {
        return Ok(None);
    };
    if !allowed_file(&file.filename, ALLOWED_IMAGE_EXTS) {
        warn!("Ignoring '{}' upload with disallowed name {:?}", slot, file.filename);
        return Ok(None);
    }

    let Some(saved) = store
        .save(kind, &file.filename, &file.data)
        .await
        .with_context(|| format!("saving upload '{}'", slot))?
    else {
        return Ok(None);
    };

    let settings = settings.clone();
    let resized = web::block(move || ensure_image_resized(&saved, &settings))
        .await
        .context("resizing image on the blocking pool")?;
    Ok(Some(resized))
}

async fn save_images(
    form: &ParsedReportForm,
    store: &(dyn UploadStore + Send + Sync),
    prefix: &str,
    slots: usize,
    kind: UploadKind,
    settings: &ImageSettings,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for i in 1..=slots {
        let slot = format!("{}{}", prefix, i);
        if let Some(path) = save_image(form, store, &slot, kind, settings).await? {
            paths.push(path);
        }
    }
    Ok(paths)
}

async fn spreadsheet_attendance(
    form: &ParsedReportForm,
    store: &(dyn UploadStore + Send + Sync),
) -> anyhow::Result<Option<Vec<String>>> {
    let Some(file) = form.file("attendance_excel") else {
        return Ok(None);
    };
    if !allowed_file(&file.filename, ALLOWED_EXCEL_EXTS) {
        warn!("Ignoring attendance upload {:?}: not an .xlsx file", file.filename);
        return Ok(None);
    }

    let Some(saved) = store
        .save(UploadKind::Attendance, &file.filename, &file.data)
        .await
        .context("saving attendance spreadsheet")?
    else {
        return Ok(None);
    };

    let names = web::block(move || parse_attendance_excel(&saved))
        .await
        .context("parsing attendance spreadsheet on the blocking pool")?;
    Ok(Some(names))
}

pub async fn assemble_payload(
    form: &ParsedReportForm,
    store: &(dyn UploadStore + Send + Sync),
    settings: &ImageSettings,
) -> anyhow::Result<ReportPayload> {
    let mut payload = ReportPayload {
        header: header(form),
        general_info: field_table(form, &GENERAL_INFO_FIELDS),
        speaker_details: field_table(form, &SPEAKER_DETAIL_FIELDS),
        participants_profile: field_table(form, &PARTICIPANT_PROFILE_FIELDS),
        synopsis: Synopsis {
            highlights: form.field("highlights").to_string(),
            key_takeaways: form.field("key_takeaways").to_string(),
            summary: form.field("summary").to_string(),
            follow_up_plan: form.field("follow_up_plan").to_string(),
        },
        ..Default::default()
    };

    for (form_field, label) in PREPARED_BY_FIELDS {
        payload.report_prepared_by.set(label, form.field(form_field));
    }

    payload.speaker_profile.profile_text = form.field("profile_text").to_string();
    payload.speaker_profile.image_path =
        save_image(form, store, "speaker_image", UploadKind::Speaker, settings).await?;

    payload.photos.caption = form.field("caption").to_string();
    payload.photos.image_paths =
        save_images(form, store, "photo_", PHOTO_SLOTS, UploadKind::Photos, settings).await?;

    let manual = parse_attendance_text(form.field("attendance_text"));
    let spreadsheet = spreadsheet_attendance(form, store).await?;
    payload.attendance = resolve_attendance(manual, spreadsheet);

    payload.flyer_path = save_image(form, store, "flyer", UploadKind::Attachments, settings).await?;
    payload.approval_path =
        save_image(form, store, "approval_letter", UploadKind::Attachments, settings).await?;
    payload.impact_path = save_image(
        form,
        store,
        "impact_analysis_report",
        UploadKind::Attachments,
        settings,
    )
    .await?;
    payload.feedback_screenshots = save_images(
        form,
        store,
        "feedback_ss_",
        FEEDBACK_SLOTS,
        UploadKind::Feedback,
        settings,
    )
    .await?;

    info!(
        "Assembled report '{}': {} photo(s), {} participant(s), {} feedback screenshot(s)",
        payload.activity_title(),
        payload.photos.image_paths.len(),
        payload.attendance.len(),
        payload.feedback_screenshots.len()
    );
    Ok(payload)
}
