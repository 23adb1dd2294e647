#![allow(dead_code)]

use std::path::Path;

use activity_report_server::form::{ParsedReportForm, UploadedFile};
use image::{Rgb, RgbImage};
use rust_xlsxwriter::Workbook;

pub const BOUNDARY: &str = "----activity-report-test-boundary";

/// Write a solid-colour PNG and return its bytes.
pub fn png_bytes(dir: &Path, width: u32, height: u32) -> Vec<u8> {
    let path = dir.join(format!("fixture_{}x{}.png", width, height));
    RgbImage::from_pixel(width, height, Rgb([30, 90, 160]))
        .save(&path)
        .unwrap();
    std::fs::read(&path).unwrap()
}

/// Write an `.xlsx` with `values` down column A and return its bytes.
pub fn attendance_xlsx(dir: &Path, values: &[&str]) -> Vec<u8> {
    let path = dir.join("attendance_fixture.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row, value) in values.iter().enumerate() {
        worksheet.write_string(row as u32, 0, *value).unwrap();
    }
    workbook.save(&path).unwrap();
    std::fs::read(&path).unwrap()
}

pub fn form(fields: &[(&str, &str)]) -> ParsedReportForm {
    let mut form = ParsedReportForm::default();
    for (name, value) in fields {
        form.fields.insert(name.to_string(), value.to_string());
    }
    form
}

pub fn with_file(mut form: ParsedReportForm, slot: &str, filename: &str, data: Vec<u8>) -> ParsedReportForm {
    form.files.insert(
        slot.to_string(),
        UploadedFile {
            filename: filename.to_string(),
            data,
        },
    );
    form
}

/// Hand-rolled `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={}", BOUNDARY)
    }
}
