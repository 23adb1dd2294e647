use actix_multipart::Multipart;
use actix_web::error::BlockingError;
use actix_web::http::header::{self, ContentDisposition, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info};
use thiserror::Error;

use super::assemble::assemble_payload;
use super::multipart_parser::{MultipartParseError, MultipartParser};
use super::page::render_form_page;
use crate::report::{GeneratedDocument, Generator, GeneratorError};
use crate::state::AppState;
use crate::ErrorResponse;

/// Everything that can go wrong between receiving the form and sending the PDF.
#[derive(Debug, Error)]
pub enum ReportRequestError {
    #[error(transparent)]
    Multipart(#[from] MultipartParseError),
    #[error("{0:#}")]
    Assembly(#[from] anyhow::Error),
    #[error(transparent)]
    Generation(#[from] GeneratorError),
    #[error("report generation was interrupted: {0}")]
    Blocking(#[from] BlockingError),
}

impl ReportRequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Multipart(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let message = self.to_string();
        match self.status_code() {
            StatusCode::BAD_REQUEST => ErrorResponse::bad_request(&message),
            _ => ErrorResponse::internal_error(&message),
        }
    }
}

/// True when the client asked for JSON rather than the HTML form.
fn wants_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json") && !accept.contains("text/html"))
        .unwrap_or(false)
}

/// Multipart body accepted by `POST /`. Every field is optional.
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
#[allow(unused)]
pub struct ReportFormRequest {
    pub university: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "Type of Activity")]
    pub type_of_activity: Option<String>,
    #[serde(rename = "Title of the Activity")]
    pub title_of_the_activity: Option<String>,
    #[serde(rename = "Date/s")]
    pub dates: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Venue")]
    pub venue: Option<String>,
    #[serde(rename = "Collaboration/Sponsor (if any)")]
    pub collaboration: Option<String>,
    #[serde(rename = "Name")]
    pub speaker_name: Option<String>,
    #[serde(rename = "Title/Position")]
    pub speaker_position: Option<String>,
    #[serde(rename = "Organization")]
    pub speaker_organization: Option<String>,
    #[serde(rename = "Title of Presentation")]
    pub presentation_title: Option<String>,
    #[serde(rename = "Type of Participants")]
    pub participant_type: Option<String>,
    #[serde(rename = "No. of Participants")]
    pub participant_count: Option<String>,
    pub highlights: Option<String>,
    pub key_takeaways: Option<String>,
    pub summary: Option<String>,
    pub follow_up_plan: Option<String>,
    #[serde(rename = "Name_Prepared")]
    pub prepared_by_name: Option<String>,
    #[serde(rename = "Designation/Title_Prepared")]
    pub prepared_by_designation: Option<String>,
    pub profile_text: Option<String>,
    pub speaker_image: Option<Vec<u8>>,
    pub photo_1: Option<Vec<u8>>,
    pub caption: Option<String>,
    pub attendance_text: Option<String>,
    pub attendance_excel: Option<Vec<u8>>,
    pub flyer: Option<Vec<u8>>,
    pub approval_letter: Option<Vec<u8>>,
    pub impact_analysis_report: Option<Vec<u8>>,
    pub feedback_ss_1: Option<Vec<u8>>,
}

fn html_page(status: StatusCode, error: Option<&str>) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(render_form_page(error))
}

#[utoipa::path(
    tag = "Activity Report",
    get,
    path = "/",
    responses(
        (status = 200, description = "The report form", content_type = "text/html", body = String)
    )
)]
pub async fn index() -> impl Responder {
    debug!("Serving report form");
    html_page(StatusCode::OK, None)
}

async fn build_report(
    state: &AppState,
    payload: Multipart,
) -> Result<GeneratedDocument, ReportRequestError> {
    let form = MultipartParser::parse_report_multipart(payload).await?;
    let report = assemble_payload(&form, state.store.as_ref(), &state.config.images).await?;

    let generator = state.generator.clone();
    let document = web::block(move || generator.generate(&report)).await??;
    Ok(document)
}

#[utoipa::path(
    tag = "Activity Report",
    post,
    path = "/",
    request_body(content = inline(ReportFormRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "The generated report as a PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Malformed multipart body; the form is shown again with the error, or JSON when requested", body = ErrorResponse),
        (status = 500, description = "Report generation failed; the form is shown again with the error, or JSON when requested", body = ErrorResponse)
    )
)]
pub async fn generate_report(
    req: HttpRequest,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing generate_report handler");
    match build_report(&data, payload).await {
        Ok(document) => {
            info!(
                "Sending {} ({} bytes)",
                document.filename,
                document.pdf.len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition::attachment(document.filename))
                .body(document.pdf)
        }
        Err(e) => {
            error!("Exception in POST: {}", e);
            if wants_json(&req) {
                HttpResponse::build(e.status_code()).json(e.to_error_response())
            } else {
                html_page(e.status_code(), Some(&e.to_string()))
            }
        }
    }
}

pub async fn not_found(req: HttpRequest) -> impl Responder {
    debug!("No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
        "No resource at {}",
        req.path()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let multipart = ReportRequestError::from(MultipartParseError::FieldError("x".into()));
        assert_eq!(multipart.status_code(), StatusCode::BAD_REQUEST);

        let assembly = ReportRequestError::from(anyhow::anyhow!("disk full"));
        assert_eq!(assembly.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(assembly.to_string(), "disk full");
        assert_eq!(assembly.to_error_response().error, "InternalServerError");
        assert_eq!(multipart.to_error_response().error, "BadRequest");
    }

    #[test]
    fn test_wants_json() {
        let json = actix_web::test::TestRequest::default()
            .insert_header((header::ACCEPT, "application/json"))
            .to_http_request();
        let browser = actix_web::test::TestRequest::default()
            .insert_header((header::ACCEPT, "text/html,application/xhtml+xml,*/*"))
            .to_http_request();

        assert!(wants_json(&json));
        assert!(!wants_json(&browser));
        assert!(!wants_json(&actix_web::test::TestRequest::default().to_http_request()));
    }
}
