//! The web form: multipart parsing, payload assembly and the HTTP handlers.

pub mod assemble;
pub mod handlers;
pub mod multipart_parser;
pub mod page;

pub use assemble::assemble_payload;
pub use multipart_parser::{MultipartParseError, MultipartParser, ParsedReportForm, UploadedFile};
