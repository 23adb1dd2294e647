//! Minimal document engine: styled flowables laid out on A4 pages and
//! written as PDF.

pub mod flowable;
pub mod layout;
pub mod metrics;
pub mod styles;
pub mod writer;

pub use flowable::{Cell, Flowable, ImageBlock, ImageData, Padding, Paragraph, Table, TableStyle};
pub use layout::{layout_story, DrawOp, LaidOutDocument, LayoutEngine, Page};
pub use styles::{inch, PageTemplate, ParagraphStyle};
pub use writer::write_pdf;

/// Lay out `story` and serialise it in one step.
pub fn render_story(
    story: &[Flowable],
    template: PageTemplate,
    title: &str,
) -> Result<Vec<u8>, lopdf::Error> {
    let laid_out = layout_story(story, template);
    write_pdf(&laid_out, title)
}
