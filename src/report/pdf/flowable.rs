//! Units of document content placed into the page in sequence.

use std::path::Path;
use std::sync::Arc;

use log::error;

use super::styles::{inch, Color, ParagraphStyle, NORMAL_TEXT};

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: ParagraphStyle,
}

impl Cell {
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub grid_width: f32,
    pub grid_color: Color,
    pub padding: Padding,
    /// Fill for row 0; also marks row 0 as a header.
    pub header_background: Option<Color>,
    /// Redraw row 0 at the top of every continuation page.
    pub repeat_header: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub col_widths: Vec<f32>,
    pub rows: Vec<Vec<Cell>>,
    pub style: TableStyle,
}

/// Decoded RGB pixels ready for embedding.
#[derive(Debug, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub data: Arc<ImageData>,
    pub draw_width: f32,
    pub draw_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    Spacer(f32),
    Table(Table),
    Image(ImageBlock),
}

impl Flowable {
    pub fn paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self::Paragraph(Paragraph {
            text: text.into(),
            style,
        })
    }

    /// Vertical gap of `inches`.
    pub fn spacer(inches: f32) -> Self {
        Self::Spacer(inch(inches))
    }

    /// Load the image at `path`, drawn at its pixel size in points and
    /// scaled down to `max_width` when wider. A missing or undecodable file
    /// turns into a short explanatory paragraph instead.
    pub fn image(path: &Path, max_width: f32) -> Self {
        if !path.exists() {
            return Self::paragraph(
                format!("[Image not found: {}]", path.display()),
                NORMAL_TEXT,
            );
        }

        match load_image(path) {
            Ok(data) => {
                let mut draw_width = data.width as f32;
                let mut draw_height = data.height as f32;
                if draw_width > max_width {
                    let scale = max_width / draw_width;
                    draw_width *= scale;
                    draw_height *= scale;
                }
                Self::Image(ImageBlock {
                    data: Arc::new(data),
                    draw_width,
                    draw_height,
                })
            }
            Err(e) => {
                error!("Error creating image flowable for {}: {}", path.display(), e);
                Self::paragraph(
                    format!("[Failed to load image: {}]", path.display()),
                    NORMAL_TEXT,
                )
            }
        }
    }

    /// Text carried by this flowable, for paragraphs and table cells.
    pub fn text_content(&self) -> Vec<&str> {
        match self {
            Self::Paragraph(p) => vec![p.text.as_str()],
            Self::Table(t) => t
                .rows
                .iter()
                .flat_map(|row| row.iter().map(|c| c.text.as_str()))
                .collect(),
            Self::Spacer(_) | Self::Image(_) => Vec::new(),
        }
    }
}

/// Decode to 8-bit RGB, compositing any alpha channel onto white.
fn load_image(path: &Path) -> Result<ImageData, image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let alpha = pixel[3] as u32;
        for channel in 0..3 {
            let value = pixel[channel] as u32;
            rgb.push(((value * alpha + 255 * (255 - alpha)) / 255) as u8);
        }
    }

    Ok(ImageData { width, height, rgb })
}
