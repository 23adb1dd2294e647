//! Serialises laid-out pages into PDF bytes with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::layout::{DrawOp, LaidOutDocument};
use super::metrics::encode_winansi;
use super::styles::{Color, Font};

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn font_object(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn fill_color(color: Color) -> Operation {
    Operation::new("rg", vec![real(color.r), real(color.g), real(color.b)])
}

fn stroke_color(color: Color) -> Operation {
    Operation::new("RG", vec![real(color.r), real(color.g), real(color.b)])
}

fn page_operations(
    doc: &mut Document,
    ops: &[DrawOp],
    xobjects: &mut Dictionary,
) -> Vec<Operation> {
    let mut operations = Vec::new();

    for op in ops {
        match op {
            DrawOp::Text {
                font,
                size,
                x,
                y,
                text,
            } => {
                operations.push(fill_color(Color::BLACK));
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![name(font.resource_name()), real(*size)],
                ));
                operations.push(Operation::new("Td", vec![real(*x), real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_winansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                operations.push(stroke_color(*color));
                operations.push(Operation::new("w", vec![real(*width)]));
                operations.push(Operation::new("m", vec![real(*x1), real(*y1)]));
                operations.push(Operation::new("l", vec![real(*x2), real(*y2)]));
                operations.push(Operation::new("S", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                operations.push(fill_color(*color));
                operations.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Image {
                data,
                x,
                y,
                width,
                height,
            } => {
                let image_stream = Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => Object::Integer(data.width as i64),
                        "Height" => Object::Integer(data.height as i64),
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => Object::Integer(8),
                    },
                    data.rgb.clone(),
                );
                let image_id = doc.add_object(image_stream);
                let resource = format!("Im{}", xobjects.len() + 1);
                xobjects.set(resource.as_bytes().to_vec(), Object::Reference(image_id));

                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        real(*width),
                        real(0.0),
                        real(0.0),
                        real(*height),
                        real(*x),
                        real(*y),
                    ],
                ));
                operations.push(Operation::new("Do", vec![name(&resource)]));
                operations.push(Operation::new("Q", vec![]));
            }
        }
    }

    operations
}

/// Produce a complete PDF file for `laid_out`.
pub fn write_pdf(laid_out: &LaidOutDocument, title: &str) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = font_object(&mut doc, Font::TimesRoman);
    let bold_id = font_object(&mut doc, Font::TimesBold);

    let template = laid_out.template;
    let mut kids = Vec::with_capacity(laid_out.pages.len());

    for page in &laid_out.pages {
        let mut xobjects = Dictionary::new();
        let operations = page_operations(&mut doc, &page.ops, &mut xobjects);
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut fonts = Dictionary::new();
        fonts.set(Font::TimesRoman.resource_name(), Object::Reference(regular_id));
        fonts.set(Font::TimesBold.resource_name(), Object::Reference(bold_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if !xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![real(0.0), real(0.0), real(template.width), real(template.height)],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_winansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(created),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::pdf::layout::Page;
    use crate::report::pdf::styles::PageTemplate;

    fn text_page(text: &str) -> Page {
        Page {
            ops: vec![DrawOp::Text {
                font: Font::TimesBold,
                size: 12.0,
                x: 72.0,
                y: 700.0,
                text: text.to_string(),
            }],
        }
    }

    #[test]
    fn test_writes_loadable_pdf() {
        let laid_out = LaidOutDocument {
            template: PageTemplate::A4,
            pages: vec![text_page("One"), text_page("Two (with parens)")],
        };

        let bytes = write_pdf(&laid_out, "Test").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 2);
    }

    #[test]
    fn test_page_with_image_has_xobject() {
        let data = std::sync::Arc::new(crate::report::pdf::flowable::ImageData {
            width: 2,
            height: 1,
            rgb: vec![255, 0, 0, 0, 255, 0],
        });
        let laid_out = LaidOutDocument {
            template: PageTemplate::A4,
            pages: vec![Page {
                ops: vec![DrawOp::Image {
                    data,
                    x: 10.0,
                    y: 10.0,
                    width: 20.0,
                    height: 10.0,
                }],
            }],
        };

        let bytes = write_pdf(&laid_out, "Image").unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        let pages = loaded.get_pages();
        let page_id = pages.values().next().copied().unwrap();
        let page = loaded.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        assert!(resources.has(b"XObject"));
    }
}
