//! Greedy top-to-bottom placement of flowables onto fixed-size pages.
//!
//! The engine keeps a cursor at the top of the free space in the current
//! frame. Each flowable either fits below the cursor, moves to a fresh page,
//! or, when taller than a whole frame, is split (paragraphs and table rows by
//! line, images by scaling down).

use std::sync::Arc;

use super::flowable::{Cell, Flowable, ImageBlock, ImageData, Paragraph, Table};
use super::metrics::{string_width, wrap_text};
use super::styles::{Alignment, Color, Font, PageTemplate, ParagraphStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Image {
        data: Arc<ImageData>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub template: PageTemplate,
    pub pages: Vec<Page>,
}

/// Baseline offset below the top of a line box.
fn baseline_offset(size: f32, leading: f32) -> f32 {
    (leading - size) / 2.0 + size * 0.8
}

/// A table row with every cell already wrapped to its column.
struct WrappedRow<'a> {
    cells: Vec<(&'a Cell, Vec<String>)>,
    leading: f32,
    line_count: usize,
}

impl WrappedRow<'_> {
    fn height(&self, lines: usize, pad: f32) -> f32 {
        lines as f32 * self.leading + pad
    }
}

pub struct LayoutEngine {
    template: PageTemplate,
    pages: Vec<Page>,
    cursor: f32,
    at_page_top: bool,
}

impl LayoutEngine {
    pub fn new(template: PageTemplate) -> Self {
        Self {
            template,
            pages: vec![Page::default()],
            cursor: template.frame_top(),
            at_page_top: true,
        }
    }

    pub fn layout(mut self, story: &[Flowable]) -> LaidOutDocument {
        for flowable in story {
            match flowable {
                Flowable::Paragraph(p) => self.place_paragraph(p),
                Flowable::Spacer(height) => self.place_spacer(*height),
                Flowable::Table(t) => self.place_table(t),
                Flowable::Image(img) => self.place_image(img),
            }
        }
        LaidOutDocument {
            template: self.template,
            pages: self.pages,
        }
    }

    fn available(&self) -> f32 {
        self.cursor - self.template.bottom_margin
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.template.frame_top();
        self.at_page_top = true;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn advance(&mut self, height: f32) {
        self.cursor = (self.cursor - height).max(self.template.bottom_margin);
    }

    fn place_spacer(&mut self, height: f32) {
        self.advance(height);
    }

    fn place_paragraph(&mut self, paragraph: &Paragraph) {
        let style = &paragraph.style;
        if !self.at_page_top {
            if self.available() <= style.space_before {
                self.new_page();
            } else {
                self.advance(style.space_before);
            }
        }

        let width = self.template.frame_width();
        let lines = wrap_text(&paragraph.text, style.font, style.font_size, width);
        for line in lines {
            if self.available() < style.leading && !self.at_page_top {
                self.new_page();
            }
            self.draw_text_line(&line, style, self.template.left_margin, width, self.cursor);
            self.advance(style.leading);
            self.at_page_top = false;
        }

        self.advance(style.space_after);
    }

    fn draw_text_line(&mut self, line: &str, style: &ParagraphStyle, x: f32, width: f32, top: f32) {
        if line.is_empty() {
            return;
        }
        let x = match style.alignment {
            Alignment::Left => x,
            Alignment::Center => {
                x + ((width - string_width(line, style.font, style.font_size)) / 2.0).max(0.0)
            }
        };
        self.push(DrawOp::Text {
            font: style.font,
            size: style.font_size,
            x,
            y: top - baseline_offset(style.font_size, style.leading),
            text: line.to_string(),
        });
    }

    fn place_image(&mut self, image: &ImageBlock) {
        let mut width = image.draw_width;
        let mut height = image.draw_height;
        let frame_height = self.template.frame_height();
        if height > frame_height {
            let scale = frame_height / height;
            width *= scale;
            height *= scale;
        }

        if height > self.available() && !self.at_page_top {
            self.new_page();
        }

        let x = self.template.left_margin + ((self.template.frame_width() - width) / 2.0).max(0.0);
        self.push(DrawOp::Image {
            data: Arc::clone(&image.data),
            x,
            y: self.cursor - height,
            width,
            height,
        });
        self.advance(height);
        self.at_page_top = false;
    }

    fn column_widths(&self, table: &Table) -> Vec<f32> {
        let total: f32 = table.col_widths.iter().sum();
        let frame = self.template.frame_width();
        if total > frame && total > 0.0 {
            let scale = frame / total;
            table.col_widths.iter().map(|w| w * scale).collect()
        } else {
            table.col_widths.clone()
        }
    }

    fn wrap_row<'a>(&self, row: &'a [Cell], widths: &[f32], table: &Table) -> WrappedRow<'a> {
        let pad = &table.style.padding;
        let cells: Vec<(&Cell, Vec<String>)> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| {
                let inner = (w - pad.left - pad.right).max(1.0);
                let lines = wrap_text(&cell.text, cell.style.font, cell.style.font_size, inner);
                (cell, lines)
            })
            .collect();
        let leading = row
            .iter()
            .map(|c| c.style.leading)
            .fold(0.0_f32, f32::max);
        let line_count = cells.iter().map(|(_, l)| l.len()).max().unwrap_or(0).max(1);
        WrappedRow {
            cells,
            leading,
            line_count,
        }
    }

    fn place_table(&mut self, table: &Table) {
        if table.rows.is_empty() {
            return;
        }
        let widths = self.column_widths(table);
        let pad = table.style.padding;
        let vertical_pad = pad.top + pad.bottom;
        let has_header = table.style.header_background.is_some();

        let rows: Vec<WrappedRow> = table
            .rows
            .iter()
            .map(|row| self.wrap_row(row, &widths, table))
            .collect();

        // Keep the header row with at least the first line of the row below it.
        if has_header && rows.len() > 1 && !self.at_page_top {
            let needed = rows[0].height(rows[0].line_count, vertical_pad)
                + rows[1].height(1, vertical_pad);
            if needed > self.available() {
                self.new_page();
            }
        }

        for (index, row) in rows.iter().enumerate() {
            let mut start = 0;
            // True right after a page break, including one followed by a
            // repeated header: breaking again would not gain any room.
            let mut fresh = self.at_page_top;

            while start < row.line_count {
                let remaining = row.line_count - start;
                if row.height(remaining, vertical_pad) <= self.available() {
                    self.draw_row(row, start, remaining, &widths, table, index == 0 && has_header);
                    break;
                }

                if !fresh {
                    self.break_table_page(&rows, &widths, table, index);
                    fresh = true;
                    continue;
                }

                let fit = ((self.available() - vertical_pad) / row.leading)
                    .floor()
                    .max(1.0) as usize;
                let fit = fit.min(remaining);
                self.draw_row(row, start, fit, &widths, table, index == 0 && has_header);
                start += fit;
                if start < row.line_count {
                    self.break_table_page(&rows, &widths, table, index);
                    fresh = true;
                }
            }
        }
    }

    fn break_table_page(&mut self, rows: &[WrappedRow], widths: &[f32], table: &Table, index: usize) {
        self.new_page();
        if table.style.repeat_header && index > 0 {
            if let Some(header) = rows.first() {
                self.draw_row(
                    header,
                    0,
                    header.line_count,
                    widths,
                    table,
                    table.style.header_background.is_some(),
                );
            }
        }
    }

    fn draw_row(
        &mut self,
        row: &WrappedRow,
        start: usize,
        count: usize,
        widths: &[f32],
        table: &Table,
        is_header: bool,
    ) {
        let style = &table.style;
        let pad = style.padding;
        let height = row.height(count, pad.top + pad.bottom);
        let top = self.cursor;
        let bottom = top - height;
        let left = self.template.left_margin;
        let total_width: f32 = widths.iter().sum();

        if is_header {
            if let Some(color) = style.header_background {
                self.push(DrawOp::FillRect {
                    x: left,
                    y: bottom,
                    width: total_width,
                    height,
                    color,
                });
            }
        }

        let mut x = left;
        for ((cell, lines), width) in row.cells.iter().zip(widths) {
            let inner_width = width - pad.left - pad.right;
            let mut line_top = top - pad.top;
            for line in lines.iter().skip(start).take(count) {
                self.draw_text_line(line, &cell.style, x + pad.left, inner_width, line_top);
                line_top -= row.leading;
            }
            x += width;
        }

        let line = |x1: f32, y1: f32, x2: f32, y2: f32| DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: style.grid_width,
            color: style.grid_color,
        };
        self.push(line(left, top, left + total_width, top));
        self.push(line(left, bottom, left + total_width, bottom));
        let mut x = left;
        self.push(line(x, top, x, bottom));
        for width in widths {
            x += width;
            self.push(line(x, top, x, bottom));
        }

        self.advance(height);
        self.at_page_top = false;
    }
}

/// Lay `story` out on pages of `template`.
pub fn layout_story(story: &[Flowable], template: PageTemplate) -> LaidOutDocument {
    LayoutEngine::new(template).layout(story)
}
