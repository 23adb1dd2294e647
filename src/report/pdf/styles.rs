//! Fixed page template and paragraph styles.

pub const POINTS_PER_INCH: f32 = 72.0;

pub fn inch(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

const MARGIN: f32 = 0.7 * POINTS_PER_INCH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    TimesRoman,
    TimesBold,
}

impl Font {
    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::TimesRoman => "F1",
            Self::TimesBold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
        }
    }
}

pub const BASE_FONT: Font = Font::TimesRoman;
pub const BOLD_FONT: Font = Font::TimesBold;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
}

pub const HEADER_MAIN: ParagraphStyle = ParagraphStyle {
    name: "HeaderMain",
    font: BOLD_FONT,
    font_size: 16.0,
    leading: 19.2,
    alignment: Alignment::Center,
    space_before: 0.0,
    space_after: 8.0,
};

pub const HEADER_SUB: ParagraphStyle = ParagraphStyle {
    name: "HeaderSub",
    font: BASE_FONT,
    font_size: 10.0,
    leading: 12.0,
    alignment: Alignment::Center,
    space_before: 0.0,
    space_after: 4.0,
};

pub const REPORT_TITLE: ParagraphStyle = ParagraphStyle {
    name: "ReportTitle",
    font: BOLD_FONT,
    font_size: 12.0,
    leading: 14.4,
    alignment: Alignment::Center,
    space_before: 0.0,
    space_after: 12.0,
};

pub const SECTION_TITLE: ParagraphStyle = ParagraphStyle {
    name: "SectionTitle",
    font: BOLD_FONT,
    font_size: 10.0,
    leading: 12.0,
    alignment: Alignment::Left,
    space_before: 14.0,
    space_after: 6.0,
};

pub const NORMAL_TEXT: ParagraphStyle = ParagraphStyle {
    name: "NormalText",
    font: BASE_FONT,
    font_size: 10.0,
    leading: 14.0,
    alignment: Alignment::Left,
    space_before: 0.0,
    space_after: 0.0,
};

pub const TABLE_KEY: ParagraphStyle = ParagraphStyle {
    name: "TableKey",
    font: BOLD_FONT,
    font_size: 10.0,
    leading: 12.0,
    alignment: Alignment::Left,
    space_before: 0.0,
    space_after: 0.0,
};

pub const TABLE_VALUE: ParagraphStyle = ParagraphStyle {
    name: "TableValue",
    font: BASE_FONT,
    ..TABLE_KEY
};

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// `#f0f0f0`
pub const HEADER_ROW_BACKGROUND: Color = Color {
    r: 240.0 / 255.0,
    g: 240.0 / 255.0,
    b: 240.0 / 255.0,
};

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTemplate {
    pub width: f32,
    pub height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

impl PageTemplate {
    pub const A4: PageTemplate = PageTemplate {
        width: 595.2756,
        height: 841.8898,
        left_margin: MARGIN,
        right_margin: MARGIN,
        top_margin: MARGIN,
        bottom_margin: MARGIN,
    };

    pub fn frame_width(&self) -> f32 {
        self.width - self.left_margin - self.right_margin
    }

    pub fn frame_height(&self) -> f32 {
        self.height - self.top_margin - self.bottom_margin
    }

    /// y coordinate of the top edge of the frame (PDF origin bottom-left).
    pub fn frame_top(&self) -> f32 {
        self.height - self.top_margin
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::A4
    }
}
