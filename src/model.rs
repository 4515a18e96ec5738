use pdf_writer::Rect;

pub type Rgb = [f32; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];
pub const LINK_BLUE: Rgb = [0.0, 0.0, 1.0];

/// Raw document lines. A blank line stands for paragraph spacing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub lines: Vec<String>,
}

impl Document {
    /// Sanitize `text` and split it into lines.
    pub fn from_text(text: &str) -> Self {
        let clean = crate::text::sanitize(text);
        Document {
            lines: crate::text::document_lines(&clean)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// The decoded footer asset, shared by every page of a render.
#[derive(Clone, Debug)]
pub struct FooterImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub grayscale: bool,
    /// Decoded pixels for assets that are not embedded as-is (PNG, CMYK JPEG).
    pub(crate) pixels: Option<image::RgbaImage>,
}

impl FooterImage {
    /// Whether the original JPEG stream is embedded without re-encoding.
    pub fn is_passthrough(&self) -> bool {
        self.pixels.is_none()
    }

    pub fn display_size(&self, scale: f32) -> (f32, f32) {
        (
            self.pixel_width as f32 * scale,
            self.pixel_height as f32 * scale,
        )
    }
}

/// A run of glyphs sharing one color, positioned at its baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub width: f32,
    pub color: Rgb,
}

/// Clickable rectangle bound to a URI. Always emitted together with the run
/// it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkAnnotation {
    pub rect: Rect,
    pub url: String,
}

impl LinkAnnotation {
    pub fn width(&self) -> f32 {
        self.rect.x2 - self.rect.x1
    }

    pub fn height(&self) -> f32 {
        self.rect.y2 - self.rect.y1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    /// Horizontal rule (underline): left end, baseline y, length, thickness.
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Rgb,
    },
    /// The footer image at its bottom-left anchor.
    Footer {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Link(LinkAnnotation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    Empty,
    Accumulating,
    Finalized,
}

/// One drawing surface. Starts empty, accumulates operations from the first
/// draw on and takes none after its footer is drawn.
#[derive(Clone, Debug)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
    state: PageState,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Page {
            width,
            height,
            ops: Vec::new(),
            state: PageState::Empty,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        debug_assert_ne!(self.state, PageState::Finalized, "draw on finalized page");
        self.ops.push(op);
        self.state = PageState::Accumulating;
    }

    /// Draw the footer and close the page to further drawing.
    pub(crate) fn finalize(&mut self, footer: DrawOp) {
        self.push(footer);
        self.state = PageState::Finalized;
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkAnnotation> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link(link) => Some(link),
            _ => None,
        })
    }

    pub fn footer_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Footer { .. }))
            .count()
    }
}
