/// Environment variable the CLI reads for the default footer image path.
pub const FOOTER_ENV: &str = "SCOPEMATE_FOOTER";

/// Page geometry and typography for a render call.
///
/// Defaults: US Letter, 50pt margins, 12pt Helvetica with 16pt line pitch,
/// footer image scaled to a quarter of its pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub footer_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let font_size = 12.0;
        RenderConfig {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            font_size,
            line_height: font_size + 4.0,
            footer_scale: 0.25,
        }
    }
}

impl RenderConfig {
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the font size; line pitch follows as `size + 4`.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self.line_height = size + 4.0;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn max_line_width(&self) -> f32 {
        self.page_width - self.margin * 2.0
    }

    /// Baseline of the first line on a fresh page.
    pub fn top_cursor(&self) -> f32 {
        self.page_height - self.margin
    }
}
