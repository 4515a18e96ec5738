use pdf_writer::Rect;

use crate::config::RenderConfig;
use crate::fonts::TextMeasure;
use crate::links::{Segment, segments};
use crate::model::{BLACK, Document, DrawOp, FooterImage, LINK_BLUE, LinkAnnotation, Page, TextRun};
use crate::text::wrap_line;

const UNDERLINE_DROP: f32 = 2.0;
const UNDERLINE_THICKNESS: f32 = 1.0;

/// Places wrapped sublines top-down, breaking pages before the footer band.
///
/// Starts with one empty page, which accumulates from its first draw. Every
/// page that is left behind, and the last page in [`LayoutEngine::finish`],
/// gets exactly one footer draw.
pub(crate) struct LayoutEngine<'a, M: TextMeasure> {
    config: &'a RenderConfig,
    measure: &'a M,
    footer_w: f32,
    footer_h: f32,
    pages: Vec<Page>,
    y: f32,
}

impl<'a, M: TextMeasure> LayoutEngine<'a, M> {
    pub(crate) fn new(config: &'a RenderConfig, measure: &'a M, footer: &FooterImage) -> Self {
        let (footer_w, footer_h) = footer.display_size(config.footer_scale);
        LayoutEngine {
            config,
            measure,
            footer_w,
            footer_h,
            pages: vec![Page::new(config.page_width, config.page_height)],
            y: config.top_cursor(),
        }
    }

    fn footer_op(&self) -> DrawOp {
        DrawOp::Footer {
            x: self.config.margin,
            y: self.config.margin,
            width: self.footer_w,
            height: self.footer_h,
        }
    }

    fn current_page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page(&mut self) {
        let footer = self.footer_op();
        self.current_page().finalize(footer);
        self.pages
            .push(Page::new(self.config.page_width, self.config.page_height));
        self.y = self.config.top_cursor();
        log::debug!("Page break: starting page {}", self.pages.len());
    }

    /// Lay out one raw line. Zero sublines still advance the cursor once.
    pub(crate) fn place_line(&mut self, raw: &str) {
        let cfg = self.config;
        let sublines = wrap_line(raw, cfg.max_line_width(), self.measure, cfg.font_size);
        if sublines.is_empty() {
            self.y -= cfg.line_height;
            return;
        }
        for subline in &sublines {
            if self.y - cfg.line_height < cfg.margin + self.footer_h {
                self.break_page();
            }
            if self.measure.width(subline, cfg.font_size) > cfg.max_line_width() {
                log::warn!("Word overflows line width: {subline:?}");
            }
            self.draw_subline(subline);
            self.y -= cfg.line_height;
        }
    }

    /// Draw plain gaps in black and links in blue with an underline and a
    /// matching annotation. The x cursor restarts at the margin per subline.
    fn draw_subline(&mut self, subline: &str) {
        let fs = self.config.font_size;
        let y = self.y;
        let mut x = self.config.margin;

        for part in segments(subline) {
            match part {
                Segment::Plain(text) => {
                    let width = self.measure.width(text, fs);
                    self.current_page().push(DrawOp::Text(TextRun {
                        text: text.to_string(),
                        x,
                        y,
                        font_size: fs,
                        width,
                        color: BLACK,
                    }));
                    x += width;
                }
                Segment::Link(m) => {
                    let width = self.measure.width(&m.text, fs);
                    let url = m.target();
                    let page = self.current_page();
                    page.push(DrawOp::Text(TextRun {
                        text: m.text,
                        x,
                        y,
                        font_size: fs,
                        width,
                        color: LINK_BLUE,
                    }));
                    page.push(DrawOp::Rule {
                        x,
                        y: y - UNDERLINE_DROP,
                        width,
                        thickness: UNDERLINE_THICKNESS,
                        color: LINK_BLUE,
                    });
                    page.push(DrawOp::Link(LinkAnnotation {
                        rect: Rect::new(x, y, x + width, y + fs),
                        url,
                    }));
                    x += width;
                }
            }
        }
    }

    /// Footer the last page and hand back the finished page list.
    pub(crate) fn finish(mut self) -> Vec<Page> {
        let footer = self.footer_op();
        self.current_page().finalize(footer);
        self.pages
    }
}

/// Run the whole document through a fresh engine.
pub(crate) fn layout(
    doc: &Document,
    footer: &FooterImage,
    config: &RenderConfig,
    measure: &impl TextMeasure,
) -> Vec<Page> {
    let mut engine = LayoutEngine::new(config, measure, footer);
    for line in &doc.lines {
        engine.place_line(line);
    }
    engine.finish()
}
