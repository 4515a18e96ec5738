mod config;
mod error;
mod fonts;
pub mod jobs;
mod links;
mod model;
mod pdf;
pub mod store;
mod text;

pub use config::{FOOTER_ENV, RenderConfig};
pub use error::Error;
pub use fonts::{Helvetica, TextMeasure};
pub use links::{LinkKind, LinkMatch, Segment, scan_links, segments};
pub use model::{
    BLACK, Document, DrawOp, FooterImage, ImageFormat, LINK_BLUE, LinkAnnotation, Page, PageState,
    Rgb, TextRun,
};
pub use pdf::{layout_pages, write_pdf};
pub use text::{document_lines, sanitize, wrap_line};

use std::path::Path;
use std::time::Instant;

/// Render `text` to a PDF at `output` with the default page setup.
///
/// The footer image is decoded before anything else happens; if that fails,
/// no file is written.
pub fn render_document(text: &str, footer_image: &[u8], output: &Path) -> Result<(), Error> {
    render_document_with(text, footer_image, output, &RenderConfig::default())
}

pub fn render_document_with(
    text: &str,
    footer_image: &[u8],
    output: &Path,
    config: &RenderConfig,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = render_to_bytes(text, footer_image, config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

pub fn render_to_bytes(
    text: &str,
    footer_image: &[u8],
    config: &RenderConfig,
) -> Result<Vec<u8>, Error> {
    let footer = FooterImage::decode(footer_image)?;
    pdf::render(text, &footer, config)
}

/// Lay out `text` without serializing, for inspecting draw operations.
pub fn layout_document(text: &str, footer: &FooterImage, config: &RenderConfig) -> Vec<Page> {
    layout_pages(&Document::from_text(text), footer, config)
}

/// Read the footer asset from disk. A missing file is an asset error.
pub fn read_footer(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error::Asset(format!("{}: {e}", path.display())))
}
