mod footer;
mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::config::RenderConfig;
use crate::error::Error;
use crate::fonts::{FONT_RESOURCE, Helvetica, register_helvetica, to_winansi_bytes};
use crate::model::{BLACK, Document, DrawOp, FooterImage, Page, Rgb};

use footer::{FOOTER_RESOURCE, embed_footer};

/// Lay out `doc` into finalized pages without serializing them.
pub fn layout_pages(doc: &Document, footer: &FooterImage, config: &RenderConfig) -> Vec<Page> {
    layout::layout(doc, footer, config, &Helvetica)
}

fn set_fill(content: &mut Content, current: &mut Rgb, color: Rgb) {
    if *current != color {
        let [r, g, b] = color;
        if color == BLACK {
            content.set_fill_gray(0.0);
        } else {
            content.set_fill_rgb(r, g, b);
        }
        *current = color;
    }
}

/// Content stream for one page: text runs inside one text object, then
/// rules and the footer image.
fn page_content(page: &Page) -> Content {
    let mut content = Content::new();
    let mut current_color = BLACK;
    let mut cur_font_size: f32 = -1.0;

    let has_text = page.text_runs().any(|r| !r.text.is_empty());
    if has_text {
        content.begin_text();
        let mut td_x = 0.0_f32;
        let mut td_y = 0.0_f32;
        for run in page.text_runs() {
            set_fill(&mut content, &mut current_color, run.color);
            if cur_font_size != run.font_size {
                content.set_font(Name(FONT_RESOURCE.as_bytes()), run.font_size);
                cur_font_size = run.font_size;
            }
            content.next_line(run.x - td_x, run.y - td_y);
            td_x = run.x;
            td_y = run.y;
            content.show(Str(&to_winansi_bytes(&run.text)));
        }
        content.end_text();
    }

    for op in &page.ops {
        match op {
            DrawOp::Rule {
                x,
                y,
                width,
                thickness,
                color,
            } => {
                set_fill(&mut content, &mut current_color, *color);
                content
                    .rect(*x, y - thickness / 2.0, *width, *thickness)
                    .fill_nonzero();
            }
            DrawOp::Footer {
                x,
                y,
                width,
                height,
            } => {
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(FOOTER_RESOURCE.as_bytes()));
                content.restore_state();
            }
            DrawOp::Text(_) | DrawOp::Link(_) => {}
        }
    }
    if current_color != BLACK {
        content.set_fill_gray(0.0);
    }
    content
}

/// Serialize laid-out pages. The footer XObject and the font are written once
/// and shared by all pages.
pub fn write_pdf(pages: &[Page], footer: &FooterImage) -> Result<Vec<u8>, Error> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let font_ref = alloc();
    register_helvetica(&mut pdf, font_ref);
    let footer_ref = embed_footer(&mut pdf, footer, &mut alloc);

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let page_annot_refs: Vec<Vec<Ref>> = pages
        .iter()
        .map(|page| {
            page.links()
                .map(|link| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(pdf_writer::types::AnnotationType::Link)
                        .rect(link.rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(pdf_writer::types::ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annot_ref
                })
                .collect()
        })
        .collect();

    for (i, page) in pages.iter().enumerate() {
        let raw = page_content(page).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for (i, p) in pages.iter().enumerate() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, p.width, p.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(FONT_RESOURCE.as_bytes()), font_ref);
        resources
            .x_objects()
            .pair(Name(FOOTER_RESOURCE.as_bytes()), footer_ref);
    }

    Ok(pdf.finish())
}

/// Sanitize, lay out and serialize `text` with `footer` on every page.
pub fn render(text: &str, footer: &FooterImage, config: &RenderConfig) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();

    let doc = Document::from_text(text);
    let pages = layout_pages(&doc, footer, config);
    let t_layout = t0.elapsed();

    let bytes = write_pdf(&pages, footer)?;
    let t_total = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms ({} lines, {} pages, {} links)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        doc.lines.len(),
        pages.len(),
        pages.iter().map(|p| p.links().count()).sum::<usize>(),
    );

    Ok(bytes)
}
