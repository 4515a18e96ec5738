mod common;

use std::path::Path;

use lopdf::{Document, Object};
use scopemate::{Error, FooterImage, RenderConfig, render_document, render_to_bytes};

fn page_uris(doc: &Document) -> Vec<Vec<String>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).expect("page dictionary");
            let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else {
                return Vec::new();
            };
            annots
                .iter()
                .map(|a| {
                    let annot = doc
                        .get_object(a.as_reference().expect("annotation ref"))
                        .and_then(Object::as_dict)
                        .expect("annotation dictionary");
                    let uri = annot
                        .get(b"A")
                        .and_then(Object::as_dict)
                        .and_then(|action| action.get(b"URI"))
                        .and_then(Object::as_str)
                        .expect("URI action");
                    String::from_utf8_lossy(uri).into_owned()
                })
                .collect()
        })
        .collect()
}

#[test]
fn writes_pdf_with_clickable_links() {
    common::init_logger();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("letter.pdf");
    let text = "Dear Hiring Manager,\n\nPlease contact me at guyu@example.com or https://portfolio.dev.\n\nBest regards,";
    render_document(text, &common::png_footer(200, 40), &out).expect("render");

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let doc = Document::load_mem(&bytes).expect("parse generated pdf");
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(
        page_uris(&doc),
        vec![vec![
            "mailto:guyu@example.com".to_string(),
            "https://portfolio.dev.".to_string()
        ]]
    );
}

#[test]
fn long_document_spans_pages_and_shares_footer() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n".repeat(150);
    let bytes = render_to_bytes(&text, &common::jpeg_footer(320, 64), &RenderConfig::default())
        .expect("render");
    let doc = Document::load_mem(&bytes).expect("parse generated pdf");
    let pages = doc.get_pages();
    assert!(pages.len() >= 3, "got {} pages", pages.len());

    let images: Vec<_> = doc
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|n| n == b"Image")
        })
        .collect();
    assert_eq!(images.len(), 1);
}

#[test]
fn translucent_png_footer_renders() {
    let bytes = render_to_bytes(
        "short",
        &common::translucent_png_footer(64, 16),
        &RenderConfig::default(),
    )
    .expect("render");
    let doc = Document::load_mem(&bytes).expect("parse generated pdf");
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn empty_text_still_produces_a_page() {
    let bytes = render_to_bytes("", &common::png_footer(40, 8), &RenderConfig::default())
        .expect("render");
    let doc = Document::load_mem(&bytes).expect("parse generated pdf");
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn undecodable_footer_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.pdf");

    let err = render_document("text", b"definitely not an image", &out).unwrap_err();
    assert!(matches!(err, Error::Asset(_)), "got {err:?}");
    assert!(!out.exists());

    let err = render_document("text", &[], &out).unwrap_err();
    assert!(matches!(err, Error::Asset(_)));
    assert!(!out.exists());

    let mut truncated = common::png_footer(50, 50);
    truncated.truncate(truncated.len() / 2);
    let err = render_document("text", &truncated, &out).unwrap_err();
    assert!(matches!(err, Error::Asset(_)));
    assert!(!out.exists());
}

#[test]
fn missing_footer_file_is_an_asset_error() {
    let err = scopemate::read_footer(Path::new("/nonexistent/footer.jpg")).unwrap_err();
    assert!(matches!(err, Error::Asset(_)));
}

#[test]
fn unwritable_output_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing-dir").join("out.pdf");
    let err = render_document("text", &common::png_footer(40, 8), &out).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

/// Filter and color space of the only image XObject in `bytes`.
fn footer_xobject(bytes: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let doc = Document::load_mem(bytes).expect("parse generated pdf");
    let images: Vec<_> = doc
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|n| n == b"Image")
        })
        .collect();
    assert_eq!(images.len(), 1);
    let dict = &images[0].dict;
    let filter = dict.get(b"Filter").and_then(Object::as_name).expect("filter");
    let space = dict.get(b"ColorSpace").and_then(Object::as_name).expect("color space");
    (filter.to_vec(), space.to_vec())
}

#[test]
fn jpeg_footer_is_embedded_as_is() {
    let jpeg = common::jpeg_footer(32, 8);
    let footer = FooterImage::decode(&jpeg).expect("decode");
    assert!(footer.is_passthrough());
    assert!(!footer.grayscale);

    let bytes = render_to_bytes("hi", &jpeg, &RenderConfig::default()).expect("render");
    let (filter, space) = footer_xobject(&bytes);
    assert_eq!(filter, b"DCTDecode");
    assert_eq!(space, b"DeviceRGB");
}

#[test]
fn gray_jpeg_footer_keeps_one_component() {
    let jpeg = common::gray_jpeg_footer(32, 8);
    let footer = FooterImage::decode(&jpeg).expect("decode");
    assert!(footer.is_passthrough());
    assert!(footer.grayscale);

    let bytes = render_to_bytes("hi", &jpeg, &RenderConfig::default()).expect("render");
    assert_eq!(footer_xobject(&bytes), (b"DCTDecode".to_vec(), b"DeviceGray".to_vec()));
}

#[test]
fn png_footer_is_written_from_decoded_pixels() {
    let png = common::png_footer(32, 8);
    let footer = FooterImage::decode(&png).expect("decode");
    assert!(!footer.is_passthrough());
    assert_eq!((footer.pixel_width, footer.pixel_height), (32, 8));

    let bytes = render_to_bytes("hi", &png, &RenderConfig::default()).expect("render");
    assert_eq!(footer_xobject(&bytes), (b"FlateDecode".to_vec(), b"DeviceRGB".to_vec()));
}
