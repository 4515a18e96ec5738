use std::io::Cursor;

use image::{DynamicImage, ExtendedColorType, ImageDecoder};
use pdf_writer::{Filter, Pdf, Ref};

use crate::error::Error;
use crate::model::{FooterImage, ImageFormat};

/// Resource name of the footer XObject on every page.
pub(super) const FOOTER_RESOURCE: &str = "Im1";

impl FooterImage {
    /// Decode a raster asset (JPEG or PNG). Any failure is an asset error:
    /// the footer is required, so the render cannot continue without it.
    pub fn decode(bytes: &[u8]) -> Result<FooterImage, Error> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| Error::Asset(e.to_string()))?;
        let format = match reader.format() {
            Some(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Some(image::ImageFormat::Png) => ImageFormat::Png,
            Some(other) => {
                return Err(Error::Asset(format!("unsupported image format {other:?}")));
            }
            None => return Err(Error::Asset("unrecognized image data".into())),
        };
        let decoder = reader.into_decoder()?;
        let original = decoder.original_color_type();
        let decoded = DynamicImage::from_decoder(decoder)?;
        let (pixel_width, pixel_height) = (decoded.width(), decoded.height());
        if pixel_width == 0 || pixel_height == 0 {
            return Err(Error::Asset("image has no pixels".into()));
        }
        let grayscale = matches!(original, ExtendedColorType::L8 | ExtendedColorType::L16);
        // DCT data goes into the PDF untouched unless it is CMYK.
        let passthrough =
            format == ImageFormat::Jpeg && !matches!(original, ExtendedColorType::Cmyk8);

        log::debug!(
            "Footer image: {:?} {}x{} px, {:?}{}",
            format,
            pixel_width,
            pixel_height,
            original,
            if passthrough { "" } else { " (re-encoded)" },
        );

        Ok(FooterImage {
            data: bytes.to_vec(),
            format,
            pixel_width,
            pixel_height,
            grayscale,
            pixels: (!passthrough).then(|| decoded.to_rgba8()),
        })
    }
}

/// Write the footer as an image XObject and return its reference. Passthrough
/// JPEGs keep their DCT stream; everything else is written from the decoded
/// pixels as Flate RGB plus a soft mask when any pixel is translucent.
pub(super) fn embed_footer(
    pdf: &mut Pdf,
    img: &FooterImage,
    alloc: &mut impl FnMut() -> Ref,
) -> Ref {
    let xobj_ref = alloc();

    match &img.pixels {
        None => {
            let mut xobj = pdf.image_xobject(xobj_ref, &img.data);
            xobj.filter(Filter::DctDecode);
            xobj.width(img.pixel_width as i32);
            xobj.height(img.pixel_height as i32);
            if img.grayscale {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        Some(rgba) => {
            let (w, h) = (rgba.width(), rgba.height());
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let rgb_data: Vec<u8> = rgba
                .pixels()
                .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                .collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w as i32);
                mask.height(h as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }

    xobj_ref
}
