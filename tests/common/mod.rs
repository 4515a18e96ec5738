#![allow(dead_code)]

use std::io::Cursor;

use scopemate::{FooterImage, TextMeasure};

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode footer fixture");
    buf.into_inner()
}

/// Solid PNG of the given pixel size.
pub fn png_footer(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 60, 160]));
    encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Png)
}

/// PNG with a transparent left half, to exercise the soft mask path.
pub fn translucent_png_footer(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        image::Rgba([200, 20, 20, alpha])
    });
    encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png)
}

pub fn jpeg_footer(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 40]));
    encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Jpeg)
}

pub fn gray_jpeg_footer(width: u32, height: u32) -> Vec<u8> {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([90]));
    encode(image::DynamicImage::ImageLuma8(img), image::ImageFormat::Jpeg)
}

pub fn footer(width: u32, height: u32) -> FooterImage {
    FooterImage::decode(&png_footer(width, height)).expect("decode footer fixture")
}

/// Every character is one unit wide, whatever the font size.
pub struct Mono;

impl TextMeasure for Mono {
    fn width(&self, text: &str, _font_size: f32) -> f32 {
        text.chars().count() as f32
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
