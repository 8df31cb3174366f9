use crate::domain::model::{ImageData, PreparedImage};
use crate::utils::error::Result;
use image::GrayImage;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, Default)]
pub struct PreprocessOptions {
    /// When set, binarize after grayscale: pixel >= threshold becomes white,
    /// everything else black.
    pub threshold: Option<u8>,
}

/// Decode the uploaded image, convert to 8-bit grayscale and optionally
/// threshold it, then re-encode as PNG for the OCR call.
pub fn prepare(image: &ImageData, options: PreprocessOptions) -> Result<PreparedImage> {
    let decoded = image::load_from_memory(&image.bytes)?;
    let mut gray: GrayImage = decoded.to_luma8();

    if let Some(threshold) = options.threshold {
        for pixel in gray.pixels_mut() {
            pixel.0[0] = if pixel.0[0] >= threshold { 255 } else { 0 };
        }
    }

    let (width, height) = gray.dimensions();
    let mut png = Cursor::new(Vec::new());
    gray.write_to(&mut png, image::ImageFormat::Png)?;

    tracing::debug!("Prepared {}x{} grayscale image", width, height);
    Ok(PreparedImage {
        png: png.into_inner(),
        width,
        height,
    })
}
