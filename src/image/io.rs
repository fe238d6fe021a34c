//! Conversions between `image` crate buffers and matching planes.

use crate::image::{ImageView, OwnedImage};
use crate::util::{BoardError, BoardResult};
use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, Luma, Rgb, RgbImage};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> BoardResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned grayscale plane from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> BoardResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// BT.601 luma of one pixel in 14-bit fixed point, rounded.
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let y = 4899 * u32::from(r) + 9617 * u32::from(g) + 1868 * u32::from(b);
    ((y + (1 << 13)) >> 14) as u8
}

/// Converts an RGB raster to its BT.601 luma plane.
///
/// The match thresholds are calibrated against these weights; gray pixels
/// (`r == g == b`) map to themselves.
pub fn gray_from_rgb(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([luma(*img.get_pixel(x, y))])
    })
}

/// Decodes an image file, applying its EXIF orientation.
fn decode_oriented(path: &Path) -> BoardResult<DynamicImage> {
    let decode_err = |reason: String| BoardError::Decode { reason };
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|err| decode_err(err.to_string()))?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|err| decode_err(err.to_string()))?;
    let orientation = decoder
        .orientation()
        .map_err(|err| decode_err(err.to_string()))?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(|err| decode_err(err.to_string()))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Decodes an image file into an upright RGB raster.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> BoardResult<RgbImage> {
    Ok(decode_oriented(path.as_ref())?.to_rgb8())
}

/// Decodes an image file into an upright owned grayscale plane.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> BoardResult<OwnedImage> {
    let rgb = load_rgb_image(path)?;
    owned_from_gray_image(&gray_from_rgb(&rgb))
}
