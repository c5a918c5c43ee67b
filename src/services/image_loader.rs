//! Image decoding and resizing to one pixel per stitch.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use stitch_pattern::PixelGrid;

use crate::error::AppError;

/// Height in stitches for an image of `width x height` pixels scaled to
/// `stitches` columns, keeping the aspect ratio. Never less than 1.
pub fn target_height(width: u32, height: u32, stitches: u32) -> u32 {
    let scaled = f64::from(stitches) * f64::from(height) / f64::from(width.max(1));
    (scaled.round() as u32).max(1)
}

/// Resize a decoded image to `stitches` columns with nearest-neighbour
/// sampling and convert it to a pixel grid. Alpha is discarded.
pub fn to_pixel_grid(image: &DynamicImage, stitches: u32) -> Result<PixelGrid, AppError> {
    if stitches == 0 {
        return Err(AppError::Config("stitch count must be at least 1".to_string()));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(AppError::ImageLoad("image has no pixels".to_string()));
    }

    let rows = target_height(image.width(), image.height(), stitches);
    let rgb = image
        .resize_exact(stitches, rows, FilterType::Nearest)
        .to_rgb8();

    tracing::debug!(
        from_width = image.width(),
        from_height = image.height(),
        width = stitches,
        height = rows,
        "Resized image"
    );

    PixelGrid::from_rgb_bytes(rgb.as_raw(), stitches as usize, rows as usize)
        .map_err(|e| AppError::ImageLoad(e.to_string()))
}

/// Open an image file and resize it to `stitches` columns.
pub fn load_pixels(path: &Path, stitches: u32) -> Result<PixelGrid, AppError> {
    let image = image::open(path)
        .map_err(|e| AppError::ImageLoad(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Opened image"
    );
    to_pixel_grid(&image, stitches)
}
